//! Demo donations used to populate a brand new store.

use chrono::NaiveDate;
use shared::DonationCondition;

use super::models::{Donation, DonationStatus};

struct Sample {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    size: &'static str,
    gender: &'static str,
    quantity: &'static str,
    category: &'static str,
    pickup_address: &'static str,
    phone: &'static str,
    notes: &'static str,
    available_times: &'static str,
    created_at: (i32, u32, u32),
    donor_name: &'static str,
}

const SAMPLES: [Sample; 3] = [
    Sample {
        id: "sample1",
        title: "Winter Coat - Large",
        description: "Warm winter coat, barely used. Perfect for cold weather.",
        size: "l",
        gender: "unisex",
        quantity: "1",
        category: "outerwear",
        pickup_address: "123 Main St, Downtown City",
        phone: "+1-555-0123",
        notes: "Available weekdays after 5 PM",
        available_times: "Weekdays 5-8 PM",
        created_at: (2024, 1, 15),
        donor_name: "John Smith",
    },
    Sample {
        id: "sample2",
        title: "Kids Clothes Bundle",
        description: "Various children clothing items including shirts, pants, and pajamas.",
        size: "child-6-8",
        gender: "unisex",
        quantity: "5",
        category: "children",
        pickup_address: "456 Oak Ave, Suburbia",
        phone: "+1-555-0456",
        notes: "Multiple items in good condition",
        available_times: "Weekends anytime",
        created_at: (2024, 1, 20),
        donor_name: "Sarah Johnson",
    },
    Sample {
        id: "sample3",
        title: "Professional Shirts Bundle",
        description: "Collection of business shirts, perfect for job interviews or work.",
        size: "m",
        gender: "men",
        quantity: "3",
        category: "tops",
        pickup_address: "789 Business Blvd, Corporate District",
        phone: "+1-555-0789",
        notes: "Dry cleaned and ready to wear",
        available_times: "Weekdays 9 AM - 6 PM",
        created_at: (2024, 1, 22),
        donor_name: "Michael Brown",
    },
];

/// The three listings a new store starts with
pub fn sample_donations() -> Vec<Donation> {
    SAMPLES
        .iter()
        .filter_map(|sample| {
            let (year, month, day) = sample.created_at;
            let created_at = NaiveDate::from_ymd_opt(year, month, day)?;
            Some(Donation {
                id: sample.id.to_string(),
                title: sample.title.to_string(),
                description: sample.description.to_string(),
                condition: DonationCondition::Good,
                size: sample.size.to_string(),
                gender: Some(sample.gender.to_string()),
                quantity: sample.quantity.to_string(),
                category: Some(sample.category.to_string()),
                pickup_address: Some(sample.pickup_address.to_string()),
                phone: Some(sample.phone.to_string()),
                notes: Some(sample.notes.to_string()),
                available_times: Some(sample.available_times.to_string()),
                status: DonationStatus::Available,
                claimed_by: None,
                created_at,
                donor_name: sample.donor_name.to_string(),
                image_preview_urls: Vec::new(),
            })
        })
        .collect()
}
