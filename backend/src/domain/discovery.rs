//! Browsing filters and dashboard counters.
//!
//! Everything here is a pure function over lists the store hands out.

use chrono::{Duration, NaiveDate};
use shared::{DonationFilter, DonorDashboardStats, NgoDashboardStats};

use super::models::{Donation, DonationStatus};

/// Category codes offered by the intake form, with display labels
pub const CATEGORIES: [(&str, &str); 8] = [
    ("tops", "Tops & Shirts"),
    ("bottoms", "Pants & Bottoms"),
    ("outerwear", "Jackets & Coats"),
    ("dresses", "Dresses & Skirts"),
    ("shoes", "Shoes"),
    ("accessories", "Accessories"),
    ("children", "Children's Clothing"),
    ("other", "Other"),
];

/// Size codes offered by the intake form, with display labels
pub const SIZES: [(&str, &str); 12] = [
    ("xs", "XS"),
    ("s", "S"),
    ("m", "M"),
    ("l", "L"),
    ("xl", "XL"),
    ("xxl", "XXL"),
    ("3xl", "3XL"),
    ("child-2-4", "Child 2-4 years"),
    ("child-4-6", "Child 4-6 years"),
    ("child-6-8", "Child 6-8 years"),
    ("child-8-10", "Child 8-10 years"),
    ("child-10-12", "Child 10-12 years"),
];

/// Days counted as "this week"
const RECENT_WINDOW_DAYS: i64 = 7;

/// A selector constrains nothing when absent, blank or "all"
fn selector(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

pub fn matches_filter(donation: &Donation, filter: &DonationFilter) -> bool {
    let matches_search = match selector(&filter.search) {
        None => true,
        Some(query) => {
            let query = query.to_lowercase();
            donation.title.to_lowercase().contains(&query)
                || donation.description.to_lowercase().contains(&query)
        }
    };

    let matches_category = selector(&filter.category)
        .map_or(true, |category| donation.category.as_deref() == Some(category));
    let matches_size = selector(&filter.size).map_or(true, |size| donation.size == size);
    let matches_condition = selector(&filter.condition)
        .map_or(true, |condition| donation.condition.as_str() == condition);

    matches_search && matches_category && matches_size && matches_condition
}

/// Keep the donations matching `filter`, preserving order
pub fn apply_filter(donations: Vec<Donation>, filter: &DonationFilter) -> Vec<Donation> {
    donations
        .into_iter()
        .filter(|d| matches_filter(d, filter))
        .collect()
}

pub fn donor_stats(donations: &[Donation]) -> DonorDashboardStats {
    let count = |wanted: &[DonationStatus]| {
        donations
            .iter()
            .filter(|d| wanted.contains(&d.status))
            .count()
    };

    DonorDashboardStats {
        total: donations.len(),
        completed: count(&[DonationStatus::Completed]),
        in_progress: count(&[DonationStatus::Claimed, DonationStatus::InTransit]),
        available: count(&[DonationStatus::Available]),
    }
}

/// Created within the last seven days, today included
pub fn is_recent(donation: &Donation, today: NaiveDate) -> bool {
    donation.created_at > today - Duration::days(RECENT_WINDOW_DAYS)
}

/// `shown` is the filtered list on screen, `available` the unfiltered one
pub fn ngo_stats(
    shown: &[Donation],
    available: &[Donation],
    claimed_by_ngo: usize,
    today: NaiveDate,
) -> NgoDashboardStats {
    NgoDashboardStats {
        available: shown.len(),
        claimed: claimed_by_ngo,
        new_this_week: available.iter().filter(|d| is_recent(d, today)).count(),
    }
}
