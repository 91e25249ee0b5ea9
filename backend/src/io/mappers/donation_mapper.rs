use shared::{Donation as SharedDonation, DonationStatus as SharedStatus};

use crate::domain::models::{Donation as DomainDonation, DonationStatus};

/// Mapper from domain Donation models to the shared Donation DTOs.
pub struct DonationMapper;

impl DonationMapper {
    pub fn status_to_dto(status: DonationStatus) -> SharedStatus {
        match status {
            DonationStatus::Draft => SharedStatus::Draft,
            DonationStatus::Available => SharedStatus::Available,
            DonationStatus::Claimed => SharedStatus::Claimed,
            DonationStatus::InTransit => SharedStatus::InTransit,
            DonationStatus::Completed => SharedStatus::Completed,
        }
    }

    /// Converts a domain Donation model to a shared Donation DTO.
    pub fn to_dto(domain: DomainDonation) -> SharedDonation {
        SharedDonation {
            id: domain.id,
            title: domain.title,
            description: domain.description,
            condition: domain.condition,
            size: domain.size,
            gender: domain.gender,
            quantity: domain.quantity,
            category: domain.category,
            pickup_address: domain.pickup_address,
            phone: domain.phone,
            notes: domain.notes,
            available_times: domain.available_times,
            status: Self::status_to_dto(domain.status),
            claimed_by: domain.claimed_by,
            created_at: domain.created_at.format("%Y-%m-%d").to_string(),
            donor_name: domain.donor_name,
            image_preview_urls: domain.image_preview_urls,
        }
    }

    pub fn to_dto_list(domain: Vec<DomainDonation>) -> Vec<SharedDonation> {
        domain.into_iter().map(Self::to_dto).collect()
    }
}
