//! Domain model for a clothing donation and its status lifecycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::DonationCondition;
use std::fmt;

/// Lifecycle status of a donation.
///
/// The only legal moves are one step forward:
/// `Draft -> Available -> Claimed -> In Transit -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DonationStatus {
    Draft,
    Available,
    Claimed,
    #[serde(rename = "In Transit")]
    InTransit,
    Completed,
}

impl DonationStatus {
    pub const ALL: [DonationStatus; 5] = [
        DonationStatus::Draft,
        DonationStatus::Available,
        DonationStatus::Claimed,
        DonationStatus::InTransit,
        DonationStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Draft => "Draft",
            DonationStatus::Available => "Available",
            DonationStatus::Claimed => "Claimed",
            DonationStatus::InTransit => "In Transit",
            DonationStatus::Completed => "Completed",
        }
    }

    /// The single state this status may advance to, `None` when terminal
    pub fn next(&self) -> Option<DonationStatus> {
        match self {
            DonationStatus::Draft => Some(DonationStatus::Available),
            DonationStatus::Available => Some(DonationStatus::Claimed),
            DonationStatus::Claimed => Some(DonationStatus::InTransit),
            DonationStatus::InTransit => Some(DonationStatus::Completed),
            DonationStatus::Completed => None,
        }
    }

    pub fn can_transition_to(&self, target: DonationStatus) -> bool {
        self.next() == Some(target)
    }

    /// Statuses that carry a claimant
    pub fn is_claimed(&self) -> bool {
        matches!(
            self,
            DonationStatus::Claimed | DonationStatus::InTransit | DonationStatus::Completed
        )
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransitionError {
    #[error("Cannot move donation from {from} to {to}")]
    InvalidTransition {
        from: DonationStatus,
        to: DonationStatus,
    },
    #[error("Claiming a donation requires a claimant")]
    MissingClaimant,
    #[error("Donation is claimed by {expected:?}, not {provided}")]
    ClaimantMismatch {
        expected: Option<String>,
        provided: String,
    },
}

/// Everything the donor supplies when listing a donation
#[derive(Debug, Clone, PartialEq)]
pub struct DonationDraft {
    pub title: String,
    pub description: String,
    pub condition: DonationCondition,
    pub size: String,
    pub gender: Option<String>,
    pub quantity: String,
    pub category: Option<String>,
    pub pickup_address: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub available_times: Option<String>,
    pub image_preview_urls: Vec<String>,
}

impl DonationDraft {
    /// A draft with only the required fields set
    pub fn new(title: &str, description: &str, condition: DonationCondition, size: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            condition,
            size: size.to_string(),
            gender: None,
            quantity: "1".to_string(),
            category: None,
            pickup_address: None,
            phone: None,
            notes: None,
            available_times: None,
            image_preview_urls: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Donation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub condition: DonationCondition,
    pub size: String,
    pub gender: Option<String>,
    pub quantity: String,
    pub category: Option<String>,
    pub pickup_address: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub available_times: Option<String>,
    pub status: DonationStatus,
    pub claimed_by: Option<String>,
    pub created_at: NaiveDate,
    pub donor_name: String,
    pub image_preview_urls: Vec<String>,
}

impl Donation {
    /// Build a freshly listed donation from a draft
    pub fn from_draft(id: String, draft: DonationDraft, donor_name: &str, created_at: NaiveDate) -> Self {
        Donation {
            id,
            title: draft.title,
            description: draft.description,
            condition: draft.condition,
            size: draft.size,
            gender: draft.gender,
            quantity: draft.quantity,
            category: draft.category,
            pickup_address: draft.pickup_address,
            phone: draft.phone,
            notes: draft.notes,
            available_times: draft.available_times,
            status: DonationStatus::Available,
            claimed_by: None,
            created_at,
            donor_name: donor_name.to_string(),
            image_preview_urls: draft.image_preview_urls,
        }
    }

    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Parsed item count, `None` if the stored quantity is not a number
    pub fn quantity_count(&self) -> Option<u32> {
        self.quantity.trim().parse().ok()
    }

    /// Return a copy moved to `target`.
    ///
    /// Claiming requires a claimant. Later steps keep the existing claimant;
    /// a claimant passed for them must match it.
    pub fn transition_to(
        &self,
        target: DonationStatus,
        claimant: Option<&str>,
    ) -> Result<Donation, TransitionError> {
        if !self.status.can_transition_to(target) {
            return Err(TransitionError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }

        let claimant = claimant.map(str::trim).filter(|c| !c.is_empty());
        let claimed_by = match target {
            DonationStatus::Claimed => {
                let claimant = claimant.ok_or(TransitionError::MissingClaimant)?;
                Some(claimant.to_string())
            }
            _ => match claimant {
                None => self.claimed_by.clone(),
                Some(provided) if self.claimed_by.as_deref() == Some(provided) => {
                    self.claimed_by.clone()
                }
                Some(provided) => {
                    return Err(TransitionError::ClaimantMismatch {
                        expected: self.claimed_by.clone(),
                        provided: provided.to_string(),
                    })
                }
            },
        };

        Ok(Donation {
            status: target,
            claimed_by,
            ..self.clone()
        })
    }
}
