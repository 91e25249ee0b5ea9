//! Donor and NGO dashboards.
//!
//! Each operation checks the session role before touching the store. Donors
//! list and browse their own donations; NGOs browse available donations and
//! claim them.

use log::{info, warn};
use shared::{
    ClaimDonationResponse, CreateDonationRequest, CreateDonationResponse, DonationFilter,
    DonorDashboardResponse, NgoDashboardResponse, SessionUser, UserRole,
};
use std::sync::Arc;

use super::clock::Clock;
use super::discovery;
use super::donation_service::{DonationService, StoreError};
use super::intake::{validate_donation_request, ValidationError};
use super::models::{DonationStatus, TransitionError};
use crate::io::mappers::DonationMapper;
use crate::storage::KeyValueStorage;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("This action requires the {required} role, but {user} is signed in as {actual}")]
    WrongRole {
        user: String,
        required: UserRole,
        actual: UserRole,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct DashboardService<S> {
    donation_service: DonationService<S>,
    clock: Arc<dyn Clock>,
}

impl<S> Clone for DashboardService<S> {
    fn clone(&self) -> Self {
        Self {
            donation_service: self.donation_service.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: KeyValueStorage> DashboardService<S> {
    pub fn new(donation_service: DonationService<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            donation_service,
            clock,
        }
    }

    fn require_role(user: &SessionUser, required: UserRole) -> Result<(), DashboardError> {
        if user.role == required {
            Ok(())
        } else {
            warn!("{} ({}) attempted a {} action", user.name, user.role, required);
            Err(DashboardError::WrongRole {
                user: user.name.clone(),
                required,
                actual: user.role,
            })
        }
    }

    /// The donor's own donations, newest first, with counters
    pub fn donor_dashboard(&self, user: &SessionUser) -> Result<DonorDashboardResponse, DashboardError> {
        Self::require_role(user, UserRole::Donor)?;

        let donations = self.donation_service.list_by_donor(&user.name)?;
        let stats = discovery::donor_stats(&donations);

        Ok(DonorDashboardResponse {
            user: user.clone(),
            donations: DonationMapper::to_dto_list(donations),
            stats,
        })
    }

    /// Validate an intake form and list the donation
    pub fn submit_donation(
        &self,
        user: &SessionUser,
        request: &CreateDonationRequest,
    ) -> Result<CreateDonationResponse, DashboardError> {
        Self::require_role(user, UserRole::Donor)?;

        let draft = validate_donation_request(request)?;
        let donation = self.donation_service.create(draft, &user.name)?;
        let success_message = format!("\"{}\" is now available for NGOs to claim", donation.title);

        Ok(CreateDonationResponse {
            donation: DonationMapper::to_dto(donation),
            success_message,
        })
    }

    /// Available donations matching `filter`, with counters
    pub fn ngo_dashboard(
        &self,
        user: &SessionUser,
        filter: &DonationFilter,
    ) -> Result<NgoDashboardResponse, DashboardError> {
        Self::require_role(user, UserRole::Ngo)?;

        let available = self.donation_service.list_available()?;
        let shown = discovery::apply_filter(available.clone(), filter);
        let claimed = self.donation_service.list_claimed_by(&user.name)?.len();
        let stats = discovery::ngo_stats(&shown, &available, claimed, self.clock.today());

        Ok(NgoDashboardResponse {
            user: user.clone(),
            donations: DonationMapper::to_dto_list(shown),
            stats,
        })
    }

    pub fn claim_donation(
        &self,
        user: &SessionUser,
        donation_id: &str,
    ) -> Result<ClaimDonationResponse, DashboardError> {
        Self::require_role(user, UserRole::Ngo)?;

        let donation = self.donation_service.claim(donation_id, &user.name)?;
        info!("{} claimed donation {}", user.name, donation_id);
        let success_message = format!(
            "You have successfully claimed \"{}\". The donor has been notified.",
            donation.title
        );

        Ok(ClaimDonationResponse {
            donation: DonationMapper::to_dto(donation),
            success_message,
        })
    }

    /// Move a donation claimed by this NGO to its next status
    pub fn advance_donation(
        &self,
        user: &SessionUser,
        donation_id: &str,
    ) -> Result<shared::Donation, DashboardError> {
        Self::require_role(user, UserRole::Ngo)?;

        let current = self
            .donation_service
            .get(donation_id)?
            .ok_or_else(|| StoreError::NotFound(donation_id.to_string()))?;

        // Available donations go through claim_donation
        let next = match current.status {
            DonationStatus::Claimed => DonationStatus::InTransit,
            DonationStatus::InTransit => DonationStatus::Completed,
            other => {
                let stuck = TransitionError::InvalidTransition {
                    from: other,
                    to: other.next().unwrap_or(other),
                };
                return Err(StoreError::from(stuck).into());
            }
        };

        let donation = self
            .donation_service
            .update_status(donation_id, next, Some(&user.name))?;
        Ok(DonationMapper::to_dto(donation))
    }
}
