use serde::{Deserialize, Serialize};
use std::fmt;

/// A clothing donation as presented to the donor and NGO views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub condition: DonationCondition,
    pub size: String,
    pub gender: Option<String>,
    /// Number of items, kept as entered (e.g. "3")
    pub quantity: String,
    pub category: Option<String>,
    pub pickup_address: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub available_times: Option<String>,
    pub status: DonationStatus,
    /// Name of the NGO that claimed the donation
    pub claimed_by: Option<String>,
    /// Creation day (YYYY-MM-DD)
    pub created_at: String,
    pub donor_name: String,
    /// Image previews as data URIs, in upload order
    pub image_preview_urls: Vec<String>,
}

/// Physical condition of the donated items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DonationCondition {
    Good,
    Acceptable,
    Poor,
}

impl DonationCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationCondition::Good => "Good",
            DonationCondition::Acceptable => "Acceptable",
            DonationCondition::Poor => "Poor",
        }
    }
}

impl fmt::Display for DonationCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a donation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DonationStatus {
    Draft,
    Available,
    Claimed,
    #[serde(rename = "In Transit")]
    InTransit,
    Completed,
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DonationStatus::Draft => "Draft",
            DonationStatus::Available => "Available",
            DonationStatus::Claimed => "Claimed",
            DonationStatus::InTransit => "In Transit",
            DonationStatus::Completed => "Completed",
        };
        f.write_str(label)
    }
}

/// Which dashboard a signed-in user sees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Donor,
    #[serde(rename = "NGO")]
    Ngo,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Donor => f.write_str("Donor"),
            UserRole::Ngo => f.write_str("NGO"),
        }
    }
}

/// The user of the current session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: String,
    pub role: UserRole,
}

/// Sign-in or registration form contents.
///
/// Authentication is mocked: the fields are checked for presence only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SignInRequest {
    pub role: Option<UserRole>,
    pub is_registration: bool,
    pub email: String,
    pub password: String,
    pub confirm_password: Option<String>,
    /// Donor display name
    pub full_name: Option<String>,
    /// NGO contact person, used as the NGO display name
    pub contact_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignInResponse {
    pub user: SessionUser,
    pub success_message: String,
}

/// An uploaded photo. Only the reported size and the preview are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUpload {
    pub file_name: String,
    pub size_bytes: u64,
    /// Data URI produced by the client
    pub preview_url: String,
}

/// Donation intake form contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CreateDonationRequest {
    pub title: String,
    pub description: String,
    pub condition: Option<DonationCondition>,
    pub size: String,
    pub gender: Option<String>,
    /// Defaults to "1" when left blank
    pub quantity: Option<String>,
    pub category: Option<String>,
    pub pickup_address: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub available_times: Option<String>,
    pub images: Vec<ImageUpload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDonationResponse {
    pub donation: Donation,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimDonationResponse {
    pub donation: Donation,
    pub success_message: String,
}

/// Browse filters on the NGO dashboard.
///
/// `None`, an empty string or `"all"` leave a selector unconstrained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DonationFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub size: Option<String>,
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DonorDashboardStats {
    pub total: usize,
    pub completed: usize,
    /// Claimed or in transit
    pub in_progress: usize,
    pub available: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorDashboardResponse {
    pub user: SessionUser,
    pub donations: Vec<Donation>,
    pub stats: DonorDashboardStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NgoDashboardStats {
    pub available: usize,
    pub claimed: usize,
    pub new_this_week: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NgoDashboardResponse {
    pub user: SessionUser,
    pub donations: Vec<Donation>,
    pub stats: NgoDashboardStats,
}
