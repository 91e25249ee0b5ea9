pub mod donation;

pub use donation::{Donation, DonationDraft, DonationStatus, TransitionError};
