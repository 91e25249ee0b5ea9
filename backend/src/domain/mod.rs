//! Domain layer: donation lifecycle, intake rules, browsing and dashboards.
//!
//! Services here depend on storage only through `KeyValueStorage`, so the
//! same code runs against JSON files or in-memory maps.

pub mod clock;
pub mod dashboard_service;
pub mod discovery;
pub mod donation_service;
pub mod intake;
pub mod models;
pub mod sample_data;
pub mod session;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dashboard_service::{DashboardError, DashboardService};
pub use donation_service::{DonationService, StoreError, StoreOptions, DEFAULT_STORAGE_KEY};
pub use intake::{validate_donation_request, ValidationError};
pub use session::{SessionError, SessionService};
