//! # Donation Matcher Backend
//!
//! Storage, donation lifecycle and dashboard services for the donation
//! matcher. Everything is synchronous; a frontend embeds `Backend` and calls
//! the services directly.

use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use std::sync::Arc;

pub mod config;
pub mod domain;
pub mod io;
pub mod logging;
pub mod storage;

pub use config::{AppConfig, ConfigRepository};
pub use storage::{DataConnection, JsonFileStorage};

use domain::{Clock, DashboardService, DonationService, SessionService, SystemClock};

/// Main backend struct that orchestrates all services
pub struct Backend {
    pub config: AppConfig,
    pub donation_service: DonationService<JsonFileStorage>,
    pub dashboard_service: DashboardService<JsonFileStorage>,
    pub session_service: SessionService,
}

impl Backend {
    /// Open the backend rooted at `data_dir`
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let connection = DataConnection::new(data_dir)?;
        Self::with_connection(connection, Arc::new(SystemClock))
    }

    /// Open the backend in the default data directory
    pub fn new_default() -> Result<Self> {
        Self::with_connection(DataConnection::new_default()?, Arc::new(SystemClock))
    }

    pub fn with_connection(connection: DataConnection, clock: Arc<dyn Clock>) -> Result<Self> {
        let config = ConfigRepository::new(connection.base_directory()).load_or_create()?;
        logging::init_logging(&config.log_level);
        info!("Opening donation store in {}", connection.base_directory().display());

        let storage = Arc::new(JsonFileStorage::new(connection));
        let donation_service = DonationService::open(storage, &config.store_options(), clock.clone())
            .context("Failed to open donation store")?;
        let dashboard_service = DashboardService::new(donation_service.clone(), clock);

        Ok(Backend {
            config,
            donation_service,
            dashboard_service,
            session_service: SessionService::new(),
        })
    }
}
