//! # Donation Repository
//!
//! Stores the whole donation collection as a single JSON array under one key.
//!
//! ## Record Format
//!
//! ```json
//! [
//!   {
//!     "id": "5f0c9a4e-...",
//!     "title": "Winter Coat - Large",
//!     "description": "Warm winter coat, barely used.",
//!     "condition": "Good",
//!     "size": "l",
//!     "quantity": "1",
//!     "status": "In Transit",
//!     "claimedBy": "Helping Hands",
//!     "createdAt": "2024-01-15",
//!     "donorName": "John Smith",
//!     "imagePreviewUrls": []
//!   }
//! ]
//! ```
//!
//! Optional fields are left out when absent and accepted as missing or `null`
//! on read.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use shared::DonationCondition;
use std::sync::Arc;

use super::traits::{KeyValueStorage, StorageError};
use crate::domain::models::{Donation, DonationStatus};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Failed to encode or decode donations: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn default_quantity() -> String {
    "1".to_string()
}

/// Persisted shape of a donation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub condition: DonationCondition,
    pub size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_times: Option<String>,
    pub status: DonationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_by: Option<String>,
    pub created_at: NaiveDate,
    pub donor_name: String,
    #[serde(default)]
    pub image_preview_urls: Vec<String>,
}

impl From<Donation> for DonationRecord {
    fn from(donation: Donation) -> Self {
        DonationRecord {
            id: donation.id,
            title: donation.title,
            description: donation.description,
            condition: donation.condition,
            size: donation.size,
            gender: donation.gender,
            quantity: donation.quantity,
            category: donation.category,
            pickup_address: donation.pickup_address,
            phone: donation.phone,
            notes: donation.notes,
            available_times: donation.available_times,
            status: donation.status,
            claimed_by: donation.claimed_by,
            created_at: donation.created_at,
            donor_name: donation.donor_name,
            image_preview_urls: donation.image_preview_urls,
        }
    }
}

impl From<DonationRecord> for Donation {
    fn from(record: DonationRecord) -> Self {
        Donation {
            id: record.id,
            title: record.title,
            description: record.description,
            condition: record.condition,
            size: record.size,
            gender: record.gender,
            quantity: record.quantity,
            category: record.category,
            pickup_address: record.pickup_address,
            phone: record.phone,
            notes: record.notes,
            available_times: record.available_times,
            status: record.status,
            claimed_by: record.claimed_by,
            created_at: record.created_at,
            donor_name: record.donor_name,
            image_preview_urls: record.image_preview_urls,
        }
    }
}

/// Reads and writes the donation collection through a key-value backend
pub struct DonationRepository<S> {
    storage: Arc<S>,
    key: String,
}

impl<S> Clone for DonationRepository<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            key: self.key.clone(),
        }
    }
}

impl<S: KeyValueStorage> DonationRepository<S> {
    pub fn new(storage: Arc<S>, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored collection, `None` if it was never written
    pub fn load(&self) -> Result<Option<Vec<Donation>>, RepositoryError> {
        let Some(content) = self.storage.get(&self.key)? else {
            return Ok(None);
        };

        let records: Vec<DonationRecord> = serde_json::from_str(&content)?;
        debug!("Loaded {} donations from key '{}'", records.len(), self.key);
        Ok(Some(records.into_iter().map(Donation::from).collect()))
    }

    /// Replace the stored collection
    pub fn save(&self, donations: &[Donation]) -> Result<(), RepositoryError> {
        let records: Vec<DonationRecord> = donations
            .iter()
            .cloned()
            .map(DonationRecord::from)
            .collect();
        let content = serde_json::to_string(&records)?;

        self.storage.set(&self.key, &content)?;
        debug!("Saved {} donations under key '{}'", records.len(), self.key);
        Ok(())
    }
}
