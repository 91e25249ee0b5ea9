//! Donation store: the authoritative, persisted collection of donations.
//!
//! The service owns the in-memory collection and writes the complete
//! collection back through its repository after every mutation. Reads are
//! served from memory.
//!
//! ## Business Rules
//!
//! - New donations are always `Available` and are listed newest first
//! - Ids are random UUIDs and never reused within the collection
//! - Status moves one step at a time along
//!   `Draft -> Available -> Claimed -> In Transit -> Completed`
//! - Claiming records the claimant; later steps keep it
//! - A failed write leaves the in-memory collection untouched
//!
//! The store performs no input validation; see `intake` for that.

use log::{info, warn};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use super::clock::Clock;
use super::models::{Donation, DonationDraft, DonationStatus, TransitionError};
use super::sample_data::sample_donations;
use crate::storage::{DonationRepository, KeyValueStorage, RepositoryError, StorageError};

pub const DEFAULT_STORAGE_KEY: &str = "donations";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Donation not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("Failed to encode or decode donations: {0}")]
    Serialization(#[source] serde_json::Error),
    #[error("Failed to persist donations: {0}")]
    Persistence(#[source] StorageError),
    #[error("Donation store lock poisoned")]
    LockPoisoned,
}

impl From<RepositoryError> for StoreError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Storage(e) => StoreError::Persistence(e),
            RepositoryError::Serialization(e) => StoreError::Serialization(e),
        }
    }
}

/// How the store finds and initializes its collection
#[derive(Debug, Clone, PartialEq)]
pub struct StoreOptions {
    pub storage_key: String,
    /// Populate a never-written store with demo donations
    pub seed_sample_data: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed_sample_data: true,
        }
    }
}

/// The donation store. Clones share one collection.
pub struct DonationService<S> {
    repository: DonationRepository<S>,
    donations: Arc<Mutex<Vec<Donation>>>,
    clock: Arc<dyn Clock>,
}

impl<S> Clone for DonationService<S> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            donations: Arc::clone(&self.donations),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: KeyValueStorage> DonationService<S> {
    /// Load the persisted collection, seeding and persisting it on first use
    pub fn open(storage: Arc<S>, options: &StoreOptions, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let repository = DonationRepository::new(storage, &options.storage_key);

        let donations = match repository.load()? {
            Some(donations) => {
                info!(
                    "Opened donation store '{}' with {} donations",
                    repository.key(),
                    donations.len()
                );
                Self::warn_on_duplicate_ids(&donations);
                donations
            }
            None => {
                let initial = if options.seed_sample_data {
                    sample_donations()
                } else {
                    Vec::new()
                };
                repository.save(&initial)?;
                info!(
                    "Initialized donation store '{}' with {} sample donations",
                    repository.key(),
                    initial.len()
                );
                initial
            }
        };

        Ok(Self {
            repository,
            donations: Arc::new(Mutex::new(donations)),
            clock,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Donation>>, StoreError> {
        self.donations.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn warn_on_duplicate_ids(donations: &[Donation]) {
        let mut seen = HashSet::new();
        for donation in donations {
            if !seen.insert(donation.id.as_str()) {
                warn!("Duplicate donation id in stored data: {}", donation.id);
            }
        }
    }

    fn generate_unique_id(donations: &[Donation]) -> String {
        loop {
            let id = Donation::generate_id();
            if !donations.iter().any(|d| d.id == id) {
                return id;
            }
        }
    }

    /// List a new donation for `donor_name`
    pub fn create(&self, draft: DonationDraft, donor_name: &str) -> Result<Donation, StoreError> {
        let mut donations = self.lock()?;

        let id = Self::generate_unique_id(&donations);
        let donation = Donation::from_draft(id, draft, donor_name, self.clock.today());

        donations.insert(0, donation.clone());
        if let Err(e) = self.repository.save(&donations) {
            donations.remove(0);
            return Err(e.into());
        }

        info!("Created donation {} '{}' for {}", donation.id, donation.title, donor_name);
        Ok(donation)
    }

    /// Move a donation to `new_status`.
    ///
    /// `claimant` is required when claiming; for later steps `None` keeps the
    /// current claimant.
    pub fn update_status(
        &self,
        donation_id: &str,
        new_status: DonationStatus,
        claimant: Option<&str>,
    ) -> Result<Donation, StoreError> {
        let mut donations = self.lock()?;

        let index = donations
            .iter()
            .position(|d| d.id == donation_id)
            .ok_or_else(|| StoreError::NotFound(donation_id.to_string()))?;

        let updated = donations[index].transition_to(new_status, claimant)?;
        let previous = std::mem::replace(&mut donations[index], updated.clone());

        if let Err(e) = self.repository.save(&donations) {
            donations[index] = previous;
            return Err(e.into());
        }

        info!(
            "Donation {} moved from {} to {}",
            donation_id, previous.status, updated.status
        );
        Ok(updated)
    }

    /// Claim an available donation on behalf of `ngo_name`
    pub fn claim(&self, donation_id: &str, ngo_name: &str) -> Result<Donation, StoreError> {
        self.update_status(donation_id, DonationStatus::Claimed, Some(ngo_name))
    }

    pub fn get(&self, donation_id: &str) -> Result<Option<Donation>, StoreError> {
        Ok(self.lock()?.iter().find(|d| d.id == donation_id).cloned())
    }

    /// All donations, newest first
    pub fn list_all(&self) -> Result<Vec<Donation>, StoreError> {
        Ok(self.lock()?.clone())
    }

    pub fn list_by_donor(&self, donor_name: &str) -> Result<Vec<Donation>, StoreError> {
        self.filtered(|d| d.donor_name == donor_name)
    }

    pub fn list_available(&self) -> Result<Vec<Donation>, StoreError> {
        self.filtered(|d| d.status == DonationStatus::Available)
    }

    pub fn list_claimed_by(&self, ngo_name: &str) -> Result<Vec<Donation>, StoreError> {
        let ngo_name = ngo_name.trim();
        self.filtered(|d| d.claimed_by.as_deref() == Some(ngo_name))
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.lock()?.is_empty())
    }

    fn filtered<F>(&self, predicate: F) -> Result<Vec<Donation>, StoreError>
    where
        F: Fn(&Donation) -> bool,
    {
        Ok(self
            .lock()?
            .iter()
            .filter(|d| predicate(d))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;
    use shared::DonationCondition;
    use std::io;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn empty_options() -> StoreOptions {
        StoreOptions {
            seed_sample_data: false,
            ..StoreOptions::default()
        }
    }

    fn open_store(storage: MemoryStorage, options: &StoreOptions) -> DonationService<MemoryStorage> {
        DonationService::open(Arc::new(storage), options, Arc::new(FixedClock(today())))
            .expect("Failed to open store")
    }

    fn coat_draft(title: &str) -> DonationDraft {
        DonationDraft::new(title, "Warm and dry", DonationCondition::Good, "l")
    }

    /// Storage whose writes can be switched off to simulate a full disk
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_writes: AtomicBool,
    }

    impl KeyValueStorage for FlakyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StorageError::io(
                    "donations.json",
                    io::Error::new(io::ErrorKind::Other, "quota exceeded"),
                ));
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn test_open_seeds_and_persists_samples() {
        let storage = MemoryStorage::new();
        let store = open_store(storage.clone(), &StoreOptions::default());

        assert_eq!(store.len().unwrap(), 3);
        let raw = storage.get(DEFAULT_STORAGE_KEY).unwrap().expect("seed persisted");
        assert!(raw.contains("sample1"));
    }

    #[test]
    fn test_open_respects_stored_empty_collection() {
        let store = open_store(
            MemoryStorage::with_entry(DEFAULT_STORAGE_KEY, "[]"),
            &StoreOptions::default(),
        );
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_open_fails_on_corrupt_data() {
        let result = DonationService::open(
            Arc::new(MemoryStorage::with_entry(DEFAULT_STORAGE_KEY, "not json")),
            &StoreOptions::default(),
            Arc::new(FixedClock(today())),
        );
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_create_prepends_available_donation() {
        let store = open_store(MemoryStorage::new(), &empty_options());

        let first = store.create(coat_draft("First"), "Alice").unwrap();
        let second = store.create(coat_draft("Second"), "Alice").unwrap();

        assert_eq!(second.status, DonationStatus::Available);
        assert_eq!(second.created_at, today());
        assert_eq!(second.donor_name, "Alice");
        assert_ne!(first.id, second.id);

        let titles: Vec<String> = store.list_all().unwrap().into_iter().map(|d| d.title).collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[test]
    fn test_create_ignores_draft_content_for_status() {
        let store = open_store(MemoryStorage::new(), &empty_options());
        let mut draft = coat_draft("Worn shoes");
        draft.condition = DonationCondition::Poor;
        draft.quantity = "lots".to_string();

        let donation = store.create(draft, "Bob").unwrap();

        assert_eq!(donation.status, DonationStatus::Available);
        assert_eq!(donation.claimed_by, None);
    }

    #[test]
    fn test_ids_unique_across_many_creates() {
        let store = open_store(MemoryStorage::new(), &StoreOptions::default());
        for i in 0..50 {
            store.create(coat_draft(&format!("Item {}", i)), "Alice").unwrap();
        }

        let all = store.list_all().unwrap();
        let ids: HashSet<&str> = all.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), all.len());
    }

    #[test]
    fn test_list_by_donor_keeps_newest_first() {
        let store = open_store(MemoryStorage::new(), &empty_options());
        store.create(coat_draft("A1"), "Alice").unwrap();
        store.create(coat_draft("B1"), "Bob").unwrap();
        store.create(coat_draft("A2"), "Alice").unwrap();

        let alice: Vec<String> = store
            .list_by_donor("Alice")
            .unwrap()
            .into_iter()
            .map(|d| d.title)
            .collect();
        assert_eq!(alice, vec!["A2", "A1"]);
        assert!(store.list_by_donor("alice").unwrap().is_empty());
    }

    #[test]
    fn test_claim_removes_from_available() {
        let store = open_store(MemoryStorage::new(), &empty_options());
        let coat = store.create(coat_draft("Winter Coat"), "Alice").unwrap();

        let claimed = store.claim(&coat.id, "NGO-1").unwrap();

        assert_eq!(claimed.status, DonationStatus::Claimed);
        assert_eq!(claimed.claimed_by.as_deref(), Some("NGO-1"));
        assert!(store.list_available().unwrap().is_empty());
        assert_eq!(store.list_claimed_by("NGO-1").unwrap(), vec![claimed]);
    }

    #[test]
    fn test_update_unknown_id_is_not_found_and_changes_nothing() {
        let storage = MemoryStorage::new();
        let store = open_store(storage.clone(), &StoreOptions::default());
        let before = store.list_all().unwrap();
        let raw_before = storage.get(DEFAULT_STORAGE_KEY).unwrap();

        let result = store.update_status("missing", DonationStatus::Claimed, Some("NGO-1"));

        assert!(matches!(result, Err(StoreError::NotFound(id)) if id == "missing"));
        assert_eq!(store.list_all().unwrap(), before);
        assert_eq!(storage.get(DEFAULT_STORAGE_KEY).unwrap(), raw_before);
    }

    #[test]
    fn test_illegal_transition_is_rejected() {
        let store = open_store(MemoryStorage::new(), &empty_options());
        let coat = store.create(coat_draft("Winter Coat"), "Alice").unwrap();

        let result = store.update_status(&coat.id, DonationStatus::Completed, Some("NGO-1"));

        assert!(matches!(
            result,
            Err(StoreError::Transition(TransitionError::InvalidTransition { .. }))
        ));
        assert_eq!(store.get(&coat.id).unwrap().unwrap().status, DonationStatus::Available);
    }

    #[test]
    fn test_padded_claimant_matches_on_later_steps() {
        let store = open_store(MemoryStorage::new(), &empty_options());
        let coat = store.create(coat_draft("Winter Coat"), "Alice").unwrap();

        store.claim(&coat.id, " NGO-1 ").unwrap();
        let moved = store
            .update_status(&coat.id, DonationStatus::InTransit, Some(" NGO-1 "))
            .unwrap();

        assert_eq!(moved.claimed_by.as_deref(), Some("NGO-1"));
        assert_eq!(store.list_claimed_by(" NGO-1 ").unwrap(), vec![moved]);
    }

    #[test]
    fn test_full_lifecycle_keeps_claimant() {
        let store = open_store(MemoryStorage::new(), &empty_options());
        let coat = store.create(coat_draft("Winter Coat"), "Alice").unwrap();

        store.claim(&coat.id, "NGO-1").unwrap();
        store.update_status(&coat.id, DonationStatus::InTransit, None).unwrap();
        let done = store
            .update_status(&coat.id, DonationStatus::Completed, Some("NGO-1"))
            .unwrap();

        assert_eq!(done.status, DonationStatus::Completed);
        assert_eq!(done.claimed_by.as_deref(), Some("NGO-1"));
        assert!(matches!(
            store.update_status(&coat.id, DonationStatus::Available, None),
            Err(StoreError::Transition(_))
        ));
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let storage = Arc::new(FlakyStorage::default());
        let store = DonationService::open(
            Arc::clone(&storage),
            &empty_options(),
            Arc::new(FixedClock(today())),
        )
        .unwrap();
        let coat = store.create(coat_draft("Winter Coat"), "Alice").unwrap();

        storage.fail_writes.store(true, Ordering::SeqCst);

        assert!(matches!(
            store.create(coat_draft("Boots"), "Alice"),
            Err(StoreError::Persistence(_))
        ));
        assert!(matches!(
            store.claim(&coat.id, "NGO-1"),
            Err(StoreError::Persistence(_))
        ));

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, DonationStatus::Available);
        assert_eq!(all[0].claimed_by, None);
    }

    #[test]
    fn test_clones_share_collection() {
        let donor_view = open_store(MemoryStorage::new(), &empty_options());
        let ngo_view = donor_view.clone();

        let coat = donor_view.create(coat_draft("Winter Coat"), "Alice").unwrap();

        assert_eq!(ngo_view.list_available().unwrap().len(), 1);
        ngo_view.claim(&coat.id, "NGO-1").unwrap();
        assert!(donor_view.list_available().unwrap().is_empty());
    }

    #[test]
    fn test_reopen_round_trips_collection() {
        let storage = MemoryStorage::new();
        let store = open_store(storage.clone(), &StoreOptions::default());
        let coat = store.create(coat_draft("Winter Coat"), "Alice").unwrap();
        store.claim(&coat.id, "NGO-1").unwrap();

        let reopened = open_store(storage, &StoreOptions::default());

        assert_eq!(reopened.list_all().unwrap(), store.list_all().unwrap());
    }
}
