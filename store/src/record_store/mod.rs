// Record store: categories and bills persisted as two whole collections in a
// key-value backend. Every call re-reads the collection it touches, mutates an
// in-memory copy and writes the full collection back. Nothing is cached between
// calls and nothing is locked; one synchronous caller is assumed.
use crate::error::StoreError;
use crate::storage::KeyValueStorage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::models::{Bill, BillDraft, Category, CategoryKind, NewCategory};
use std::collections::HashSet;
use tracing::{debug, info, warn};

pub mod clock;
pub mod defaults;

pub use clock::{Clock, SystemClock};
pub use defaults::default_categories;

pub const CATEGORIES_KEY: &str = "categories";
pub const BILLS_KEY: &str = "bills";

pub struct RecordStore<S, C = SystemClock> {
    storage: S,
    clock: C,
}

impl<S: KeyValueStorage> RecordStore<S, SystemClock> {
    /// Wraps `storage` and seeds any missing collection.
    pub fn open(storage: S) -> Result<Self, StoreError> {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S: KeyValueStorage, C: Clock> RecordStore<S, C> {
    pub fn with_clock(storage: S, clock: C) -> Result<Self, StoreError> {
        let mut store = RecordStore { storage, clock };
        store.initialize()?;
        Ok(store)
    }

    /// Writes the default categories and an empty bill list for whichever key is
    /// absent. Keys already present are left alone, so repeated calls are no-ops.
    pub fn initialize(&mut self) -> Result<(), StoreError> {
        match self.storage.get(CATEGORIES_KEY)? {
            None => {
                let categories = default_categories();
                info!(count = categories.len(), "Seeding default categories");
                self.write_collection(CATEGORIES_KEY, &categories)?;
            }
            Some(stored) => {
                let duplicates = duplicate_ids(&stored);
                if !duplicates.is_empty() {
                    // Left as-is: bills may already reference these ids.
                    warn!(ids = ?duplicates, "Stored categories share ids");
                }
            }
        }

        if self.storage.get(BILLS_KEY)?.is_none() {
            info!("Creating empty bill collection");
            self.write_collection::<Bill>(BILLS_KEY, &[])?;
        }
        Ok(())
    }

    /// Stamps the draft with an id and creation time (the same value), puts it
    /// at the front of the bill list and returns the stored bill.
    pub fn add_bill(&mut self, draft: BillDraft) -> Result<Bill, StoreError> {
        let mut bills = self.get_bills()?;
        let stamp = self.next_id(bills.iter().map(|b| b.id));
        let bill = Bill {
            id: stamp,
            create_time: stamp,
            details: draft,
        };
        bills.insert(0, bill.clone());
        self.write_collection(BILLS_KEY, &bills)?;
        debug!(id = bill.id, total = bills.len(), "Added bill");
        Ok(bill)
    }

    /// All bills, newest first. Empty when nothing was ever stored.
    pub fn get_bills(&self) -> Result<Vec<Bill>, StoreError> {
        self.read_collection(BILLS_KEY)
    }

    pub fn get_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.read_collection(CATEGORIES_KEY)
    }

    pub fn get_categories_of(&self, kind: CategoryKind) -> Result<Vec<Category>, StoreError> {
        let mut categories = self.get_categories()?;
        categories.retain(|c| c.kind == kind);
        Ok(categories)
    }

    pub fn add_category(&mut self, category: NewCategory) -> Result<Category, StoreError> {
        let mut categories = self.get_categories()?;
        let id = self.next_id(categories.iter().map(|c| c.id));
        let category = category.into_category(id);
        categories.push(category.clone());
        self.write_collection(CATEGORIES_KEY, &categories)?;
        debug!(id, name = %category.name, kind = %category.kind, "Added category");
        Ok(category)
    }

    /// Replaces the first category with the same id, keeping its position.
    /// Returns `false` (and writes nothing) when no category has that id.
    pub fn update_category(&mut self, category: Category) -> Result<bool, StoreError> {
        let mut categories = self.get_categories()?;
        let Some(index) = categories.iter().position(|c| c.id == category.id) else {
            debug!(id = category.id, "No category to update");
            return Ok(false);
        };
        debug!(id = category.id, index, "Updated category");
        categories[index] = category;
        self.write_collection(CATEGORIES_KEY, &categories)?;
        Ok(true)
    }

    /// Removes every category with `id` and returns how many were removed.
    /// The collection is written back even when nothing matched.
    pub fn delete_category(&mut self, id: i64) -> Result<usize, StoreError> {
        let mut categories = self.get_categories()?;
        let before = categories.len();
        categories.retain(|c| c.id != id);
        self.write_collection(CATEGORIES_KEY, &categories)?;
        let removed = before - categories.len();
        debug!(id, removed, "Deleted category");
        Ok(removed)
    }

    /// Removes every bill with `id` and returns how many were removed.
    pub fn delete_bill(&mut self, id: i64) -> Result<usize, StoreError> {
        let mut bills = self.get_bills()?;
        let before = bills.len();
        bills.retain(|b| b.id != id);
        self.write_collection(BILLS_KEY, &bills)?;
        let removed = before - bills.len();
        debug!(id, removed, "Deleted bill");
        Ok(removed)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // Current time, bumped past the largest id already in the collection so
    // two records created within the same millisecond never share an id.
    fn next_id(&self, existing: impl Iterator<Item = i64>) -> i64 {
        let now = self.clock.now_millis();
        match existing.max() {
            Some(max) if max >= now => max.saturating_add(1),
            _ => now,
        }
    }

    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        match self.storage.get(key)? {
            None => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value).map_err(|source| StoreError::MalformedCollection {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write_collection<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<(), StoreError> {
        let value = serde_json::to_value(items)?;
        self.storage.set(key, value)
    }
}

// Ids that appear more than once in the raw stored category list. Records that
// do not parse are skipped; this only feeds a warning.
fn duplicate_ids(stored: &Value) -> Vec<i64> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<i64> = stored
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|c| c.get("id")?.as_i64())
        .filter(|id| !seen.insert(*id))
        .collect();
    duplicates.sort_unstable();
    duplicates.dedup();
    duplicates
}
