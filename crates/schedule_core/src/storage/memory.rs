//! In-memory storage used by tests and embedders that persist elsewhere.

use super::{ScheduleStorage, StorageResult};
use crate::store::activity_store::ActivityStore;
use std::cell::{Cell, RefCell};

/// Keeps the most recently saved snapshot and counts saves.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    snapshot: RefCell<Option<ActivityStore>>,
    saves: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing snapshot, as if it had been saved before.
    pub fn with_snapshot(store: ActivityStore) -> Self {
        Self {
            snapshot: RefCell::new(Some(store)),
            saves: Cell::new(0),
        }
    }

    pub fn snapshot(&self) -> Option<ActivityStore> {
        self.snapshot.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl ScheduleStorage for MemoryStorage {
    fn load(&self) -> StorageResult<ActivityStore> {
        Ok(self.snapshot().unwrap_or_default())
    }

    fn save(&self, store: &ActivityStore) -> StorageResult<()> {
        *self.snapshot.borrow_mut() = Some(store.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
