//! Schedule use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for the menu shell.
//! - Pair every successful mutation with a full save of both collections.
//!
//! # Invariants
//! - Read-only calls never touch storage.
//! - A rejected operation is not saved and leaves state unchanged.
//! - Storage failures are surfaced unchanged; they are not recoverable here.

use crate::model::activity::{Activity, ActivityId};
use crate::storage::{ScheduleStorage, StorageError};
use crate::store::activity_store::{
    ActivityPatch, ActivityStore, EditOutcome, StoreError, StoreResult,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Rejected input or missing id; state is unchanged.
    Store(StoreError),
    /// Durable storage failed.
    Storage(StorageError),
}

impl ServiceError {
    /// Whether the menu can report this error and keep going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<StorageError> for ServiceError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Owns the in-memory store and the storage it is flushed to.
pub struct ScheduleService<S: ScheduleStorage> {
    storage: S,
    store: ActivityStore,
}

impl<S: ScheduleStorage> ScheduleService<S> {
    /// Loads persisted state and wraps it in a service.
    pub fn open(storage: S) -> ServiceResult<Self> {
        let store = storage.load()?;
        info!(
            "event=service_open module=service status=ok active={} trash={}",
            store.active_len(),
            store.trash_len()
        );
        Ok(Self { storage, store })
    }

    pub fn store(&self) -> &ActivityStore {
        &self.store
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn add(&mut self, day: &str, time: &str, title: &str) -> ServiceResult<Activity> {
        self.mutate(|store| store.add(day, time, title))
    }

    pub fn edit(&mut self, id: ActivityId, patch: &ActivityPatch) -> ServiceResult<EditOutcome> {
        self.mutate(|store| store.edit(id, patch))
    }

    pub fn delete(&mut self, id: ActivityId) -> ServiceResult<Activity> {
        self.mutate(|store| store.delete(id))
    }

    pub fn restore(&mut self, id: ActivityId) -> ServiceResult<Activity> {
        self.mutate(|store| store.restore(id))
    }

    pub fn mark_status(&mut self, id: ActivityId, token: &str) -> ServiceResult<Activity> {
        self.mutate(|store| store.mark_status(id, token))
    }

    pub fn set_duration(&mut self, id: ActivityId, value: &str) -> ServiceResult<Activity> {
        self.mutate(|store| store.set_duration(id, value))
    }

    pub fn find(&self, id: ActivityId) -> Option<&Activity> {
        self.store.find(id)
    }

    pub fn list_all(&self) -> Vec<&Activity> {
        self.store.list_all()
    }

    pub fn list_by_day(&self, day: &str) -> ServiceResult<Vec<&Activity>> {
        Ok(self.store.list_by_day(day)?)
    }

    pub fn list_trash(&self) -> Vec<&Activity> {
        self.store.list_trash()
    }

    /// Persists state one last time and hands the storage back.
    pub fn close(self) -> ServiceResult<S> {
        self.storage.save(&self.store)?;
        info!("event=service_close module=service status=ok");
        Ok(self.storage)
    }

    fn mutate<T>(
        &mut self,
        operation: impl FnOnce(&mut ActivityStore) -> StoreResult<T>,
    ) -> ServiceResult<T> {
        let value = operation(&mut self.store)?;
        self.storage.save(&self.store)?;
        Ok(value)
    }
}
