//! Durable storage for the active and trash collections.
//!
//! # Responsibility
//! - Define the load/save contract used by the service layer.
//! - Provide JSON file and in-memory implementations.
//!
//! # Invariants
//! - `save` replaces each collection as a whole; nothing is appended or patched.
//! - A missing collection loads as the empty default with counter = 1.
//! - The two collections are written one after the other, so a crash between
//!   the writes can leave them inconsistent with each other.

use crate::store::activity_store::ActivityStore;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_file;
mod memory;

pub use json_file::{JsonFileStorage, ACTIVE_FILE_NAME, TRASH_FILE_NAME};
pub use memory::MemoryStorage;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on `{}`: {source}", path.display()),
            Self::Encode { path, source } => {
                write!(f, "failed to encode `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode { source, .. } => Some(source),
        }
    }
}

/// Load/save boundary for schedule state.
pub trait ScheduleStorage {
    fn load(&self) -> StorageResult<ActivityStore>;
    fn save(&self, store: &ActivityStore) -> StorageResult<()>;
}

impl<S: ScheduleStorage + ?Sized> ScheduleStorage for &S {
    fn load(&self) -> StorageResult<ActivityStore> {
        (**self).load()
    }

    fn save(&self, store: &ActivityStore) -> StorageResult<()> {
        (**self).save(store)
    }
}
