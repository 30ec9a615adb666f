//! JSON file storage under one data directory.
//!
//! # Responsibility
//! - Read `data.json` (active) and `trash.json` (trash) at startup.
//! - Rewrite both files after each mutation via temp file + rename.
//!
//! # Invariants
//! - A reader never observes a half-written file.
//! - Unreadable files degrade to the empty default instead of failing.

use super::{ScheduleStorage, StorageError, StorageResult};
use crate::model::activity::Collection;
use crate::store::activity_store::ActivityStore;
use log::{error, info, warn};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

pub const ACTIVE_FILE_NAME: &str = "data.json";
pub const TRASH_FILE_NAME: &str = "trash.json";

/// File-backed storage rooted at `data_dir`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    data_dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn active_path(&self) -> PathBuf {
        self.data_dir.join(ACTIVE_FILE_NAME)
    }

    pub fn trash_path(&self) -> PathBuf {
        self.data_dir.join(TRASH_FILE_NAME)
    }
}

impl ScheduleStorage for JsonFileStorage {
    fn load(&self) -> StorageResult<ActivityStore> {
        let started_at = Instant::now();
        let active = read_collection(&self.active_path());
        let trash = read_collection(&self.trash_path());
        let store = ActivityStore::from_collections(active, trash);

        info!(
            "event=storage_load module=storage status=ok active={} trash={} next_id={} duration_ms={}",
            store.active_len(),
            store.trash_len(),
            store.next_id(),
            started_at.elapsed().as_millis()
        );
        Ok(store)
    }

    fn save(&self, store: &ActivityStore) -> StorageResult<()> {
        let started_at = Instant::now();
        let (active, trash) = store.collections();

        let result = fs::create_dir_all(&self.data_dir)
            .map_err(|source| StorageError::Io {
                path: self.data_dir.clone(),
                source,
            })
            .and_then(|()| write_collection(&self.active_path(), active))
            .and_then(|()| write_collection(&self.trash_path(), trash));

        match &result {
            Ok(()) => info!(
                "event=storage_save module=storage status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=storage_save module=storage status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

fn read_collection(path: &Path) -> Collection {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Collection::default(),
        Err(err) => {
            warn!(
                "event=storage_read module=storage status=fallback path={} error_code=read_failed error={}",
                path.display(),
                err
            );
            return Collection::default();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(collection) => collection,
        Err(err) => {
            warn!(
                "event=storage_read module=storage status=fallback path={} error_code=parse_failed error={}",
                path.display(),
                err
            );
            Collection::default()
        }
    }
}

fn write_collection(path: &Path, collection: &Collection) -> StorageResult<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let io_err = |source: std::io::Error| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };

    let temp = NamedTempFile::new_in(dir).map_err(io_err)?;
    let mut writer = BufWriter::new(temp);
    serde_json::to_writer_pretty(&mut writer, collection).map_err(|source| {
        StorageError::Encode {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.write_all(b"\n").map_err(io_err)?;
    let temp = writer.into_inner().map_err(|err| io_err(err.into_error()))?;
    temp.as_file().sync_all().map_err(io_err)?;
    temp.persist(path).map_err(|err| io_err(err.error))?;
    Ok(())
}
