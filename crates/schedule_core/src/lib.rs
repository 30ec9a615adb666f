//! Core logic for the weekly schedule manager.
//! This crate owns every schedule invariant; front-ends only collect input.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod store;
pub mod validation;

pub use config::ScheduleConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::activity::{day_rank, Activity, ActivityId, Collection, Weekday};
pub use service::schedule_service::{ScheduleService, ServiceError, ServiceResult};
pub use storage::{JsonFileStorage, MemoryStorage, ScheduleStorage, StorageError, StorageResult};
pub use store::activity_store::{
    ActivityPatch, ActivityStore, Area, EditOutcome, StoreError, StoreResult,
};
pub use validation::{
    validate_day, validate_duration, validate_id, validate_nonempty_text, validate_status,
    validate_time, ValidationError, ValidationResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
