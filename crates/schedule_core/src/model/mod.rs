//! Weekly schedule domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep the persisted record shape in one place.
//!
//! # Invariants
//! - Every activity is identified by a counter-assigned `ActivityId`.
//! - Deletion moves records into trash; there is no hard delete.

pub mod activity;
