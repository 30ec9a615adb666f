//! In-memory schedule state and its use-case operations.
//!
//! # Responsibility
//! - Own the active/trash collections between load and save.
//! - Keep every mutation free of I/O; durability lives in `storage`.

pub mod activity_store;
