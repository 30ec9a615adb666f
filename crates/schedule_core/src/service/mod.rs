//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations and storage flushes into use-case APIs.
//! - Keep the menu shell decoupled from storage details.

pub mod schedule_service;
