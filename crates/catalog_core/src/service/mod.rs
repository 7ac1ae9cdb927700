//! Caller-facing catalogue services.
//!
//! # Responsibility
//! - Put a concurrency boundary around the single-threaded catalogue.
//! - Keep CLI callers decoupled from index and snapshot details.

pub mod catalog_service;
