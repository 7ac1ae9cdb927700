//! Domain model for the summary catalogue.
//!
//! # Responsibility
//! - Define the records the catalogue owns (`Summary`) and indexes (`Author`).
//! - Keep identity rules in one place: exact title for summaries,
//!   trimmed case-insensitive name for authors.
//!
//! # Invariants
//! - Secondary indexes refer to summaries only through `SummaryId`.

pub mod author;
pub mod summary;
