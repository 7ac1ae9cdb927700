//! Core data structures and catalogue logic for the summary catalogue.
//! This crate is the single source of truth for index invariants.

pub mod catalog;
pub mod collections;
pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use catalog::index::{CatalogError, CatalogIndex, CatalogResult};
pub use catalog::render::{format_details, keyword_listing, preview_text};
pub use collections::{
    CaseInsensitive, Comparator, HashIndex, IndexOutOfRange, LinkedSequence, NaturalOrder,
    OrderedSet,
};
pub use config::CatalogConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::author::Author;
pub use model::summary::{Summary, SummaryId, SummaryValidationError};
pub use service::catalog_service::{AuthorListing, CatalogService, SummaryPreview};
pub use store::{load_snapshot, save_snapshot, try_load_snapshot, SnapshotError, SnapshotResult};
