//! Catalogue orchestration and presentation.
//!
//! # Responsibility
//! - Keep the title, author and keyword indexes consistent ([`index`]).
//! - Render records and listings for display ([`render`]).
//!
//! # Invariants
//! - The title table is the only owner of `Summary` values.

pub mod index;
pub mod render;
