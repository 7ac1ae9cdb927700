//! Catalogue persistence entry points.
//!
//! # Responsibility
//! - Save a catalogue as one JSON snapshot file.
//! - Rebuild a catalogue from a snapshot, falling back to an empty one.
//!
//! # Invariants
//! - Snapshots store summaries only; every index is rebuilt on load.
//! - A failed save never leaves a partially written target file.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod snapshot;

pub use snapshot::{load_snapshot, save_snapshot, try_load_snapshot, SNAPSHOT_FORMAT_VERSION};

pub type SnapshotResult<T> = Result<T, SnapshotError>;

#[derive(Debug)]
pub enum SnapshotError {
    /// Filesystem failure while reading, writing or renaming.
    Io(std::io::Error),
    /// Catalogue could not be serialized.
    Encode(serde_json::Error),
    /// File content is not a valid snapshot document.
    Decode(serde_json::Error),
    /// Document parsed but describes an impossible catalogue.
    Validation(String),
}

impl SnapshotError {
    /// True when the snapshot file simply does not exist yet.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Self::Io(err) if err.kind() == std::io::ErrorKind::NotFound)
    }
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "snapshot io failed: {err}"),
            Self::Encode(err) => write!(f, "snapshot encode failed: {err}"),
            Self::Decode(err) => write!(f, "snapshot decode failed: {err}"),
            Self::Validation(details) => write!(f, "invalid snapshot: {details}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Encode(err) | Self::Decode(err) => Some(err),
            Self::Validation(_) => None,
        }
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
