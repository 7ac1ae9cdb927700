//! Catalogue configuration.
//!
//! # Responsibility
//! - Hold index capacities and the snapshot file name in one value.
//! - Provide defaults so callers only override what they need.
//!
//! # Invariants
//! - Bucket counts are fixed for the lifetime of a catalogue; tables never grow.
//! - A bucket count of `0` is treated as `1` by the hash tables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default bucket count for the title table (prime).
pub const DEFAULT_TITLE_BUCKETS: usize = 101;
/// Default bucket count for the keyword table (prime).
pub const DEFAULT_KEYWORD_BUCKETS: usize = 251;
/// Default snapshot file name inside the data directory.
pub const DEFAULT_SNAPSHOT_FILE: &str = "catalog_snapshot.json";

/// Construction-time settings for a catalogue and its snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Buckets in the title -> summary table.
    pub title_buckets: usize,
    /// Buckets in the keyword -> summaries table.
    pub keyword_buckets: usize,
    /// Snapshot file name, resolved against a data directory.
    pub snapshot_file: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            title_buckets: DEFAULT_TITLE_BUCKETS,
            keyword_buckets: DEFAULT_KEYWORD_BUCKETS,
            snapshot_file: DEFAULT_SNAPSHOT_FILE.to_string(),
        }
    }
}

impl CatalogConfig {
    /// Full snapshot path inside `data_dir`.
    pub fn snapshot_path(&self, data_dir: impl AsRef<Path>) -> PathBuf {
        data_dir.as_ref().join(&self.snapshot_file)
    }
}

#[cfg(test)]
mod tests {
    use super::CatalogConfig;
    use std::path::Path;

    #[test]
    fn defaults_use_prime_capacities() {
        let config = CatalogConfig::default();
        assert_eq!(config.title_buckets, 101);
        assert_eq!(config.keyword_buckets, 251);
        assert_eq!(
            config.snapshot_path("/data"),
            Path::new("/data").join("catalog_snapshot.json")
        );
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: CatalogConfig = serde_json::from_str(r#"{"title_buckets": 7}"#).unwrap();
        assert_eq!(config.title_buckets, 7);
        assert_eq!(config.keyword_buckets, 251);
        assert_eq!(config.snapshot_file, "catalog_snapshot.json");
    }
}
