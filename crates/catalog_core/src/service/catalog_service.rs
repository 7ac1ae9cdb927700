//! Thread-safe catalogue facade.
//!
//! # Responsibility
//! - Serialize every catalogue call behind one coarse-grained lock.
//! - Own the snapshot location and expose load/save.
//! - Hand out owned projections, since borrows cannot outlive the lock.
//!
//! # Invariants
//! - Each public call takes the lock exactly once.
//! - A poisoned lock is recovered; mutations never panic halfway through.

use crate::catalog::index::{CatalogIndex, CatalogResult};
use crate::catalog::render::preview_text;
use crate::config::CatalogConfig;
use crate::model::author::Author;
use crate::model::summary::Summary;
use crate::store::{load_snapshot, save_snapshot, SnapshotResult};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Owned view of one author and their summary titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorListing {
    pub name: String,
    /// Titles in the order they were attributed to this author.
    pub titles: Vec<String>,
}

impl From<&Author> for AuthorListing {
    fn from(author: &Author) -> Self {
        Self {
            name: author.name().to_string(),
            titles: author
                .summary_ids()
                .iter()
                .map(|id| id.as_str().to_string())
                .collect(),
        }
    }
}

/// Title plus a one-line body preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPreview {
    pub title: String,
    /// `None` when the body is blank.
    pub preview: Option<String>,
}

/// Catalogue shared across threads, bound to one snapshot file.
pub struct CatalogService {
    catalog: Mutex<CatalogIndex>,
    config: CatalogConfig,
    snapshot_path: PathBuf,
}

impl CatalogService {
    /// Loads the snapshot in `data_dir`, or starts empty when there is none.
    pub fn open(config: CatalogConfig, data_dir: impl AsRef<Path>) -> Self {
        let snapshot_path = config.snapshot_path(data_dir);
        let catalog = load_snapshot(&snapshot_path, &config);
        Self {
            catalog: Mutex::new(catalog),
            config,
            snapshot_path,
        }
    }

    /// Writes the current catalogue to the snapshot file.
    pub fn save(&self) -> SnapshotResult<()> {
        let catalog = self.lock();
        save_snapshot(&catalog, &self.snapshot_path)
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Adds `summary`; `false` when its title is already catalogued.
    pub fn add_summary(&self, summary: Summary) -> bool {
        self.lock().add(summary)
    }

    /// Removes a summary and everything that only it referenced.
    pub fn remove_summary(&self, title: &str) -> bool {
        self.lock().remove(title)
    }

    pub fn summary(&self, title: &str) -> Option<Summary> {
        self.lock().find_by_title(title).cloned()
    }

    pub fn summaries_by_author(&self, name: &str) -> Option<Vec<Summary>> {
        self.lock()
            .find_by_author(name)
            .map(|found| found.into_iter().cloned().collect())
    }

    pub fn summaries_by_keyword(&self, word: &str) -> Option<Vec<Summary>> {
        self.lock()
            .find_by_keyword(word)
            .map(|found| found.into_iter().cloned().collect())
    }

    pub fn titles_sorted(&self) -> Vec<String> {
        self.lock()
            .list_titles_sorted()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn authors_sorted(&self) -> Vec<AuthorListing> {
        self.lock()
            .list_authors_sorted()
            .into_iter()
            .map(AuthorListing::from)
            .collect()
    }

    pub fn keywords_sorted(&self) -> Vec<String> {
        self.lock()
            .list_keywords_sorted()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn all_titles_unsorted(&self) -> Vec<String> {
        self.lock()
            .list_all_titles_unsorted()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Sorted titles with body previews.
    pub fn previews_sorted(&self) -> Vec<SummaryPreview> {
        let catalog = self.lock();
        catalog
            .list_titles_sorted()
            .into_iter()
            .filter_map(|title| catalog.find_by_title(title))
            .map(|summary| SummaryPreview {
                title: summary.title().to_string(),
                preview: preview_text(summary.body()),
            })
            .collect()
    }

    pub fn details(&self, title: &str) -> CatalogResult<String> {
        self.lock().format_details(title)
    }

    pub fn keyword_listing(&self) -> String {
        self.lock().keyword_listing()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Runs `read` against the catalogue while holding the lock.
    pub fn with_catalog<R>(&self, read: impl FnOnce(&CatalogIndex) -> R) -> R {
        read(&self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, CatalogIndex> {
        self.catalog.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
