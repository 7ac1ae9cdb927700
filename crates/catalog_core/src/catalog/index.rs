//! Catalogue orchestration over the title, author and keyword indexes.
//!
//! # Responsibility
//! - Own every summary (title table) and keep four secondary indexes in sync.
//! - Expose exact-match lookups and sorted listings.
//!
//! # Invariants
//! - `add` mutates nothing when the title already exists.
//! - `remove` cascades to every index and purges orphan authors and keywords.
//! - Secondary indexes hold `SummaryId`s that always resolve in the title table.
//! - The sorted title set mirrors the title table's key set.

use crate::catalog::render;
use crate::collections::{HashIndex, LinkedSequence, OrderedSet};
use crate::config::CatalogConfig;
use crate::model::author::{Author, AuthorNameOrder};
use crate::model::summary::{Summary, SummaryId};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalogue-level lookup failures that callers render as messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No summary carries this exact title.
    SummaryNotFound(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SummaryNotFound(title) => write!(f, "summary not found: `{title}`"),
        }
    }
}

impl Error for CatalogError {}

struct CatalogEntry {
    /// Monotonic insertion counter; snapshots replay in this order.
    sequence: u64,
    summary: Summary,
}

/// In-memory catalogue with title, author and keyword indexes.
pub struct CatalogIndex {
    titles: HashIndex<String, CatalogEntry>,
    sorted_titles: OrderedSet<String>,
    authors: OrderedSet<Author, AuthorNameOrder>,
    keyword_refs: HashIndex<String, LinkedSequence<SummaryId>>,
    sorted_keywords: OrderedSet<String>,
    next_sequence: u64,
}

impl CatalogIndex {
    /// Creates an empty catalogue sized by `config`.
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            titles: HashIndex::with_buckets(config.title_buckets),
            sorted_titles: OrderedSet::new(),
            authors: OrderedSet::with_comparator(AuthorNameOrder),
            keyword_refs: HashIndex::with_buckets(config.keyword_buckets),
            sorted_keywords: OrderedSet::new(),
            next_sequence: 0,
        }
    }

    /// Adds `summary` to every index.
    ///
    /// Returns `false` without touching any index when the title exists.
    pub fn add(&mut self, summary: Summary) -> bool {
        if self.titles.contains_key(summary.title()) {
            debug!("event=catalog_add module=catalog status=skipped reason=duplicate_title");
            return false;
        }

        let id = summary.id();
        self.sorted_titles.insert(summary.title().to_string());
        for name in summary.authors() {
            self.link_author(name, &id);
        }
        for keyword in summary.keywords() {
            self.link_keyword(keyword, &id);
        }

        debug!(
            "event=catalog_add module=catalog status=ok authors={} keywords={} size={}",
            summary.authors().len(),
            summary.keywords().len(),
            self.titles.len() + 1
        );

        let entry = CatalogEntry {
            sequence: self.next_sequence,
            summary,
        };
        self.next_sequence += 1;
        self.titles.insert(id.as_str().to_string(), entry)
    }

    /// Removes the summary titled `title` from every index.
    ///
    /// Authors and keywords left without summaries are deleted as well.
    /// Returns `false` when no such summary exists.
    pub fn remove(&mut self, title: &str) -> bool {
        let Some(entry) = self.titles.remove(title) else {
            debug!("event=catalog_remove module=catalog status=skipped reason=not_found");
            return false;
        };

        let summary = entry.summary;
        let id = summary.id();
        self.sorted_titles.remove(&summary.title().to_string());
        for name in summary.authors() {
            self.unlink_author(name, &id);
        }
        for keyword in summary.keywords() {
            self.unlink_keyword(keyword, &id);
        }

        debug!(
            "event=catalog_remove module=catalog status=ok size={} authors={} keywords={}",
            self.titles.len(),
            self.authors.len(),
            self.sorted_keywords.len()
        );
        true
    }

    pub fn find_by_title(&self, title: &str) -> Option<&Summary> {
        self.titles.lookup(title).map(|entry| &entry.summary)
    }

    /// Finds an author by trimmed, case-insensitive name.
    pub fn find_author(&self, name: &str) -> Option<&Author> {
        self.authors.find(&Author::new(name))
    }

    /// Summaries by `name` in the order they were added.
    pub fn find_by_author(&self, name: &str) -> Option<LinkedSequence<&Summary>> {
        let author = self.find_author(name)?;
        Some(self.resolve(author.summary_ids()))
    }

    /// Summaries tagged with `word` (exact match) in the order they were added.
    pub fn find_by_keyword(&self, word: &str) -> Option<LinkedSequence<&Summary>> {
        let refs = self.keyword_refs.lookup(word)?;
        Some(self.resolve(refs))
    }

    pub fn list_titles_sorted(&self) -> LinkedSequence<&str> {
        self.sorted_titles.iter().map(String::as_str).collect()
    }

    pub fn list_authors_sorted(&self) -> LinkedSequence<&Author> {
        self.authors.in_order()
    }

    pub fn list_keywords_sorted(&self) -> LinkedSequence<&str> {
        self.sorted_keywords.iter().map(String::as_str).collect()
    }

    /// Titles straight from the title table; order is unspecified.
    pub fn list_all_titles_unsorted(&self) -> LinkedSequence<&str> {
        self.titles
            .all_keys()
            .into_iter()
            .map(String::as_str)
            .collect()
    }

    /// Human-readable rendering of one summary.
    ///
    /// # Errors
    /// - [`CatalogError::SummaryNotFound`] when `title` is unknown.
    pub fn format_details(&self, title: &str) -> CatalogResult<String> {
        self.find_by_title(title)
            .map(render::format_details)
            .ok_or_else(|| CatalogError::SummaryNotFound(title.to_string()))
    }

    /// Bulleted report of every registered keyword, sorted.
    pub fn keyword_listing(&self) -> String {
        render::keyword_listing(self.sorted_keywords.iter().map(String::as_str))
    }

    /// Every summary, oldest first.
    pub fn summaries_in_insertion_order(&self) -> Vec<&Summary> {
        let mut entries: Vec<&CatalogEntry> = self.titles.iter().map(|(_, entry)| entry).collect();
        entries.sort_by_key(|entry| entry.sequence);
        entries.into_iter().map(|entry| &entry.summary).collect()
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    pub fn keyword_count(&self) -> usize {
        self.sorted_keywords.len()
    }

    pub fn title_bucket_count(&self) -> usize {
        self.titles.bucket_count()
    }

    pub fn keyword_bucket_count(&self) -> usize {
        self.keyword_refs.bucket_count()
    }

    /// Cross-checks every index against the title table.
    ///
    /// Intended for tests and diagnostics; walks the whole catalogue.
    pub fn is_consistent(&self) -> bool {
        let mut table_titles: Vec<&str> = self.list_all_titles_unsorted().into_iter().collect();
        table_titles.sort_unstable();
        let sorted_titles: Vec<&str> = self.list_titles_sorted().into_iter().collect();
        if table_titles != sorted_titles {
            return false;
        }

        if !(self.sorted_titles.is_balanced()
            && self.authors.is_balanced()
            && self.sorted_keywords.is_balanced())
        {
            return false;
        }

        let forward_links_ok = self.titles.iter().all(|(_, entry)| {
            let id = entry.summary.id();
            let authors_ok = entry.summary.authors().iter().all(|name| {
                self.find_author(name)
                    .is_some_and(|author| author.summary_ids().contains(&id))
            });
            let keywords_ok = entry.summary.keywords().iter().all(|keyword| {
                self.sorted_keywords.contains(keyword)
                    && self
                        .keyword_refs
                        .lookup(keyword.as_str())
                        .is_some_and(|refs| refs.contains(&id))
            });
            authors_ok && keywords_ok
        });

        let authors_ok = self.authors.iter().all(|author| {
            !author.is_orphan() && self.all_resolve(author.summary_ids())
        });
        let keywords_ok = self.keyword_refs.iter().all(|(keyword, refs)| {
            !refs.is_empty() && self.sorted_keywords.contains(keyword) && self.all_resolve(refs)
        });

        forward_links_ok
            && authors_ok
            && keywords_ok
            && self.keyword_refs.len() == self.sorted_keywords.len()
    }

    fn link_author(&mut self, name: &str, id: &SummaryId) {
        let mut target = Author::new(name);
        if let Some(existing) = self.authors.find_mut(&target) {
            existing.link(id.clone());
            return;
        }
        target.link(id.clone());
        self.authors.insert(target);
    }

    fn link_keyword(&mut self, keyword: &str, id: &SummaryId) {
        self.sorted_keywords.insert(keyword.to_string());

        match self.keyword_refs.lookup_mut(keyword) {
            Some(refs) => {
                refs.append_unique(id.clone());
            }
            None => {
                let mut refs = LinkedSequence::new();
                refs.append(id.clone());
                self.keyword_refs.insert(keyword.to_string(), refs);
            }
        }
    }

    fn unlink_author(&mut self, name: &str, id: &SummaryId) {
        let target = Author::new(name);
        let orphaned = match self.authors.find_mut(&target) {
            Some(author) => {
                author.unlink(id);
                author.is_orphan()
            }
            None => false,
        };
        if orphaned {
            self.authors.remove(&target);
        }
    }

    fn unlink_keyword(&mut self, keyword: &str, id: &SummaryId) {
        let orphaned = match self.keyword_refs.lookup_mut(keyword) {
            Some(refs) => {
                refs.remove_first_matching(id);
                refs.is_empty()
            }
            None => false,
        };
        if orphaned {
            self.keyword_refs.remove(keyword);
            self.sorted_keywords.remove(&keyword.to_string());
        }
    }

    fn resolve<'a>(&'a self, ids: &'a LinkedSequence<SummaryId>) -> LinkedSequence<&'a Summary> {
        ids.iter()
            .filter_map(|id| self.find_by_title(id.as_str()))
            .collect()
    }

    fn all_resolve(&self, ids: &LinkedSequence<SummaryId>) -> bool {
        ids.iter().all(|id| self.titles.contains_key(id.as_str()))
    }
}

impl Default for CatalogIndex {
    fn default() -> Self {
        Self::new(&CatalogConfig::default())
    }
}
