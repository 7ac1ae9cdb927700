//! Author entity stored in the sorted author index.
//!
//! # Invariants
//! - `name` is trimmed; identity is the name compared case-insensitively.
//! - `summaries` never holds the same [`SummaryId`] twice.

use crate::collections::linked_sequence::LinkedSequence;
use crate::collections::ordered_set::{compare_ignore_case, Comparator};
use crate::model::summary::SummaryId;
use std::cmp::Ordering;

/// One author and the summaries attributed to them, in insertion order.
#[derive(Debug, Clone)]
pub struct Author {
    name: String,
    summaries: LinkedSequence<SummaryId>,
}

impl Author {
    /// Creates an author with no linked summaries.
    pub fn new(name: &str) -> Self {
        Self {
            name: normalize_author_name(name).to_string(),
            summaries: LinkedSequence::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Back-references to this author's summaries, oldest first.
    pub fn summary_ids(&self) -> &LinkedSequence<SummaryId> {
        &self.summaries
    }

    pub fn summary_count(&self) -> usize {
        self.summaries.len()
    }

    /// Whether no summary references this author anymore.
    pub fn is_orphan(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Links `id` unless it is already linked. Returns whether it was added.
    pub(crate) fn link(&mut self, id: SummaryId) -> bool {
        self.summaries.append_unique(id)
    }

    pub(crate) fn unlink(&mut self, id: &SummaryId) -> bool {
        self.summaries.remove_first_matching(id)
    }
}

/// Orders authors by name, ignoring case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthorNameOrder;

impl Comparator<Author> for AuthorNameOrder {
    fn compare(&self, left: &Author, right: &Author) -> Ordering {
        compare_ignore_case(&left.name, &right.name)
    }
}

/// Canonical spelling used for author identity.
pub fn normalize_author_name(name: &str) -> &str {
    name.trim()
}
