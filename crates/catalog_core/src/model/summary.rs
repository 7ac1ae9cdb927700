//! Summary domain model.
//!
//! # Responsibility
//! - Define the catalogue record and the identifier secondary indexes store.
//! - Validate records at construction and on deserialization.
//!
//! # Invariants
//! - `title` is never blank and never changes after construction.
//! - Author names and keywords are never blank.
//! - A `SummaryId` equals another only when the titles match exactly.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable handle for a summary held by secondary indexes.
///
/// Wraps the exact (case-sensitive) title; resolution goes through the
/// title index, so a handle to a removed summary simply resolves to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SummaryId(String);

impl SummaryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SummaryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SummaryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SummaryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Validation failures for [`Summary`] construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryValidationError {
    /// Title is empty or whitespace only.
    EmptyTitle,
    /// Author name at `index` is empty or whitespace only.
    BlankAuthor { index: usize },
    /// Keyword at `index` is empty or whitespace only.
    BlankKeyword { index: usize },
}

impl Display for SummaryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "summary title must not be blank"),
            Self::BlankAuthor { index } => write!(f, "author name at position {index} is blank"),
            Self::BlankKeyword { index } => write!(f, "keyword at position {index} is blank"),
        }
    }
}

impl Error for SummaryValidationError {}

/// Catalogue record: a titled text with its authors and keywords.
///
/// Immutable once built; the catalogue has no partial-update operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SummaryRecord")]
pub struct Summary {
    title: String,
    authors: Vec<String>,
    body: String,
    keywords: Vec<String>,
}

impl Summary {
    /// Builds a validated summary.
    ///
    /// # Errors
    /// - [`SummaryValidationError::EmptyTitle`] when `title` is blank.
    /// - [`SummaryValidationError::BlankAuthor`] / [`SummaryValidationError::BlankKeyword`]
    ///   for the first blank entry found.
    pub fn new<A, K>(
        title: impl Into<String>,
        authors: A,
        body: impl Into<String>,
        keywords: K,
    ) -> Result<Self, SummaryValidationError>
    where
        A: IntoIterator,
        A::Item: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        let summary = Self {
            title: title.into(),
            authors: authors.into_iter().map(Into::into).collect(),
            body: body.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        };
        summary.validate()?;
        Ok(summary)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), SummaryValidationError> {
        if self.title.trim().is_empty() {
            return Err(SummaryValidationError::EmptyTitle);
        }
        if let Some(index) = first_blank(&self.authors) {
            return Err(SummaryValidationError::BlankAuthor { index });
        }
        if let Some(index) = first_blank(&self.keywords) {
            return Err(SummaryValidationError::BlankKeyword { index });
        }
        Ok(())
    }

    pub fn id(&self) -> SummaryId {
        SummaryId(self.title.clone())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Author names as supplied, in declaration order.
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Keywords as supplied, in declaration order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

/// Wire shape accepted by deserialization before validation.
#[derive(Deserialize)]
struct SummaryRecord {
    title: String,
    #[serde(default)]
    authors: Vec<String>,
    #[serde(default)]
    body: String,
    #[serde(default)]
    keywords: Vec<String>,
}

impl TryFrom<SummaryRecord> for Summary {
    type Error = SummaryValidationError;

    fn try_from(record: SummaryRecord) -> Result<Self, Self::Error> {
        Self::new(record.title, record.authors, record.body, record.keywords)
    }
}

fn first_blank(values: &[String]) -> Option<usize> {
    values.iter().position(|value| value.trim().is_empty())
}
