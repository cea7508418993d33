//! Search input submitted by the search form.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Document type filter tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Journal article.
    Article,
    /// Preprint.
    Preprint,
    /// Conference paper.
    Conference,
    /// Proceedings volume.
    Proceedings,
    /// Book.
    Book,
    /// Anything else.
    Other,
}

impl DocumentType {
    /// All types in form display order.
    pub const ALL: [Self; 6] = [
        Self::Article,
        Self::Preprint,
        Self::Conference,
        Self::Proceedings,
        Self::Book,
        Self::Other,
    ];

    /// Tag used in the API filter expression.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Preprint => "preprint",
            Self::Conference => "conference",
            Self::Proceedings => "proceedings",
            Self::Book => "book",
            Self::Other => "other",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Article => "Journal Article",
            Self::Preprint => "Preprint",
            Self::Conference => "Conference",
            Self::Proceedings => "Proceedings",
            Self::Book => "Book",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.tag().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|t| t.tag()).collect();
                format!("unknown document type '{wanted}' (expected one of: {})", known.join(", "))
            })
    }
}

/// Filters emitted on search submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    /// Free-text query.
    #[serde(default)]
    pub query: String,

    /// Earliest publication date (inclusive).
    #[serde(default)]
    pub from_date: Option<NaiveDate>,

    /// Latest publication date (inclusive).
    #[serde(default)]
    pub to_date: Option<NaiveDate>,

    /// Selected topic (concept) identifiers, in selection order.
    #[serde(default)]
    pub topics: Vec<String>,

    /// Selected document types, in selection order.
    #[serde(default)]
    pub document_types: Vec<DocumentType>,
}

impl SearchFilters {
    /// Filters with only a query.
    #[must_use]
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// True when nothing narrows the search.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && self.from_date.is_none()
            && self.to_date.is_none()
            && self.topics.is_empty()
            && self.document_types.is_empty()
    }
}
