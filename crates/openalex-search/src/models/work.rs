//! Work data model matching the OpenAlex API schema.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// A catalog record (article, preprint, book, etc.).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Work {
    /// OpenAlex identifier, usually a full URL (`https://openalex.org/W123`).
    pub id: String,

    /// Work title.
    #[serde(default)]
    pub title: Option<String>,

    /// Display name (usually identical to the title).
    #[serde(default)]
    pub display_name: Option<String>,

    /// Publication date in ISO format (YYYY-MM-DD).
    #[serde(default)]
    pub publication_date: Option<String>,

    /// Work type tag (e.g. "article", "preprint").
    #[serde(rename = "type", default)]
    pub work_type: Option<String>,

    /// Crossref type tag.
    #[serde(default)]
    pub type_crossref: Option<String>,

    /// Number of works citing this one.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cited_by_count: u64,

    /// Relevance score for the current search.
    #[serde(default)]
    pub relevance_score: Option<f64>,

    /// Plain abstract text.
    #[serde(default)]
    pub r#abstract: Option<String>,

    /// Abstract as delivered by the live API: token -> word positions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abstract_inverted_index: Option<BTreeMap<String, Vec<u32>>>,

    /// DOI, usually as a `https://doi.org/` URL.
    #[serde(default)]
    pub doi: Option<String>,

    /// Open access status.
    #[serde(default)]
    pub open_access: Option<OpenAccess>,

    /// Primary location (venue, landing page, PDF).
    #[serde(default)]
    pub primary_location: Option<PrimaryLocation>,

    /// Ordered author and institution associations.
    #[serde(default, deserialize_with = "null_as_default")]
    pub authorships: Vec<Authorship>,

    /// Ordered scored concept tags.
    #[serde(default, deserialize_with = "null_as_default")]
    pub concepts: Vec<Concept>,
}

impl Work {
    /// Trailing path segment of the identifier (`W123`).
    #[must_use]
    pub fn key(&self) -> &str {
        work_key(&self.id)
    }

    /// Get the title, falling back to "Untitled" if not available.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().or(self.display_name.as_deref()).unwrap_or("Untitled")
    }

    /// Get the display name, falling back to the title.
    #[must_use]
    pub fn display_name_or_default(&self) -> &str {
        self.display_name.as_deref().unwrap_or_else(|| self.title_or_default())
    }

    /// Publication date or an empty string.
    #[must_use]
    pub fn date(&self) -> &str {
        self.publication_date.as_deref().unwrap_or("")
    }

    /// Work type tag or an empty string.
    #[must_use]
    pub fn type_tag(&self) -> &str {
        self.work_type.as_deref().unwrap_or("")
    }

    /// Abstract text, reconstructed from the inverted index when needed.
    #[must_use]
    pub fn abstract_text(&self) -> Option<Cow<'_, str>> {
        if let Some(text) = self.r#abstract.as_deref().filter(|s| !s.is_empty()) {
            return Some(Cow::Borrowed(text));
        }

        let index = self.abstract_inverted_index.as_ref()?;
        let text = inverted_index_to_text(index);
        if text.is_empty() {
            None
        } else {
            Some(Cow::Owned(text))
        }
    }

    /// DOI as received from the API.
    #[must_use]
    pub fn doi(&self) -> Option<&str> {
        self.doi.as_deref().filter(|d| !d.is_empty())
    }

    /// Resolvable DOI link.
    #[must_use]
    pub fn doi_url(&self) -> Option<String> {
        let doi = self.doi()?;
        if doi.starts_with("http://") || doi.starts_with("https://") {
            Some(doi.to_string())
        } else {
            Some(format!("https://doi.org/{doi}"))
        }
    }

    /// Venue (primary source) name.
    #[must_use]
    pub fn venue(&self) -> Option<&str> {
        self.primary_location.as_ref()?.source.as_ref()?.display_name.as_deref()
    }

    /// Whether a free-to-read copy is known.
    #[must_use]
    pub fn is_open_access(&self) -> bool {
        self.open_access.as_ref().is_some_and(|oa| oa.is_oa)
    }

    /// Open access status label (gold, green, bronze, closed, ...).
    #[must_use]
    pub fn oa_status(&self) -> Option<&str> {
        self.open_access.as_ref()?.oa_status.as_deref().filter(|s| !s.is_empty())
    }

    /// Direct URL of the open access copy, only when the work is open access.
    #[must_use]
    pub fn oa_url(&self) -> Option<&str> {
        let oa = self.open_access.as_ref().filter(|oa| oa.is_oa)?;
        oa.oa_url.as_deref().filter(|u| !u.is_empty())
    }

    /// Author names in authorship order.
    #[must_use]
    pub fn author_names(&self) -> Vec<&str> {
        self.authorships.iter().filter_map(|a| a.author.display_name.as_deref()).collect()
    }

    /// Institution names across all authorships, first occurrence kept.
    #[must_use]
    pub fn institution_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.authorships.iter().flat_map(Authorship::institution_names) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

/// Trailing path segment of an OpenAlex identifier.
///
/// `https://openalex.org/W2741809807` and `W2741809807` both yield `W2741809807`.
#[must_use]
pub fn work_key(id: &str) -> &str {
    let trimmed = id.trim().trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

fn inverted_index_to_text(index: &BTreeMap<String, Vec<u32>>) -> String {
    let mut positions: BTreeMap<u32, &str> = BTreeMap::new();
    for (token, places) in index {
        for place in places {
            positions.entry(*place).or_insert(token.as_str());
        }
    }
    positions.into_values().collect::<Vec<_>>().join(" ")
}

/// Open access information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAccess {
    /// Whether a free copy is known.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_oa: bool,

    /// Status label.
    #[serde(default)]
    pub oa_status: Option<String>,

    /// Best open access URL.
    #[serde(default)]
    pub oa_url: Option<String>,
}

/// Primary hosting location of a work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrimaryLocation {
    /// Hosting source (journal, repository, conference).
    #[serde(default)]
    pub source: Option<Source>,

    /// Direct PDF URL.
    #[serde(default)]
    pub pdf_url: Option<String>,

    /// Landing page URL.
    #[serde(default)]
    pub landing_page_url: Option<String>,
}

/// A hosting source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Source {
    /// Source identifier.
    #[serde(default)]
    pub id: Option<String>,

    /// Source name.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// One author's association with a work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Authorship {
    /// The author.
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: Author,

    /// Institutions listed for this author on this work.
    #[serde(default, deserialize_with = "null_as_default")]
    pub institutions: Vec<Institution>,
}

impl Authorship {
    /// Institution names for this authorship.
    pub fn institution_names(&self) -> impl Iterator<Item = &str> {
        self.institutions.iter().filter_map(|i| i.display_name.as_deref())
    }
}

/// Author reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Author {
    /// Author identifier.
    #[serde(default)]
    pub id: Option<String>,

    /// Author name.
    #[serde(default)]
    pub display_name: Option<String>,

    /// ORCID URL.
    #[serde(default)]
    pub orcid: Option<String>,
}

/// Institution reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Institution {
    /// Institution identifier.
    #[serde(default)]
    pub id: Option<String>,

    /// Institution name.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A scored concept tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Concept {
    /// Concept identifier.
    #[serde(default)]
    pub id: String,

    /// Concept name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,

    /// Score in `[0, 1]`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: f64,
}

impl Concept {
    /// Score as an integer percentage.
    #[must_use]
    pub fn percent(&self) -> u32 {
        (self.score.clamp(0.0, 1.0) * 100.0).round() as u32
    }
}

/// Search result page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Pagination metadata.
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: SearchMeta,

    /// Works on this page.
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Work>,
}

/// Pagination metadata of a search page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchMeta {
    /// Total matching works.
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,

    /// Page number (1-based).
    #[serde(default, deserialize_with = "null_as_default")]
    pub page: u32,

    /// Page size.
    #[serde(default, deserialize_with = "null_as_default")]
    pub per_page: u32,

    /// Server-side response time.
    #[serde(default)]
    pub db_response_time_ms: Option<u64>,
}
