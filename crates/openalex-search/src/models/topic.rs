//! Topic (concept) suggestions.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// A concept offered as a topic filter suggestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSuggestion {
    /// Concept identifier (e.g. `https://openalex.org/C41008148`).
    pub id: String,

    /// Human-readable concept name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
}

/// Envelope returned by the concepts endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopicSuggestionResponse {
    /// Matching concepts.
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<TopicSuggestion>,
}
