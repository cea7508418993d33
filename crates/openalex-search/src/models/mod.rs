//! Data models for OpenAlex API entities and search input.
//!
//! Field names follow the API's snake_case JSON. Optional collections and
//! counters tolerate both missing fields and explicit `null`.

mod filters;
mod topic;
mod work;

pub use filters::{DocumentType, SearchFilters};
pub use topic::{TopicSuggestion, TopicSuggestionResponse};
pub use work::{
    Author, Authorship, Concept, Institution, OpenAccess, PrimaryLocation, SearchMeta,
    SearchResponse, Source, Work, work_key,
};

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
