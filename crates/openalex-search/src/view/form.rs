//! Search form state.

use chrono::NaiveDate;

use crate::config::api;
use crate::models::{DocumentType, SearchFilters, TopicSuggestion};

/// Input collected before a search is submitted.
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    query: String,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
    selected_topics: Vec<String>,
    topic_input: String,
    topic_suggestions: Vec<TopicSuggestion>,
    selected_types: Vec<DocumentType>,
}

impl SearchForm {
    /// Empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the query text.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Set or clear the earliest publication date.
    pub fn set_from_date(&mut self, date: Option<NaiveDate>) {
        self.from_date = date;
    }

    /// Set or clear the latest publication date.
    pub fn set_to_date(&mut self, date: Option<NaiveDate>) {
        self.to_date = date;
    }

    /// Select the type if unselected, otherwise deselect it.
    pub fn toggle_document_type(&mut self, doc_type: DocumentType) {
        if let Some(pos) = self.selected_types.iter().position(|t| *t == doc_type) {
            self.selected_types.remove(pos);
        } else {
            self.selected_types.push(doc_type);
        }
    }

    /// Selected document types, in selection order.
    #[must_use]
    pub fn selected_types(&self) -> &[DocumentType] {
        &self.selected_types
    }

    /// Add a topic. Clears the topic input and the current suggestions.
    pub fn add_topic(&mut self, topic_id: impl Into<String>) {
        let topic_id = topic_id.into();
        if !self.selected_topics.contains(&topic_id) {
            self.selected_topics.push(topic_id);
        }
        self.topic_input.clear();
        self.topic_suggestions.clear();
    }

    /// Remove a selected topic.
    pub fn remove_topic(&mut self, topic_id: &str) {
        self.selected_topics.retain(|id| id != topic_id);
    }

    /// Selected topic identifiers, in selection order.
    #[must_use]
    pub fn selected_topics(&self) -> &[String] {
        &self.selected_topics
    }

    /// Replace the topic input text.
    ///
    /// Input too short to look up clears the suggestions immediately.
    pub fn set_topic_input(&mut self, input: impl Into<String>) {
        self.topic_input = input.into();
        if self.topic_lookup().is_none() {
            self.topic_suggestions.clear();
        }
    }

    /// Current topic input.
    #[must_use]
    pub fn topic_input(&self) -> &str {
        &self.topic_input
    }

    /// The prefix a suggestion lookup should use, if the input is long enough.
    #[must_use]
    pub fn topic_lookup(&self) -> Option<&str> {
        let input = self.topic_input.trim();
        (input.chars().count() >= api::MIN_SUGGESTION_INPUT).then_some(input)
    }

    /// Replace the topic suggestions.
    pub fn set_suggestions(&mut self, suggestions: Vec<TopicSuggestion>) {
        self.topic_suggestions = suggestions;
    }

    /// Current topic suggestions.
    #[must_use]
    pub fn suggestions(&self) -> &[TopicSuggestion] {
        &self.topic_suggestions
    }

    /// Emit the filters for submission.
    #[must_use]
    pub fn submit(&self) -> SearchFilters {
        SearchFilters {
            query: self.query.clone(),
            from_date: self.from_date,
            to_date: self.to_date,
            topics: self.selected_topics.clone(),
            document_types: self.selected_types.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_document_type_preserves_order() {
        let mut form = SearchForm::new();
        form.toggle_document_type(DocumentType::Book);
        form.toggle_document_type(DocumentType::Article);
        form.toggle_document_type(DocumentType::Preprint);
        form.toggle_document_type(DocumentType::Article);

        assert_eq!(form.selected_types(), &[DocumentType::Book, DocumentType::Preprint]);
    }

    #[test]
    fn test_add_topic_is_idempotent_and_clears_input() {
        let mut form = SearchForm::new();
        form.set_topic_input("neuro");
        form.set_suggestions(vec![TopicSuggestion {
            id: "C1".to_string(),
            display_name: "Neuroscience".to_string(),
        }]);

        form.add_topic("C1");
        form.add_topic("C1");

        assert_eq!(form.selected_topics(), &["C1".to_string()]);
        assert!(form.topic_input().is_empty());
        assert!(form.suggestions().is_empty());

        form.remove_topic("C1");
        assert!(form.selected_topics().is_empty());
    }

    #[test]
    fn test_short_topic_input_clears_suggestions() {
        let mut form = SearchForm::new();
        form.set_topic_input("bio");
        assert_eq!(form.topic_lookup(), Some("bio"));
        form.set_suggestions(vec![TopicSuggestion::default()]);

        form.set_topic_input("b");
        assert_eq!(form.topic_lookup(), None);
        assert!(form.suggestions().is_empty());
    }

    #[test]
    fn test_submit_emits_filters() {
        let mut form = SearchForm::new();
        form.set_query("quantum error correction");
        form.set_from_date(NaiveDate::from_ymd_opt(2018, 1, 1));
        form.toggle_document_type(DocumentType::Preprint);
        form.add_topic("https://openalex.org/C121332964");

        let filters = form.submit();
        assert_eq!(filters.query, "quantum error correction");
        assert_eq!(filters.from_date, NaiveDate::from_ymd_opt(2018, 1, 1));
        assert!(filters.to_date.is_none());
        assert_eq!(filters.document_types, vec![DocumentType::Preprint]);
        assert_eq!(filters.topics, vec!["https://openalex.org/C121332964".to_string()]);
    }
}
