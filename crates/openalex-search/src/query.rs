//! Filter-expression builder.
//!
//! Translates a [`SearchFilters`] selection into the works endpoint's query
//! parameters. Pure: no I/O happens here.
//!
//! ```
//! use openalex_search::query::SearchParams;
//!
//! let params = SearchParams {
//!     from_date: Some("2020-01-01".to_string()),
//!     document_types: vec!["article".to_string(), "book".to_string()],
//!     ..SearchParams::default()
//! };
//!
//! assert_eq!(
//!     params.filter_expression().as_deref(),
//!     Some("from_publication_date:2020-01-01,to_publication_date:*,type:article|book"),
//! );
//! ```

use crate::config::api;
use crate::models::SearchFilters;

/// Sort order sent with every work search.
pub const RELEVANCE_SORT: &str = "relevance_score:desc";

/// Wildcard for an open-ended date bound.
pub const OPEN_BOUND: &str = "*";

/// Separator between filter clauses (conjunction).
pub const CLAUSE_SEPARATOR: &str = ",";

/// Separator between alternatives inside one clause (disjunction).
pub const ALTERNATIVE_SEPARATOR: &str = "|";

/// Parameters of one work search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Free-text query.
    pub query: Option<String>,

    /// Earliest publication date, ISO formatted.
    pub from_date: Option<String>,

    /// Latest publication date, ISO formatted.
    pub to_date: Option<String>,

    /// Document type tags.
    pub document_types: Vec<String>,

    /// Topic (concept) identifiers.
    pub topics: Vec<String>,

    /// Page number (1-based).
    pub page: u32,

    /// Page size.
    pub per_page: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: None,
            from_date: None,
            to_date: None,
            document_types: Vec::new(),
            topics: Vec::new(),
            page: 1,
            per_page: api::DEFAULT_PER_PAGE,
        }
    }
}

impl SearchParams {
    /// Build parameters for one page of a submitted search.
    #[must_use]
    pub fn from_filters(filters: &SearchFilters, page: u32, per_page: u32) -> Self {
        Self {
            query: Some(filters.query.clone()),
            from_date: filters.from_date.map(|d| d.format("%Y-%m-%d").to_string()),
            to_date: filters.to_date.map(|d| d.format("%Y-%m-%d").to_string()),
            document_types: filters.document_types.iter().map(|t| t.tag().to_string()).collect(),
            topics: filters.topics.clone(),
            page,
            per_page,
        }
    }

    /// Trimmed query, when non-blank.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// Page clamped to at least 1.
    #[must_use]
    pub fn effective_page(&self) -> u32 {
        self.page.max(1)
    }

    /// Page size clamped to the API's accepted range.
    #[must_use]
    pub fn effective_per_page(&self) -> u32 {
        self.per_page.clamp(1, api::MAX_PER_PAGE)
    }

    /// The combined filter expression, or `None` when no clause applies.
    #[must_use]
    pub fn filter_expression(&self) -> Option<String> {
        let clauses: Vec<String> = [
            date_clause(self.from_date.as_deref(), self.to_date.as_deref()),
            any_of_clause("type", &self.document_types),
            any_of_clause("concepts.id", &self.topics),
        ]
        .into_iter()
        .flatten()
        .collect();

        if clauses.is_empty() {
            None
        } else {
            Some(clauses.join(CLAUSE_SEPARATOR))
        }
    }

    /// Query parameters ready for transmission, in a stable order.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(5);

        if let Some(term) = self.search_term() {
            params.push(("search".to_string(), term.to_string()));
        }

        if let Some(filter) = self.filter_expression() {
            params.push(("filter".to_string(), filter));
        }

        params.push(("page".to_string(), self.effective_page().to_string()));
        params.push(("per_page".to_string(), self.effective_per_page().to_string()));
        params.push(("sort".to_string(), RELEVANCE_SORT.to_string()));

        params
    }
}

/// Publication date range clause. Either bound may be open.
#[must_use]
pub fn date_clause(from: Option<&str>, to: Option<&str>) -> Option<String> {
    let from = from.map(str::trim).filter(|d| !d.is_empty());
    let to = to.map(str::trim).filter(|d| !d.is_empty());

    if from.is_none() && to.is_none() {
        return None;
    }

    Some(format!(
        "from_publication_date:{}{CLAUSE_SEPARATOR}to_publication_date:{}",
        from.unwrap_or(OPEN_BOUND),
        to.unwrap_or(OPEN_BOUND)
    ))
}

/// `field:a|b|c` clause over the given values, order preserved.
#[must_use]
pub fn any_of_clause(field: &str, values: &[String]) -> Option<String> {
    let values: Vec<&str> =
        values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()).collect();

    if values.is_empty() {
        return None;
    }

    Some(format!("{field}:{}", values.join(ALTERNATIVE_SEPARATOR)))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::DocumentType;

    fn names(params: &[(String, String)]) -> Vec<&str> {
        params.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn test_empty_params_only_paginate_and_sort() {
        let pairs = SearchParams::default().to_query_pairs();
        assert_eq!(names(&pairs), vec!["page", "per_page", "sort"]);
        assert_eq!(pairs[0].1, "1");
        assert_eq!(pairs[1].1, "25");
        assert_eq!(pairs[2].1, "relevance_score:desc");
    }

    #[test]
    fn test_blank_query_is_dropped() {
        let params = SearchParams {
            query: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(params.search_term().is_none());
        assert!(!names(&params.to_query_pairs()).contains(&"search"));
    }

    #[test]
    fn test_query_is_trimmed() {
        let params = SearchParams {
            query: Some("  machine learning ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            params.to_query_pairs()[0],
            ("search".to_string(), "machine learning".to_string())
        );
    }

    #[test]
    fn test_date_clause_bounds() {
        assert_eq!(date_clause(None, None), None);
        assert_eq!(
            date_clause(Some("2020-01-01"), None).as_deref(),
            Some("from_publication_date:2020-01-01,to_publication_date:*")
        );
        assert_eq!(
            date_clause(None, Some("2021-12-31")).as_deref(),
            Some("from_publication_date:*,to_publication_date:2021-12-31")
        );
        assert_eq!(date_clause(Some(""), Some(" ")), None);
    }

    #[test]
    fn test_all_clauses_joined_in_order() {
        let params = SearchParams {
            from_date: Some("2019-01-01".to_string()),
            to_date: Some("2020-01-01".to_string()),
            document_types: vec!["preprint".to_string(), "article".to_string()],
            topics: vec!["C41008148".to_string(), "C86803240".to_string()],
            ..Default::default()
        };

        assert_eq!(
            params.filter_expression().as_deref(),
            Some(
                "from_publication_date:2019-01-01,to_publication_date:2020-01-01,\
                 type:preprint|article,concepts.id:C41008148|C86803240"
            )
        );
    }

    #[test]
    fn test_page_and_size_are_clamped() {
        let params = SearchParams {
            page: 0,
            per_page: 5000,
            ..Default::default()
        };
        let pairs = params.to_query_pairs();
        assert_eq!(pairs[0].1, "1");
        assert_eq!(pairs[1].1, "200");

        let params = SearchParams {
            per_page: 0,
            ..Default::default()
        };
        assert_eq!(params.effective_per_page(), 1);
    }

    #[test]
    fn test_from_filters_formats_dates_and_types() {
        let filters = SearchFilters {
            query: "graphene".to_string(),
            from_date: NaiveDate::from_ymd_opt(2015, 3, 7),
            to_date: None,
            topics: vec!["https://openalex.org/C1".to_string()],
            document_types: vec![DocumentType::Article, DocumentType::Book],
        };

        let params = SearchParams::from_filters(&filters, 2, 25);
        assert_eq!(params.from_date.as_deref(), Some("2015-03-07"));
        assert_eq!(params.document_types, vec!["article", "book"]);
        assert_eq!(params.page, 2);
        assert_eq!(
            params.filter_expression().as_deref(),
            Some(
                "from_publication_date:2015-03-07,to_publication_date:*,\
                 type:article|book,concepts.id:https://openalex.org/C1"
            )
        );
    }
}
