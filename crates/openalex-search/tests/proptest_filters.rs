//! Property-based tests for the filter builder and the export encoders.

use proptest::prelude::*;

use openalex_search::export::{escape_csv, escape_xml};
use openalex_search::query::{SearchParams, any_of_clause, date_clause};

fn arb_date() -> impl Strategy<Value = String> {
    (1900u32..2030, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"))
}

fn arb_tag() -> impl Strategy<Value = String> {
    "[a-z][a-z-]{0,15}"
}

/// Undo [`escape_xml`] for the five entities it produces.
fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&apos;", "'")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

proptest! {
    /// Without dates there is never a date clause.
    #[test]
    fn no_dates_no_date_clause(types in proptest::collection::vec(arb_tag(), 0..5)) {
        let params = SearchParams {
            document_types: types,
            ..Default::default()
        };
        let filter = params.filter_expression().unwrap_or_default();
        prop_assert!(!filter.contains("publication_date"));
    }

    /// A single bound leaves the other one open.
    #[test]
    fn one_sided_date_range_is_open(from in arb_date()) {
        let clause = date_clause(Some(&from), None).unwrap();
        prop_assert_eq!(clause, format!("from_publication_date:{from},to_publication_date:*"));
    }

    /// Type alternatives keep the selection order.
    #[test]
    fn type_clause_preserves_order(types in proptest::collection::vec(arb_tag(), 1..6)) {
        let clause = any_of_clause("type", &types).unwrap();
        let values: Vec<&str> = clause.trim_start_matches("type:").split('|').collect();
        prop_assert_eq!(values, types.iter().map(String::as_str).collect::<Vec<_>>());
    }

    /// Page parameters always land inside the accepted range.
    #[test]
    fn pagination_is_clamped(page in any::<u32>(), per_page in any::<u32>()) {
        let params = SearchParams {
            page,
            per_page,
            ..Default::default()
        };
        prop_assert!(params.effective_page() >= 1);
        prop_assert!((1..=200).contains(&params.effective_per_page()));
    }

    /// Escaped XML holds no raw special characters and unescapes to the input.
    #[test]
    fn xml_escape_is_reversible(s in ".*") {
        let escaped = escape_xml(&s);
        prop_assert!(!escaped.contains(['<', '>', '"', '\'']));
        prop_assert_eq!(unescape_xml(&escaped), s);
    }

    /// CSV fields are either verbatim or fully quoted with doubled quotes.
    #[test]
    fn csv_escape_quotes_when_needed(s in ".*") {
        let escaped = escape_csv(&s);
        if s.contains([',', '\n', '"']) {
            prop_assert!(escaped.starts_with('"') && escaped.ends_with('"'));
            let inner = &escaped[1..escaped.len() - 1];
            prop_assert_eq!(inner.replace("\"\"", "\""), s);
        } else {
            prop_assert_eq!(escaped, s);
        }
    }
}
