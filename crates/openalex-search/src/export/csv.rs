//! Spreadsheet (CSV) export of a result page.

use crate::models::Work;

/// Column headers, in output order.
pub const CSV_HEADERS: [&str; 12] = [
    "Title",
    "Authors",
    "Author Institutions",
    "Article Type",
    "Publication Date",
    "Venue",
    "DOI",
    "OpenAlex ID",
    "Cited By Count",
    "Open Access",
    "OA Status",
    "Abstract",
];

/// Separator between joined names inside one cell.
const NAME_SEPARATOR: &str = "; ";

/// Encode works as CSV: a header row, then one row per work.
///
/// Rows are newline-joined without a trailing newline.
#[must_use]
pub fn works_to_csv(works: &[Work]) -> String {
    let mut rows = Vec::with_capacity(works.len() + 1);
    rows.push(CSV_HEADERS.join(","));
    rows.extend(works.iter().map(work_row));
    rows.join("\n")
}

fn work_row(work: &Work) -> String {
    let authors = work.author_names().join(NAME_SEPARATOR);
    let institutions = work.institution_names().join(NAME_SEPARATOR);
    let abstract_text = work.abstract_text().unwrap_or_default();

    [
        escape_csv(work.title_or_default()),
        escape_csv(&authors),
        escape_csv(&institutions),
        escape_csv(work.type_tag()),
        escape_csv(work.date()),
        escape_csv(work.venue().unwrap_or("")),
        escape_csv(work.doi().unwrap_or("")),
        escape_csv(&work.id),
        work.cited_by_count.to_string(),
        open_access_label(work).to_string(),
        escape_csv(work.oa_status().unwrap_or("")),
        escape_csv(&abstract_text),
    ]
    .join(",")
}

fn open_access_label(work: &Work) -> &'static str {
    if work.is_open_access() { "Yes" } else { "No" }
}

/// Escape a string for CSV output.
///
/// Fields containing a comma, newline or double quote are wrapped in double
/// quotes with internal quotes doubled; anything else is emitted verbatim.
#[must_use]
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('\n') || s.contains('"') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, Authorship, Institution, OpenAccess};

    fn authorship(name: &str, institutions: &[&str]) -> Authorship {
        Authorship {
            author: Author {
                display_name: Some(name.to_string()),
                ..Default::default()
            },
            institutions: institutions
                .iter()
                .map(|i| Institution {
                    id: None,
                    display_name: Some((*i).to_string()),
                })
                .collect(),
        }
    }

    #[test]
    fn test_escape_plain_field_untouched() {
        assert_eq!(escape_csv("plain title"), "plain title");
        assert_eq!(escape_csv(""), "");
    }

    #[test]
    fn test_escape_multiline_quoted_title() {
        assert_eq!(escape_csv("Line, \"One\"\nLine Two"), "\"Line, \"\"One\"\"\nLine Two\"");
    }

    #[test]
    fn test_escape_quote_only() {
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_header_only_for_empty_page() {
        assert_eq!(
            works_to_csv(&[]),
            "Title,Authors,Author Institutions,Article Type,Publication Date,Venue,DOI,\
             OpenAlex ID,Cited By Count,Open Access,OA Status,Abstract"
        );
    }

    #[test]
    fn test_row_columns() {
        let work = Work {
            id: "https://openalex.org/W9".to_string(),
            title: Some("Deep Learning".to_string()),
            publication_date: Some("2015-05-28".to_string()),
            work_type: Some("article".to_string()),
            cited_by_count: 1200,
            doi: Some("https://doi.org/10.1038/nature14539".to_string()),
            open_access: Some(OpenAccess {
                is_oa: true,
                oa_status: Some("bronze".to_string()),
                oa_url: None,
            }),
            authorships: vec![
                authorship("Yann LeCun", &["NYU", "Meta"]),
                authorship("Yoshua Bengio", &["Mila", "NYU"]),
            ],
            ..Default::default()
        };

        let csv = works_to_csv(&[work]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "Deep Learning,Yann LeCun; Yoshua Bengio,NYU; Meta; Mila,article,2015-05-28,,\
             https://doi.org/10.1038/nature14539,https://openalex.org/W9,1200,Yes,bronze,"
        );
    }

    #[test]
    fn test_no_trailing_newline() {
        let csv = works_to_csv(&[Work {
            id: "W1".to_string(),
            ..Default::default()
        }]);
        assert!(!csv.ends_with('\n'));
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.ends_with(",0,No,,"));
    }
}
