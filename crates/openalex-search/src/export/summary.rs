//! Summary document generated from metadata alone.

use crate::models::Work;

/// Line width of the summary document.
pub const SUMMARY_WIDTH: usize = 80;

/// Render a readable summary of one work.
///
/// Produced entirely from the fetched record; no network access.
#[must_use]
pub fn work_summary(work: &Work) -> String {
    let authors = work.author_names();
    let authors = if authors.is_empty() {
        "Unknown".to_string()
    } else {
        authors.join(", ")
    };
    let field_options = textwrap::Options::new(SUMMARY_WIDTH).subsequent_indent("  ");

    let mut output = textwrap::fill(work.title_or_default(), SUMMARY_WIDTH);
    output.push_str("\n\n");

    for line in [
        format!("Authors: {authors}"),
        format!("Publication Date: {}", work.date()),
        format!("Type: {}", work.type_tag()),
        format!("Citations: {}", work.cited_by_count),
        format!("DOI: {}", work.doi().unwrap_or("N/A")),
    ] {
        output.push_str(&textwrap::fill(&line, &field_options));
        output.push('\n');
    }

    if let Some(abs) = work.abstract_text() {
        output.push_str("\nAbstract:\n");
        output.push_str(&textwrap::fill(&abs, SUMMARY_WIDTH));
        output.push('\n');
    }

    output
}
