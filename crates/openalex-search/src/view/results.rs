//! Result list rendering.

use super::Pagination;
use crate::models::Work;

/// Per-work export actions offered in the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkAction {
    /// Download the hosted open access file.
    OpenAccessFile,
    /// Structured XML export.
    Xml,
    /// Generated summary document.
    Summary,
}

impl WorkAction {
    /// Short label shown next to a work.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OpenAccessFile => "PDF",
            Self::Xml => "XML",
            Self::Summary => "Summary",
        }
    }
}

/// Actions available for a work. The file download needs an open access URL.
#[must_use]
pub fn available_actions(work: &Work) -> Vec<WorkAction> {
    let mut actions = Vec::with_capacity(3);
    if work.oa_url().is_some() {
        actions.push(WorkAction::OpenAccessFile);
    }
    actions.push(WorkAction::Xml);
    actions.push(WorkAction::Summary);
    actions
}

/// Render one page of results with its range header and pager.
#[must_use]
pub fn render_results(works: &[Work], pagination: &Pagination) -> String {
    if works.is_empty() {
        return "No results found\nTry adjusting your search criteria\n".to_string();
    }

    let (start, end) = pagination.displayed_range();
    let mut output =
        format!("Showing {start} - {end} of {} results\n\n", pagination.total_count);

    for (offset, work) in works.iter().enumerate() {
        output.push_str(&render_work_entry(work, start + offset as u64));
        output.push('\n');
    }

    if pagination.shows_pager() {
        let previous = if pagination.has_previous() {
            "[Previous]"
        } else {
            "[Previous: disabled]"
        };
        let next = if pagination.has_next() {
            "[Next]"
        } else {
            "[Next: disabled]"
        };
        output.push_str(&format!(
            "{previous}  Page {} of {}  {next}\n",
            pagination.page,
            pagination.total_pages()
        ));
    }

    output
}

/// Render the summary entry of one work.
#[must_use]
pub fn render_work_entry(work: &Work, position: u64) -> String {
    let authors = work.author_names();
    let authors = if authors.is_empty() {
        "Unknown authors".to_string()
    } else {
        authors.join(", ")
    };

    let mut meta = vec![
        work.date().to_string(),
        work.type_tag().to_string(),
        format!("{} citations", work.cited_by_count),
    ];
    if let Some(venue) = work.venue() {
        meta.push(venue.to_string());
    }
    meta.retain(|m| !m.is_empty());

    let actions: Vec<&str> = available_actions(work).iter().map(|a| a.label()).collect();

    format!(
        "{position}. {}\n   {authors}\n   {}\n   [{}] {}\n",
        work.display_name_or_default(),
        meta.join(" | "),
        work.key(),
        actions.join(" ")
    )
}
