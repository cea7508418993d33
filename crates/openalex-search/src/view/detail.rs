//! Work detail rendering.

use crate::models::Work;

/// Concepts listed in the detail view.
pub const MAX_DETAIL_CONCEPTS: usize = 10;

/// Authorships considered for the institutions list.
pub const MAX_DETAIL_AUTHORSHIPS: usize = 5;

/// Render the extended metadata of one work.
#[must_use]
pub fn render_work_detail(work: &Work) -> String {
    let mut output = String::from("Work Details\n");

    if let Some(abs) = work.abstract_text() {
        let wrapped = textwrap::indent(&textwrap::fill(&abs, 76), "  ");
        output.push_str(&format!("\nAbstract:\n{wrapped}"));
        if !wrapped.ends_with('\n') {
            output.push('\n');
        }
    }

    output.push('\n');
    output.push_str(&format!("OpenAlex ID: {} ({})\n", work.key(), work.id));

    if let Some(url) = work.doi_url() {
        output.push_str(&format!("DOI: {url}\n"));
    }

    output.push_str(&format!(
        "Open Access: {}\n",
        if work.is_open_access() { "Yes" } else { "No" }
    ));

    if let Some(status) = work.oa_status() {
        output.push_str(&format!("OA Status: {status}\n"));
    }

    if !work.concepts.is_empty() {
        let topics: Vec<String> = work
            .concepts
            .iter()
            .take(MAX_DETAIL_CONCEPTS)
            .map(|c| format!("{} ({}%)", c.display_name, c.percent()))
            .collect();
        output.push_str(&format!("Topics: {}\n", topics.join(", ")));
    }

    let affiliations: Vec<String> = work
        .authorships
        .iter()
        .take(MAX_DETAIL_AUTHORSHIPS)
        .filter(|a| !a.institutions.is_empty())
        .map(|a| {
            let institutions: Vec<&str> = a.institution_names().collect();
            format!(
                "  • {} - {}",
                a.author.display_name.as_deref().unwrap_or("Unknown"),
                institutions.join(", ")
            )
        })
        .collect();

    if !affiliations.is_empty() {
        output.push_str("Institutions:\n");
        for line in affiliations {
            output.push_str(&line);
            output.push('\n');
        }
    }

    output
}
