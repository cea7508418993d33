//! Structured-document (XML) export of a single work.

use crate::models::Work;

/// Encode one work as a standalone XML document.
#[must_use]
pub fn work_to_xml(work: &Work) -> String {
    let mut output = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<work>\n");

    push_element(&mut output, 1, "id", &work.id);
    push_element(&mut output, 1, "title", work.title_or_default());
    push_element(&mut output, 1, "publication_date", work.date());
    push_element(&mut output, 1, "type", work.type_tag());
    push_element(&mut output, 1, "doi", work.doi().unwrap_or(""));
    push_element(&mut output, 1, "cited_by_count", &work.cited_by_count.to_string());
    push_element(&mut output, 1, "abstract", work.abstract_text().as_deref().unwrap_or(""));

    output.push_str("  <authors>\n");
    for name in work.author_names() {
        push_element(&mut output, 2, "author", name);
    }
    output.push_str("  </authors>\n");

    push_element(&mut output, 1, "venue", work.venue().unwrap_or(""));
    output.push_str("</work>\n");

    output
}

fn push_element(output: &mut String, depth: usize, name: &str, text: &str) {
    output.push_str(&"  ".repeat(depth));
    output.push_str(&format!("<{name}>{}</{name}>\n", escape_xml(text)));
}

/// Escape the five XML-special characters. Nothing else is altered.
#[must_use]
pub fn escape_xml(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, Authorship, PrimaryLocation, Source};

    #[test]
    fn test_escape_all_five() {
        assert_eq!(escape_xml(r#"<a & 'b' "c">"#), "&lt;a &amp; &apos;b&apos; &quot;c&quot;&gt;");
    }

    #[test]
    fn test_escape_leaves_other_text_alone() {
        let text = "Schrödinger: 50% ≈ ½ #1 @home\nnext line";
        assert_eq!(escape_xml(text), text);
    }

    #[test]
    fn test_entities_are_not_double_decoded() {
        assert_eq!(escape_xml("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_work_to_xml_layout() {
        let work = Work {
            id: "https://openalex.org/W1".to_string(),
            title: Some("Cats & Dogs".to_string()),
            publication_date: Some("2020-05-01".to_string()),
            work_type: Some("article".to_string()),
            cited_by_count: 3,
            authorships: vec![
                Authorship {
                    author: Author {
                        display_name: Some("A. O'Neil".to_string()),
                        ..Default::default()
                    },
                    institutions: vec![],
                },
                Authorship {
                    author: Author {
                        display_name: Some("B. Smith".to_string()),
                        ..Default::default()
                    },
                    institutions: vec![],
                },
            ],
            primary_location: Some(PrimaryLocation {
                source: Some(Source {
                    id: None,
                    display_name: Some("Nature".to_string()),
                }),
                ..Default::default()
            }),
            ..Default::default()
        };

        let xml = work_to_xml(&work);
        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
            <work>\n\
            \x20 <id>https://openalex.org/W1</id>\n\
            \x20 <title>Cats &amp; Dogs</title>\n\
            \x20 <publication_date>2020-05-01</publication_date>\n\
            \x20 <type>article</type>\n\
            \x20 <doi></doi>\n\
            \x20 <cited_by_count>3</cited_by_count>\n\
            \x20 <abstract></abstract>\n\
            \x20 <authors>\n\
            \x20   <author>A. O&apos;Neil</author>\n\
            \x20   <author>B. Smith</author>\n\
            \x20 </authors>\n\
            \x20 <venue>Nature</venue>\n\
            </work>\n";
        assert_eq!(xml, expected);
    }
}
