//! Description summaries
//!
//! A description may mark the part worth showing in listings with a CSS
//! class. The summary is every element carrying that class, or the whole
//! description when none does.

use roxmltree::Document;

use crate::error::SummaryError;

/// Summarize an HTML snippet by the elements with `class="summary_class"`
pub fn summarize(summary_class: &str, snippet: &str) -> Result<String, SummaryError> {
    let wrapped = format!("<html>{snippet}</html>");
    let doc = Document::parse(&wrapped)?;
    let input = doc.input_text();
    let summary: String = doc
        .root_element()
        .descendants()
        .skip(1)
        .filter(|node| node.is_element() && node.attribute("class") == Some(summary_class))
        .map(|node| &input[node.range()])
        .collect();
    if summary.is_empty() {
        Ok(snippet.to_string())
    } else {
        Ok(summary)
    }
}

/// Summary of the first description, if there is one
pub fn summarize_first(
    summary_class: &str,
    descriptions: &[String],
) -> Result<Option<String>, SummaryError> {
    descriptions
        .first()
        .map(|description| summarize(summary_class, description))
        .transpose()
}
