//! Document tree access
//!
//! Thin helpers over `roxmltree` for walking direct children by tag name,
//! reading text content, and listing the raw text of direct child comments.

use roxmltree::{Document, Node, ParsingOptions};

use crate::error::{MetadataError, Result};

mod variable;

pub use variable::{extract, parse_declaration};

/// Parse a TLD document, allowing the DOCTYPE used by JSP 1.2 descriptors
pub fn parse_document(text: &str) -> Result<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(text, options)?)
}

/// Raw text of the direct child comments, in document order
pub fn direct_child_comments<'a>(element: Node<'a, '_>) -> Vec<&'a str> {
    element
        .children()
        .filter(|child| child.is_comment())
        .filter_map(|child| child.text())
        .collect()
}

/// Direct child elements with the given local name
pub fn child_elements_by_tag<'a, 'input: 'a>(
    element: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    element
        .children()
        .filter(move |child| child.is_element() && child.tag_name().name() == tag)
}

/// The single direct child element with the given name, if any
pub fn child_element_by_tag<'a, 'input>(
    element: Node<'a, 'input>,
    tag: &str,
) -> std::result::Result<Option<Node<'a, 'input>>, MetadataError> {
    let mut matches = element
        .children()
        .filter(|child| child.is_element() && child.tag_name().name() == tag);
    let first = matches.next();
    if matches.next().is_some() {
        return Err(MetadataError::DuplicateChild {
            tag: tag.to_string(),
        });
    }
    Ok(first)
}

/// Text content of the single direct child element with the given name
pub fn child_text_content(
    element: Node<'_, '_>,
    tag: &str,
) -> std::result::Result<Option<String>, MetadataError> {
    Ok(child_element_by_tag(element, tag)?.map(text_content))
}

/// Concatenated descendant text, CDATA included and comments excluded
pub fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Text content of every direct child with the given name
pub fn child_texts(element: Node<'_, '_>, tag: &str) -> Vec<String> {
    child_elements_by_tag(element, tag).map(text_content).collect()
}

/// Boolean child content: only a case-insensitive `true` is true
pub fn parse_boolean(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}
