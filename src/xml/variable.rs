//! Comment-declared variables
//!
//! TLD files cannot carry dates or generics natively, so they are declared in
//! standalone comments directly inside the element they describe:
//!
//! ```text
//! <!-- dateCreated = "2020-01-01T00:00Z" -->
//! <!-- type = 'java.util.Map<String,Object>' -->
//! ```
//!
//! A declaration must be the entire comment, ignoring surrounding whitespace.

use roxmltree::Node;

use super::direct_child_comments;
use crate::error::ExtractionError;

/// Whitespace permitted around and inside a declaration
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Value enclosed by `quote` that is followed only by trailing whitespace
fn quoted(rest: &str, quote: char) -> Option<&str> {
    let body = rest.strip_prefix(quote)?;
    let end = body.find(quote)?;
    let trailing = &body[end + quote.len_utf8()..];
    trailing.chars().all(is_space).then(|| &body[..end])
}

/// Match a single comment against `name = "value"` or `name = 'value'`.
///
/// Returns `Ok(None)` when the comment is not a declaration of `name`.
pub fn parse_declaration<'c>(
    comment: &'c str,
    name: &str,
) -> Result<Option<&'c str>, ExtractionError> {
    let rest = comment.trim_start_matches(is_space);
    let Some(rest) = rest.strip_prefix(name) else {
        return Ok(None);
    };
    let rest = rest.trim_start_matches(is_space);
    let Some(rest) = rest.strip_prefix('=') else {
        return Ok(None);
    };
    let rest = rest.trim_start_matches(is_space);

    match (quoted(rest, '"'), quoted(rest, '\'')) {
        (Some(_), Some(_)) => Err(ExtractionError::AmbiguousQuoting {
            name: name.to_string(),
            comment: comment.to_string(),
        }),
        (Some(value), None) | (None, Some(value)) => Ok(Some(value)),
        (None, None) => Ok(None),
    }
}

/// Find the value of `name` declared in the direct child comments of `element`.
///
/// At most one comment may declare the variable. Comments inside descendant
/// elements are not considered.
pub fn extract(element: Node<'_, '_>, name: &str) -> Result<Option<String>, ExtractionError> {
    let mut found: Option<&str> = None;
    for comment in direct_child_comments(element) {
        let Some(value) = parse_declaration(comment, name)? else {
            continue;
        };
        if let Some(first) = found {
            return Err(ExtractionError::MultipleDeclarations {
                name: name.to_string(),
                first: first.to_string(),
                second: value.to_string(),
            });
        }
        tracing::trace!("Found comment variable {} = {:?}", name, value);
        found = Some(value);
    }
    Ok(found.map(str::to_string))
}
