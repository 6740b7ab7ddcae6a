//! Generics carried in comments
//!
//! TLD `<type>` and signature elements cannot express generics. A comment
//! variable may repeat the element's value with `<…>` segments inserted:
//!
//! ```text
//! <!-- type = "java.util.Map<String,List<Object>>" -->
//! <type>java.util.Map</type>
//! ```
//!
//! The annotated value wins, but only when deleting every bracket segment
//! from it yields the plain element text exactly.

use std::iter::Peekable;
use std::str::Chars;

use roxmltree::Node;

use crate::error::{MetadataError, ReconcileError};
use crate::xml::{child_text_content, extract};

/// A child element paired with the comment variable that annotates it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenericsField {
    /// Child element holding the plain value
    pub element: &'static str,
    /// Comment variable holding the annotated value
    pub variable: &'static str,
}

impl GenericsField {
    pub const TYPE: GenericsField = GenericsField {
        element: "type",
        variable: "type",
    };

    pub const METHOD_SIGNATURE: GenericsField = GenericsField {
        element: "method-signature",
        variable: "methodSignature",
    };

    pub const FUNCTION_SIGNATURE: GenericsField = GenericsField {
        element: "function-signature",
        variable: "functionSignature",
    };
}

fn is_bracket(c: char) -> bool {
    c == '<' || c == '>'
}

fn bare_generics(field: &GenericsField, text: &str) -> ReconcileError {
    ReconcileError::BareGenericsNotAllowed {
        element: field.element,
        text: text.to_string(),
    }
}

/// Consume the rest of a `<…>` group whose opening bracket was just read
fn skip_group(
    chars: &mut Peekable<Chars<'_>>,
    field: &GenericsField,
    comment: &str,
) -> Result<(), ReconcileError> {
    let mut depth = 1usize;
    while depth > 0 {
        match chars.next() {
            Some('<') => depth += 1,
            Some('>') => depth -= 1,
            Some(_) => {}
            None => {
                return Err(ReconcileError::UnterminatedGenericSegment {
                    variable: field.variable,
                    comment: comment.to_string(),
                })
            }
        }
    }
    Ok(())
}

/// Next comment character after any balanced `<…>` groups starting here
fn next_comment_char(
    chars: &mut Peekable<Chars<'_>>,
    field: &GenericsField,
    comment: &str,
) -> Result<Option<char>, ReconcileError> {
    while chars.next_if_eq(&'<').is_some() {
        skip_group(chars, field, comment)?;
    }
    Ok(chars.next())
}

/// Combine a plain element value with its comment-annotated form.
///
/// Returns the annotated value when both are present and agree outside of
/// bracket segments, the plain value when only it is present, and `None`
/// when neither is.
///
/// Groups may nest and may directly follow one another, so `Pair<A><B>`
/// annotates `Pair`.
pub fn reconcile(
    text: Option<String>,
    comment: Option<String>,
    field: &GenericsField,
) -> Result<Option<String>, ReconcileError> {
    let text = match (text, comment.as_deref()) {
        (None, None) => return Ok(None),
        (None, Some(_)) => {
            return Err(ReconcileError::OrphanAnnotation {
                element: field.element,
                variable: field.variable,
            })
        }
        (Some(text), _) => text,
    };
    let Some(comment) = comment else {
        if text.contains(is_bracket) {
            return Err(bare_generics(field, &text));
        }
        return Ok(Some(text));
    };

    let mut text_chars = text.chars();
    let mut comment_chars = comment.chars().peekable();
    loop {
        let text_ch = text_chars.next();
        if text_ch.is_some_and(is_bracket) {
            return Err(bare_generics(field, &text));
        }
        let comment_ch = next_comment_char(&mut comment_chars, field, &comment)?;
        if text_ch != comment_ch {
            return Err(ReconcileError::Mismatch {
                element: field.element,
                variable: field.variable,
                text: text.clone(),
                comment: comment.clone(),
            });
        }
        if text_ch.is_none() {
            break;
        }
    }
    Ok(Some(comment))
}

/// Read `field` from `element`: child element text plus its comment variable
pub fn child_with_generics(
    element: Node<'_, '_>,
    field: &GenericsField,
) -> Result<Option<String>, MetadataError> {
    let text = child_text_content(element, field.element)?;
    let comment = extract(element, field.variable)?;
    Ok(reconcile(text, comment, field)?)
}
