//! Taglib document model
//!
//! Built in a single depth-first pass: each node finalizes its own dates
//! before its children are read, and children receive the parent's path and
//! dates rather than a reference to the parent.

use roxmltree::Node;

use crate::error::{Result, TldError};
use crate::xml::child_text_content;

mod attribute;
mod function;
mod tag;
mod taglib;

pub use attribute::{Attribute, DeferredMethod, DeferredValue};
pub use function::Function;
pub use tag::Tag;
pub use taglib::Taglib;

/// The `<name>` of a tag, function, or attribute
fn required_name(element: Node<'_, '_>, parent_path: &str, kind: &'static str) -> Result<String> {
    child_text_content(element, "name")
        .map_err(|e| TldError::at(parent_path, e))?
        .ok_or_else(|| TldError::MissingName {
            path: parent_path.to_string(),
            kind,
        })
}
