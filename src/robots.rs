//! `<!-- allowRobots = "auto|true|false" -->` on tags and functions

use roxmltree::Node;

use crate::error::MetadataError;
use crate::xml::extract;

pub const ALLOW_ROBOTS: &str = "allowRobots";

/// Robots directive for a node, `None` meaning inherit (`auto`)
pub fn parse_allow_robots(element: Node<'_, '_>) -> Result<Option<bool>, MetadataError> {
    let Some(value) = extract(element, ALLOW_ROBOTS)? else {
        return Ok(None);
    };
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("auto") {
        Ok(None)
    } else if value.eq_ignore_ascii_case("true") {
        Ok(Some(true))
    } else if value.eq_ignore_ascii_case("false") {
        Ok(Some(false))
    } else {
        Err(MetadataError::InvalidAllowRobots(value.to_string()))
    }
}
