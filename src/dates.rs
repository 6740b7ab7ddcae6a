//! Effective dates declared in comments
//!
//! Any taglib, tag, function, or attribute element may declare its dates in
//! direct child comments:
//!
//! - `<!-- dateCreated = "ISO 8601" -->`
//! - `<!-- datePublished = "ISO 8601" -->`
//! - `<!-- dateModified = "ISO 8601" -->`
//! - `<!-- dateReviewed = "ISO 8601" -->`
//!
//! An element declaring none of them inherits its parent's dates whole.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};
use roxmltree::Node;
use serde::Serialize;

use crate::error::{MetadataError, OrderingError};
use crate::xml::extract;

/// Timezone-aware instant
pub type Timestamp = DateTime<FixedOffset>;

pub const DATE_CREATED: &str = "dateCreated";
pub const DATE_PUBLISHED: &str = "datePublished";
pub const DATE_MODIFIED: &str = "dateModified";
pub const DATE_REVIEWED: &str = "dateReviewed";

/// Created, published, modified, and reviewed dates of one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dates {
    /// <https://schema.org/dateCreated>
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<Timestamp>,
    /// <https://schema.org/datePublished>
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<Timestamp>,
    /// <https://schema.org/dateModified>
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<Timestamp>,
    /// When the content was last checked for accuracy, even if unmodified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed: Option<Timestamp>,
}

impl Dates {
    /// All four dates unknown
    pub const UNKNOWN: Dates = Dates {
        created: None,
        published: None,
        modified: None,
        reviewed: None,
    };

    pub fn new(
        created: Option<Timestamp>,
        published: Option<Timestamp>,
        modified: Option<Timestamp>,
        reviewed: Option<Timestamp>,
    ) -> Self {
        Dates {
            created,
            published,
            modified,
            reviewed,
        }
    }

    pub fn is_unknown(&self) -> bool {
        *self == Dates::UNKNOWN
    }

    /// Read the date comments directly inside `element`.
    ///
    /// When none of the four are declared, `default` is returned as-is (or
    /// [`Dates::UNKNOWN`] without one). Declaring any one date makes the
    /// element authoritative: undeclared fields stay unknown rather than
    /// falling back to the parent.
    pub fn from_comments(
        element: Node<'_, '_>,
        default: Option<Dates>,
    ) -> Result<Dates, MetadataError> {
        let dates = Dates::new(
            parse_comment(element, DATE_CREATED)?,
            parse_comment(element, DATE_PUBLISHED)?,
            parse_comment(element, DATE_MODIFIED)?,
            parse_comment(element, DATE_REVIEWED)?,
        );
        match default {
            Some(default) if dates.is_unknown() => Ok(default),
            _ => Ok(dates),
        }
    }

    /// Fail when this node was created or published before `other`.
    ///
    /// Fields absent on either side are not compared. Modified and reviewed
    /// dates are never compared.
    pub fn check_not_before(
        &self,
        fields: &str,
        other: &Dates,
        other_fields: &str,
    ) -> Result<(), OrderingError> {
        check_field_not_before(fields, DATE_CREATED, self.created, other_fields, other.created)?;
        check_field_not_before(
            fields,
            DATE_PUBLISHED,
            self.published,
            other_fields,
            other.published,
        )
    }

    /// Roll two sets of dates into one: older created, older published,
    /// newer modified, older reviewed.
    ///
    /// A missing operand yields the other operand. A field missing on either
    /// side is missing in the result, so unknown propagates as unknown. When
    /// at least one side has a modified date, a side without one counts its
    /// latest of created and published as modified.
    pub fn merge(d1: Option<Dates>, d2: Option<Dates>) -> Option<Dates> {
        let (d1, d2) = match (d1, d2) {
            (None, None) => return None,
            (Some(d), None) | (None, Some(d)) => return Some(d),
            (Some(d1), Some(d2)) => (d1, d2),
        };
        let (mut modified1, mut modified2) = (d1.modified, d2.modified);
        if modified1.is_some() || modified2.is_some() {
            modified1 = modified1.or_else(|| latest(d1.created, d1.published));
            modified2 = modified2.or_else(|| latest(d2.created, d2.published));
        }
        Some(Dates::new(
            older(d1.created, d2.created),
            older(d1.published, d2.published),
            newer(modified1, modified2),
            older(d1.reviewed, d2.reviewed),
        ))
    }

    /// Left-to-right fold of [`Dates::merge`], `None` for an empty sequence
    pub fn merge_all(dates: impl IntoIterator<Item = Dates>) -> Option<Dates> {
        dates
            .into_iter()
            .fold(None, |acc, next| Dates::merge(acc, Some(next)))
    }
}

fn check_field_not_before(
    fields: &str,
    name: &str,
    value: Option<Timestamp>,
    other_fields: &str,
    other: Option<Timestamp>,
) -> Result<(), OrderingError> {
    match (value, other) {
        (Some(value), Some(other_value)) if value < other_value => Err(OrderingError {
            field: format!("{fields}/{name}"),
            value,
            other_field: format!("{other_fields}/{name}"),
            other_value,
        }),
        _ => Ok(()),
    }
}

/// Older of two dates, `None` when either is unknown
fn older(dt1: Option<Timestamp>, dt2: Option<Timestamp>) -> Option<Timestamp> {
    match (dt1, dt2) {
        (Some(dt1), Some(dt2)) => Some(if dt1 <= dt2 { dt1 } else { dt2 }),
        _ => None,
    }
}

/// Newer of two dates, `None` when either is unknown
fn newer(dt1: Option<Timestamp>, dt2: Option<Timestamp>) -> Option<Timestamp> {
    match (dt1, dt2) {
        (Some(dt1), Some(dt2)) => Some(if dt1 >= dt2 { dt1 } else { dt2 }),
        _ => None,
    }
}

/// Latest of the dates that are known
fn latest(dt1: Option<Timestamp>, dt2: Option<Timestamp>) -> Option<Timestamp> {
    match (dt1, dt2) {
        (Some(dt1), Some(dt2)) => Some(if dt1 >= dt2 { dt1 } else { dt2 }),
        (dt1, dt2) => dt1.or(dt2),
    }
}

fn parse_comment(
    element: Node<'_, '_>,
    variable: &'static str,
) -> Result<Option<Timestamp>, MetadataError> {
    extract(element, variable)?
        .map(|value| parse_timestamp(variable, &value))
        .transpose()
}

/// Parse an ISO 8601 timestamp; values without an offset are taken as UTC
pub fn parse_timestamp(variable: &'static str, value: &str) -> Result<Timestamp, MetadataError> {
    let utc = Utc.fix();
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }
    let zulu = trimmed.strip_suffix('Z').map(|s| format!("{s}+00:00"));
    let with_offset = zulu.as_deref().unwrap_or(trimmed);
    for format in ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z", "%Y-%m-%dT%H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(with_offset, format) {
            return Ok(dt);
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc().with_timezone(&utc));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().with_timezone(&utc));
        }
    }
    Err(MetadataError::InvalidTimestamp {
        variable,
        value: value.to_string(),
    })
}
