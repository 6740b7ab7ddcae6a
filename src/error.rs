//! Error types for the TLD parser
//!
//! Every failure is terminal for the document being parsed: malformed
//! metadata is an authoring defect, so nothing here is recovered from.

use std::path::PathBuf;

use thiserror::Error;

use crate::dates::Timestamp;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, TldError>;

/// Top-level error, carrying the path of the node that failed
#[derive(Debug, Error)]
pub enum TldError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("{path}: {source}")]
    Metadata {
        path: String,
        #[source]
        source: MetadataError,
    },

    #[error("{path}: duplicate {kind} name: {name}")]
    DuplicateName {
        path: String,
        kind: &'static str,
        name: String,
    },

    #[error("{path}: {kind} without a <name>")]
    MissingName { path: String, kind: &'static str },

    #[error("{path}: <{element}> elements are not supported")]
    Unsupported { path: String, element: &'static str },

    #[error("{path}/description: {source}")]
    Summary {
        path: String,
        #[source]
        source: SummaryError,
    },
}

impl TldError {
    /// Attach a node path to a metadata failure
    pub fn at(path: impl Into<String>, source: impl Into<MetadataError>) -> Self {
        TldError::Metadata {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Failures while reading metadata from a single element
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error(transparent)]
    Ordering(#[from] OrderingError),

    #[error("{variable}: invalid ISO 8601 timestamp: \"{value}\"")]
    InvalidTimestamp { variable: &'static str, value: String },

    #[error("Unexpected value for allowRobots, expect one of \"auto\", \"true\", or \"false\": {0}")]
    InvalidAllowRobots(String),

    #[error("More than one <{tag}> child element")]
    DuplicateChild { tag: String },
}

/// Comment declaration scanning errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("{name}: Found both in double quotes (\") and single quotes ('): {comment}")]
    AmbiguousQuoting { name: String, comment: String },

    #[error("{name}: More than one value found: \"{first}\" and \"{second}\"")]
    MultipleDeclarations {
        name: String,
        first: String,
        second: String,
    },
}

/// Plain value vs. comment-annotated value disagreements
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("variable-comment ({variable}) without child element ({element})")]
    OrphanAnnotation {
        element: &'static str,
        variable: &'static str,
    },

    #[error("Generics not allowed directly in child element ({element}): \"{text}\"")]
    BareGenericsNotAllowed { element: &'static str, text: String },

    #[error("Incomplete generic segment in variable-comment ({variable}): \"{comment}\"")]
    UnterminatedGenericSegment {
        variable: &'static str,
        comment: String,
    },

    #[error("child element ({element}) and variable-comment ({variable}) mismatch: \"{text}\" -> \"{comment}\"")]
    Mismatch {
        element: &'static str,
        variable: &'static str,
        text: String,
        comment: String,
    },
}

/// A child scope claims to predate its parent scope
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} < {other_field}: {} < {}", value.to_rfc3339(), other_value.to_rfc3339())]
pub struct OrderingError {
    pub field: String,
    pub value: Timestamp,
    pub other_field: String,
    pub other_value: Timestamp,
}

/// Description summary could not be computed
#[derive(Debug, Error)]
#[error("Unable to parse description as HTML: {0}")]
pub struct SummaryError(#[from] roxmltree::Error);
