//! Configuration management for the TLD parser

use std::env;

use crate::dates::{
    parse_timestamp, Dates, Timestamp, DATE_CREATED, DATE_MODIFIED, DATE_PUBLISHED, DATE_REVIEWED,
};
use crate::error::MetadataError;

/// CSS class marking the summary part of a description
pub const DEFAULT_SUMMARY_CLASS: &str = "semanticcms-tag-reference-summary";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Class selecting the summary elements of descriptions
    pub summary_class: String,
    /// Dates used by a taglib that declares none of its own
    pub default_dates: Option<Dates>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            summary_class: DEFAULT_SUMMARY_CLASS.to_string(),
            default_dates: None,
        }
    }
}

impl ParserConfig {
    /// Read `TLD_SUMMARY_CLASS` and the `TLD_DATE_*` variables
    pub fn from_env() -> Result<Self, MetadataError> {
        let summary_class =
            env::var("TLD_SUMMARY_CLASS").unwrap_or_else(|_| DEFAULT_SUMMARY_CLASS.to_string());
        let dates = Dates::new(
            env_timestamp("TLD_DATE_CREATED", DATE_CREATED)?,
            env_timestamp("TLD_DATE_PUBLISHED", DATE_PUBLISHED)?,
            env_timestamp("TLD_DATE_MODIFIED", DATE_MODIFIED)?,
            env_timestamp("TLD_DATE_REVIEWED", DATE_REVIEWED)?,
        );
        Ok(ParserConfig {
            summary_class,
            default_dates: (!dates.is_unknown()).then_some(dates),
        })
    }

    pub fn with_summary_class(mut self, summary_class: impl Into<String>) -> Self {
        self.summary_class = summary_class.into();
        self
    }

    pub fn with_default_dates(mut self, default_dates: Option<Dates>) -> Self {
        self.default_dates = default_dates;
        self
    }
}

fn env_timestamp(key: &str, variable: &'static str) -> Result<Option<Timestamp>, MetadataError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => parse_timestamp(variable, &value).map(Some),
        _ => Ok(None),
    }
}
