//! TLD Parser
//!
//! Parses JSP tag library descriptors (`*.tld`) into a documentation model.
//! Beyond the standard elements, descriptors may carry extra metadata in
//! standalone comments:
//! - dates (`dateCreated`, `datePublished`, `dateModified`, `dateReviewed`),
//!   inherited down the taglib → tag/function → attribute hierarchy
//! - generics for types and signatures (`type`, `methodSignature`,
//!   `functionSignature`), checked against the plain element text
//! - `allowRobots` on tags and functions

pub mod config;
pub mod dates;
pub mod error;
pub mod generics;
pub mod model;
pub mod robots;
pub mod summary;
pub mod xml;

pub use config::ParserConfig;
pub use dates::{Dates, Timestamp};
pub use error::{
    ExtractionError, MetadataError, OrderingError, ReconcileError, Result, SummaryError, TldError,
};
pub use generics::{reconcile, GenericsField};
pub use model::{Attribute, DeferredMethod, DeferredValue, Function, Tag, Taglib};
pub use summary::summarize;
pub use xml::extract;
