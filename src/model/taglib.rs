//! The `<taglib>` root of a descriptor

use std::collections::HashSet;
use std::path::Path;

use roxmltree::{Document, Node};
use serde::Serialize;

use crate::config::ParserConfig;
use crate::dates::Dates;
use crate::error::{MetadataError, Result, TldError};
use crate::xml::{child_elements_by_tag, child_text_content, child_texts, parse_document};

use super::{Function, Tag};

/// Parsed tag library descriptor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Taglib {
    pub tld_path: String,
    pub dates: Dates,
    pub descriptions: Vec<String>,
    pub display_names: Vec<String>,
    pub tlib_version: Option<String>,
    pub short_name: Option<String>,
    pub uri: Option<String>,
    /// Tags in document order
    pub tags: Vec<Tag>,
    /// Merged dates of all tags, `None` when there are no tags
    pub tags_effective_dates: Option<Dates>,
    /// Functions in document order
    pub functions: Vec<Function>,
    /// Merged dates of all functions, `None` when there are no functions
    pub functions_effective_dates: Option<Dates>,
    /// The taglib's own dates merged with all tags and functions
    pub taglib_effective_dates: Dates,
}

impl Taglib {
    /// Read and parse a descriptor file, using its path as the `tld_path`
    pub fn from_path(config: &ParserConfig, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(config, &path.to_string_lossy(), &text)
    }

    /// Parse descriptor text
    pub fn from_str(config: &ParserConfig, tld_path: &str, text: &str) -> Result<Self> {
        let document = parse_document(text)?;
        Self::parse(config, tld_path, &document)
    }

    /// Build the model from an already parsed document.
    ///
    /// The taglib's dates are finalized before any tag or function is read,
    /// since children inherit them and must not predate them.
    pub fn parse(config: &ParserConfig, tld_path: &str, document: &Document<'_>) -> Result<Self> {
        let root = document.root_element();
        let at = |e: MetadataError| TldError::at(tld_path, e);

        let dates = Dates::from_comments(root, config.default_dates).map_err(at)?;
        let descriptions = child_texts(root, "description");
        let display_names = child_texts(root, "display-name");
        let tlib_version = child_text_content(root, "tlib-version").map_err(at)?;
        let short_name = child_text_content(root, "short-name").map_err(at)?;
        let uri = child_text_content(root, "uri").map_err(at)?;

        let tags = parse_unique(root, "tag", tld_path, |elem| {
            Tag::parse(config, tld_path, &dates, elem).map(|tag| (tag.name.clone(), tag))
        })?;
        let tags_effective_dates = Dates::merge_all(tags.iter().map(|t| t.effective_dates));

        let functions = parse_unique(root, "function", tld_path, |elem| {
            Function::parse(config, tld_path, &dates, elem).map(|f| (f.name.clone(), f))
        })?;
        let functions_effective_dates = Dates::merge_all(functions.iter().map(|f| f.dates));

        let taglib_effective_dates = Dates::merge(
            Dates::merge(Some(dates), tags_effective_dates),
            functions_effective_dates,
        )
        .unwrap_or(dates);

        tracing::info!(
            "Parsed taglib {} ({} tags, {} functions)",
            tld_path,
            tags.len(),
            functions.len()
        );
        Ok(Taglib {
            tld_path: tld_path.to_string(),
            dates,
            descriptions,
            display_names,
            tlib_version,
            short_name,
            uri,
            tags,
            tags_effective_dates,
            functions,
            functions_effective_dates,
            taglib_effective_dates,
        })
    }

    /// Look up a tag by name
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// Look up a function by name
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// Build every `kind` child in order, rejecting repeated names
fn parse_unique<'a, 'input: 'a, T>(
    root: Node<'a, 'input>,
    kind: &'static str,
    tld_path: &str,
    mut build: impl FnMut(Node<'a, 'input>) -> Result<(String, T)>,
) -> Result<Vec<T>> {
    let mut names = HashSet::new();
    let mut items = Vec::new();
    for elem in child_elements_by_tag(root, kind) {
        let (name, item) = build(elem)?;
        if !names.insert(name.clone()) {
            return Err(TldError::DuplicateName {
                path: tld_path.to_string(),
                kind,
                name,
            });
        }
        items.push(item);
    }
    Ok(items)
}
