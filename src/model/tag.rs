//! `<tag>` elements of a taglib

use std::collections::HashSet;

use roxmltree::Node;
use serde::Serialize;

use crate::config::ParserConfig;
use crate::dates::Dates;
use crate::error::{MetadataError, Result, TldError};
use crate::robots::parse_allow_robots;
use crate::summary::summarize_first;
use crate::xml::{child_elements_by_tag, child_text_content, child_texts, parse_boolean};

use super::{required_name, Attribute};

/// Custom tag
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub name: String,
    pub dates: Dates,
    pub allow_robots: Option<bool>,
    pub descriptions: Vec<String>,
    pub display_names: Vec<String>,
    pub tag_class: Option<String>,
    pub tei_class: Option<String>,
    pub body_content: Option<String>,
    /// Attributes in document order
    pub attributes: Vec<Attribute>,
    /// Merged dates of all attributes, `None` when there are no attributes
    pub attributes_effective_dates: Option<Dates>,
    /// This tag's dates merged with its attributes' dates
    pub effective_dates: Dates,
    pub dynamic_attributes: bool,
    pub example: Option<String>,
    /// Summary of the first description
    pub description_summary: Option<String>,
}

impl Tag {
    /// Build a tag of the taglib at `tld_path`, whose dates are already final
    pub fn parse(
        config: &ParserConfig,
        tld_path: &str,
        taglib_dates: &Dates,
        element: Node<'_, '_>,
    ) -> Result<Self> {
        let name = required_name(element, tld_path, "tag")?;
        let path = format!("{tld_path}/{name}");
        let at = |e: MetadataError| TldError::at(path.clone(), e);

        let dates = Dates::from_comments(element, Some(*taglib_dates)).map_err(at)?;
        dates
            .check_not_before(&path, taglib_dates, tld_path)
            .map_err(|e| at(e.into()))?;

        let allow_robots = parse_allow_robots(element).map_err(at)?;
        let descriptions = child_texts(element, "description");
        let display_names = child_texts(element, "display-name");
        let tag_class = child_text_content(element, "tag-class").map_err(at)?;
        let tei_class = child_text_content(element, "tei-class").map_err(at)?;
        let body_content = child_text_content(element, "body-content").map_err(at)?;

        let mut attributes: Vec<Attribute> = Vec::new();
        let mut names = HashSet::new();
        for attribute_elem in child_elements_by_tag(element, "attribute") {
            let attribute = Attribute::parse(config, &path, &dates, attribute_elem)?;
            if !names.insert(attribute.name.clone()) {
                return Err(TldError::DuplicateName {
                    path: path.clone(),
                    kind: "attribute",
                    name: attribute.name,
                });
            }
            attributes.push(attribute);
        }
        let attributes_effective_dates = Dates::merge_all(attributes.iter().map(|a| a.dates));
        let effective_dates =
            Dates::merge(Some(dates), attributes_effective_dates).unwrap_or(dates);

        let dynamic_attributes =
            parse_boolean(child_text_content(element, "dynamic-attributes").map_err(at)?.as_deref());
        if child_elements_by_tag(element, "variable").next().is_some() {
            return Err(TldError::Unsupported {
                path: path.clone(),
                element: "variable",
            });
        }
        let example = child_text_content(element, "example").map_err(at)?;

        let description_summary = summarize_first(&config.summary_class, &descriptions)
            .map_err(|source| TldError::Summary {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(
            "Parsed tag {} ({} attributes, dates {:?})",
            path,
            attributes.len(),
            dates
        );
        Ok(Tag {
            name,
            dates,
            allow_robots,
            descriptions,
            display_names,
            tag_class,
            tei_class,
            body_content,
            attributes,
            attributes_effective_dates,
            effective_dates,
            dynamic_attributes,
            example,
            description_summary,
        })
    }

    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::parse_timestamp;
    use crate::xml::parse_document;

    fn parse(xml: &str, taglib_dates: &Dates) -> Result<Tag> {
        let doc = parse_document(xml).unwrap();
        Tag::parse(&ParserConfig::default(), "/x.tld", taglib_dates, doc.root_element())
    }

    #[test]
    fn test_parse_tag() {
        let tag = parse(
            r#"<tag>
                <!-- allowRobots = "false" -->
                <description><![CDATA[<p>Writes text.</p>]]></description>
                <display-name>Out</display-name>
                <name>out</name>
                <tag-class>com.example.OutTag</tag-class>
                <body-content>scriptless</body-content>
                <attribute><name>value</name></attribute>
                <attribute><name>escape</name></attribute>
                <dynamic-attributes>true</dynamic-attributes>
            </tag>"#,
            &Dates::UNKNOWN,
        )
        .unwrap();
        assert_eq!(tag.name, "out");
        assert_eq!(tag.allow_robots, Some(false));
        assert_eq!(tag.descriptions, vec!["<p>Writes text.</p>"]);
        assert_eq!(tag.display_names, vec!["Out"]);
        assert_eq!(tag.tag_class.as_deref(), Some("com.example.OutTag"));
        assert_eq!(tag.tei_class, None);
        assert_eq!(tag.body_content.as_deref(), Some("scriptless"));
        assert!(tag.dynamic_attributes);
        let names: Vec<_> = tag.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["value", "escape"]);
        assert!(tag.attribute("escape").is_some());
        assert!(tag.attribute("missing").is_none());
    }

    #[test]
    fn test_duplicate_attribute() {
        let err = parse(
            "<tag><name>out</name><attribute><name>a</name></attribute><attribute><name>a</name></attribute></tag>",
            &Dates::UNKNOWN,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TldError::DuplicateName { kind: "attribute", ref name, .. } if name == "a"
        ));
    }

    #[test]
    fn test_variable_unsupported() {
        let err = parse(
            "<tag><name>out</name><variable><name-given>x</name-given></variable></tag>",
            &Dates::UNKNOWN,
        )
        .unwrap_err();
        assert!(matches!(err, TldError::Unsupported { element: "variable", .. }));
    }

    #[test]
    fn test_missing_name() {
        let err = parse("<tag><tag-class>X</tag-class></tag>", &Dates::UNKNOWN).unwrap_err();
        assert!(matches!(err, TldError::MissingName { kind: "tag", .. }));
    }

    #[test]
    fn test_effective_dates_include_attributes() {
        let taglib_dates = Dates::new(
            Some(parse_timestamp("dateCreated", "2020-01-01").unwrap()),
            None,
            Some(parse_timestamp("dateModified", "2020-02-01").unwrap()),
            None,
        );
        let tag = parse(
            r#"<tag>
                <name>out</name>
                <attribute><name>a</name></attribute>
                <attribute>
                    <!-- dateCreated = "2020-05-01" -->
                    <!-- dateModified = "2021-01-01" -->
                    <name>b</name>
                </attribute>
            </tag>"#,
            &taglib_dates,
        )
        .unwrap();
        assert_eq!(tag.dates, taglib_dates);
        assert_eq!(tag.attributes[0].dates, taglib_dates);
        let effective = tag.effective_dates;
        assert_eq!(effective.created, taglib_dates.created);
        assert_eq!(
            effective.modified,
            Some(parse_timestamp("dateModified", "2021-01-01").unwrap())
        );
    }

    #[test]
    fn test_no_attributes() {
        let tag = parse("<tag><name>out</name></tag>", &Dates::UNKNOWN).unwrap();
        assert_eq!(tag.attributes_effective_dates, None);
        assert_eq!(tag.effective_dates, tag.dates);
    }
}
