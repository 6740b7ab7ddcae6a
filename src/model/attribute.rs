//! `<attribute>` elements of a tag

use roxmltree::Node;
use serde::Serialize;

use crate::config::ParserConfig;
use crate::dates::Dates;
use crate::error::{MetadataError, Result, TldError};
use crate::generics::{child_with_generics, GenericsField};
use crate::summary::summarize_first;
use crate::xml::{child_element_by_tag, child_text_content, child_texts, parse_boolean};

use super::required_name;

/// Tag attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub name: String,
    pub dates: Dates,
    pub descriptions: Vec<String>,
    pub required: bool,
    pub rtexprvalue: bool,
    pub fragment: bool,
    /// Attribute type, with generics when declared in a `type` comment
    pub r#type: Option<String>,
    pub deferred_method: Option<DeferredMethod>,
    pub deferred_value: Option<DeferredValue>,
    pub description_summary: Option<String>,
}

/// `<deferred-method>` of an attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeferredMethod {
    pub method_signature: Option<String>,
}

/// `<deferred-value>` of an attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeferredValue {
    pub r#type: Option<String>,
}

impl DeferredMethod {
    pub fn parse(element: Node<'_, '_>, path: &str) -> Result<Self> {
        let method_signature = child_with_generics(element, &GenericsField::METHOD_SIGNATURE)
            .map_err(|e| TldError::at(format!("{path}/deferred-method"), e))?;
        Ok(DeferredMethod { method_signature })
    }
}

impl DeferredValue {
    pub fn parse(element: Node<'_, '_>, path: &str) -> Result<Self> {
        let r#type = child_with_generics(element, &GenericsField::TYPE)
            .map_err(|e| TldError::at(format!("{path}/deferred-value"), e))?;
        Ok(DeferredValue { r#type })
    }
}

impl Attribute {
    /// Build an attribute of the tag at `tag_path`, whose dates are already final
    pub fn parse(
        config: &ParserConfig,
        tag_path: &str,
        tag_dates: &Dates,
        element: Node<'_, '_>,
    ) -> Result<Self> {
        let name = required_name(element, tag_path, "attribute")?;
        let path = format!("{tag_path}/{name}");
        let at = |e: MetadataError| TldError::at(path.clone(), e);

        let dates = Dates::from_comments(element, Some(*tag_dates)).map_err(at)?;
        dates
            .check_not_before(&path, tag_dates, tag_path)
            .map_err(|e| at(e.into()))?;

        let descriptions = child_texts(element, "description");
        let required = parse_boolean(child_text_content(element, "required").map_err(at)?.as_deref());
        let rtexprvalue =
            parse_boolean(child_text_content(element, "rtexprvalue").map_err(at)?.as_deref());
        let fragment = parse_boolean(child_text_content(element, "fragment").map_err(at)?.as_deref());
        let r#type = child_with_generics(element, &GenericsField::TYPE).map_err(at)?;

        let deferred_method = child_element_by_tag(element, "deferred-method")
            .map_err(at)?
            .map(|e| DeferredMethod::parse(e, &path))
            .transpose()?;
        let deferred_value = child_element_by_tag(element, "deferred-value")
            .map_err(at)?
            .map(|e| DeferredValue::parse(e, &path))
            .transpose()?;

        let description_summary = summarize_first(&config.summary_class, &descriptions)
            .map_err(|source| TldError::Summary {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Parsed attribute {}", path);
        Ok(Attribute {
            name,
            dates,
            descriptions,
            required,
            rtexprvalue,
            fragment,
            r#type,
            deferred_method,
            deferred_value,
            description_summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::parse_timestamp;
    use crate::error::ReconcileError;
    use crate::xml::parse_document;

    fn parse(xml: &str, tag_dates: &Dates) -> Result<Attribute> {
        let doc = parse_document(xml).unwrap();
        Attribute::parse(&ParserConfig::default(), "/x.tld/out", tag_dates, doc.root_element())
    }

    #[test]
    fn test_parse_attribute() {
        let attr = parse(
            r#"<attribute>
                <!-- type = "java.util.List<String>" -->
                <description>The items</description>
                <name>items</name>
                <required>true</required>
                <rtexprvalue>TRUE</rtexprvalue>
                <type>java.util.List</type>
            </attribute>"#,
            &Dates::UNKNOWN,
        )
        .unwrap();
        assert_eq!(attr.name, "items");
        assert!(attr.required);
        assert!(attr.rtexprvalue);
        assert!(!attr.fragment);
        assert_eq!(attr.r#type.as_deref(), Some("java.util.List<String>"));
        assert_eq!(attr.description_summary.as_deref(), Some("The items"));
        assert!(attr.deferred_method.is_none());
        assert!(attr.dates.is_unknown());
    }

    #[test]
    fn test_deferred_children() {
        let attr = parse(
            r#"<attribute>
                <name>action</name>
                <deferred-method>
                    <!-- methodSignature = "void run(java.util.List<String>)" -->
                    <method-signature>void run(java.util.List)</method-signature>
                </deferred-method>
                <deferred-value><type>java.lang.Object</type></deferred-value>
            </attribute>"#,
            &Dates::UNKNOWN,
        )
        .unwrap();
        assert_eq!(
            attr.deferred_method.unwrap().method_signature.as_deref(),
            Some("void run(java.util.List<String>)")
        );
        assert_eq!(attr.deferred_value.unwrap().r#type.as_deref(), Some("java.lang.Object"));
    }

    #[test]
    fn test_inherits_tag_dates() {
        let created = parse_timestamp("dateCreated", "2021-06-01").unwrap();
        let tag_dates = Dates::new(Some(created), None, None, None);
        let attr = parse("<attribute><name>a</name></attribute>", &tag_dates).unwrap();
        assert_eq!(attr.dates, tag_dates);
    }

    #[test]
    fn test_created_before_tag() {
        let created = parse_timestamp("dateCreated", "2021-06-01").unwrap();
        let tag_dates = Dates::new(Some(created), None, None, None);
        let err = parse(
            "<attribute><!-- dateCreated = '2021-05-01' --><name>a</name></attribute>",
            &tag_dates,
        )
        .unwrap_err();
        match err {
            TldError::Metadata { path, source: MetadataError::Ordering(e) } => {
                assert_eq!(path, "/x.tld/out/a");
                assert_eq!(e.field, "/x.tld/out/a/dateCreated");
                assert_eq!(e.other_field, "/x.tld/out/dateCreated");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_deferred_error_path() {
        let err = parse(
            r#"<attribute>
                <name>action</name>
                <deferred-value><!-- type = "List<T>" --></deferred-value>
            </attribute>"#,
            &Dates::UNKNOWN,
        )
        .unwrap_err();
        match err {
            TldError::Metadata { path, source } => {
                assert_eq!(path, "/x.tld/out/action/deferred-value");
                assert!(matches!(
                    source,
                    MetadataError::Reconcile(ReconcileError::OrphanAnnotation { .. })
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
