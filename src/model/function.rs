//! `<function>` elements of a taglib

use roxmltree::Node;
use serde::Serialize;

use crate::config::ParserConfig;
use crate::dates::Dates;
use crate::error::{MetadataError, Result, TldError};
use crate::generics::{child_with_generics, GenericsField};
use crate::robots::parse_allow_robots;
use crate::summary::summarize_first;
use crate::xml::{child_text_content, child_texts};

use super::required_name;

/// EL function
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
    pub name: String,
    pub dates: Dates,
    pub allow_robots: Option<bool>,
    pub descriptions: Vec<String>,
    pub display_names: Vec<String>,
    pub function_class: Option<String>,
    /// Signature, with generics when declared in a `functionSignature` comment
    pub function_signature: Option<String>,
    pub example: Option<String>,
    pub description_summary: Option<String>,
}

impl Function {
    pub fn parse(
        config: &ParserConfig,
        tld_path: &str,
        taglib_dates: &Dates,
        element: Node<'_, '_>,
    ) -> Result<Self> {
        let name = required_name(element, tld_path, "function")?;
        let path = format!("{tld_path}/{name}");
        let at = |e: MetadataError| TldError::at(path.clone(), e);

        let dates = Dates::from_comments(element, Some(*taglib_dates)).map_err(at)?;
        dates
            .check_not_before(&path, taglib_dates, tld_path)
            .map_err(|e| at(e.into()))?;

        let allow_robots = parse_allow_robots(element).map_err(at)?;
        let descriptions = child_texts(element, "description");
        let display_names = child_texts(element, "display-name");
        let function_class = child_text_content(element, "function-class").map_err(at)?;
        let function_signature =
            child_with_generics(element, &GenericsField::FUNCTION_SIGNATURE).map_err(at)?;
        let example = child_text_content(element, "example").map_err(at)?;

        let description_summary = summarize_first(&config.summary_class, &descriptions)
            .map_err(|source| TldError::Summary {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Parsed function {} (dates {:?})", path, dates);
        Ok(Function {
            name,
            dates,
            allow_robots,
            descriptions,
            display_names,
            function_class,
            function_signature,
            example,
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

    fn parse(xml: &str, taglib_dates: &Dates) -> Result<Function> {
        let doc = parse_document(xml).unwrap();
        Function::parse(&ParserConfig::default(), "/x.tld", taglib_dates, doc.root_element())
    }

    #[test]
    fn test_parse_function() {
        let function = parse(
            r#"<function>
                <!-- functionSignature = "java.util.List<T> sorted(java.util.Collection<T>)" -->
                <!-- datePublished = "2021-01-01" -->
                <description>Sorts</description>
                <name>sorted</name>
                <function-class>com.example.Functions</function-class>
                <function-signature>java.util.List sorted(java.util.Collection)</function-signature>
                <example>${ex:sorted(items)}</example>
            </function>"#,
            &Dates::UNKNOWN,
        )
        .unwrap();
        assert_eq!(function.name, "sorted");
        assert_eq!(
            function.function_signature.as_deref(),
            Some("java.util.List<T> sorted(java.util.Collection<T>)")
        );
        assert_eq!(
            function.dates.published,
            Some(parse_timestamp("datePublished", "2021-01-01").unwrap())
        );
        assert_eq!(function.allow_robots, None);
        assert_eq!(function.example.as_deref(), Some("${ex:sorted(items)}"));
    }

    #[test]
    fn test_signature_mismatch() {
        let err = parse(
            r#"<function>
                <!-- functionSignature = "java.util.List<T> sort(java.util.Collection<T>)" -->
                <name>sorted</name>
                <function-signature>java.util.List sorted(java.util.Collection)</function-signature>
            </function>"#,
            &Dates::UNKNOWN,
        )
        .unwrap_err();
        match err {
            TldError::Metadata { path, source } => {
                assert_eq!(path, "/x.tld/sorted");
                assert!(matches!(
                    source,
                    MetadataError::Reconcile(ReconcileError::Mismatch {
                        element: "function-signature",
                        variable: "functionSignature",
                        ..
                    })
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_published_before_taglib() {
        let taglib_dates = Dates::new(
            None,
            Some(parse_timestamp("datePublished", "2021-01-01").unwrap()),
            None,
            None,
        );
        let err = parse(
            "<function><!-- datePublished = '2020-12-31' --><name>f</name></function>",
            &taglib_dates,
        )
        .unwrap_err();
        assert!(err.to_string().contains("/x.tld/f/datePublished < /x.tld/datePublished"));
    }
}
