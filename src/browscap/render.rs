//! Assembles the compiled tables into the artifact document.

use crate::compile::{CompiledArtifact, CompiledRow};
use crate::config::{BuildConfig, VersionData};
use crate::error::Result;
use crate::formatter::Formatter;
use crate::model::{PropertyValue, PARENT_PROPERTY};
use crate::pattern::PatternTarget;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// The artifact document, in emission order.
#[derive(Debug, Serialize)]
pub struct Artifact {
    pub comments: Vec<String>,
    #[serde(rename = "GJK_Browscap_Version")]
    pub version: VersionData,
    pub patterns: BTreeMap<String, PatternTarget>,
    /// Row index → property object serialized as JSON text.
    pub browsers: BTreeMap<usize, String>,
    #[serde(rename = "userAgents")]
    pub user_agents: BTreeMap<usize, String>,
}

impl Artifact {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Serializes one row's property object. `Parent` comes first, as a row
/// index; an empty row is still `{}`.
fn row_text(row: CompiledRow, formatter: &dyn Formatter) -> Result<String> {
    let mut object: IndexMap<String, Value> = IndexMap::with_capacity(row.properties.len() + 1);
    if let Some(parent) = row.parent {
        object.insert(
            formatter.format_property_name(PARENT_PROPERTY).into_owned(),
            Value::from(parent),
        );
    }
    for (name, value) in row.properties {
        let value = match value {
            PropertyValue::Bool(b) => Value::Bool(b),
            PropertyValue::Text(text) => {
                Value::String(formatter.format_property_value(&text, &name).into_owned())
            }
        };
        object.insert(formatter.format_property_name(&name).into_owned(), value);
    }
    Ok(serde_json::to_string(&object)?)
}

pub fn render(
    compiled: CompiledArtifact,
    config: &BuildConfig,
    formatter: &dyn Formatter,
) -> Result<Artifact> {
    let CompiledArtifact {
        patterns,
        rows,
        parents,
    } = compiled;

    let browsers = rows
        .into_iter()
        .map(|(index, row)| Ok((index, row_text(row, formatter)?)))
        .collect::<Result<BTreeMap<_, _>>>()?;

    debug!(formatter = %formatter.kind(), rows = browsers.len(), "rendered rows");
    Ok(Artifact {
        comments: config.comments.clone(),
        version: config.version_data(),
        patterns,
        browsers,
        user_agents: parents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::{JsonFormatter, XmlFormatter};

    fn compiled() -> CompiledArtifact {
        let mut artifact = CompiledArtifact::default();
        artifact.patterns.insert("^.*$".into(), PatternTarget::Index(10));
        artifact
            .patterns
            .insert("^A.*$".into(), PatternTarget::Index(2));
        artifact.rows.insert(
            2,
            CompiledRow {
                parent: Some(10),
                properties: vec![
                    ("Browser".into(), PropertyValue::text("A & B")),
                    ("JavaScript".into(), PropertyValue::Bool(true)),
                ],
            },
        );
        artifact.rows.insert(
            10,
            CompiledRow {
                parent: None,
                properties: vec![],
            },
        );
        artifact.parents.insert(10, "DefaultProperties".into());
        artifact
    }

    #[test]
    fn test_row_objects_are_text_with_parent_first() {
        let artifact = render(compiled(), &BuildConfig::default(), &JsonFormatter).unwrap();
        assert_eq!(
            artifact.browsers[&2],
            r#"{"Parent":10,"Browser":"A & B","JavaScript":true}"#
        );
        assert_eq!(artifact.browsers[&10], "{}");
    }

    #[test]
    fn test_numeric_keys_ascend_numerically() {
        let json = render(compiled(), &BuildConfig::default(), &JsonFormatter)
            .unwrap()
            .to_json()
            .unwrap();
        let two = json.find("\"2\": \"{").unwrap();
        let ten = json.find("\"10\": \"{").unwrap();
        assert!(two < ten);
    }

    #[test]
    fn test_document_shape_and_default_version() {
        let json = render(compiled(), &BuildConfig::default(), &JsonFormatter)
            .unwrap()
            .to_json()
            .unwrap();
        let doc: Value = serde_json::from_str(&json).unwrap();

        let mut keys: Vec<&str> = doc.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["GJK_Browscap_Version", "browsers", "comments", "patterns", "userAgents"]
        );
        assert_eq!(doc["GJK_Browscap_Version"]["Version"], "0");
        assert_eq!(doc["GJK_Browscap_Version"]["Released"], "");
        assert_eq!(doc["patterns"]["^.*$"], 10);
        assert_eq!(doc["userAgents"]["10"], "DefaultProperties");
    }

    #[test]
    fn test_document_field_order() {
        let json = render(compiled(), &BuildConfig::default(), &JsonFormatter)
            .unwrap()
            .to_json()
            .unwrap();
        let positions: Vec<usize> = [
            "\"comments\"",
            "\"GJK_Browscap_Version\"",
            "\"patterns\"",
            "\"browsers\"",
            "\"userAgents\"",
        ]
        .iter()
        .map(|key| json.find(key).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_xml_formatter_escapes_text_values() {
        let artifact = render(compiled(), &BuildConfig::default(), &XmlFormatter).unwrap();
        assert!(artifact.browsers[&2].contains("A &amp; B"));
        assert!(artifact.browsers[&2].contains("\"JavaScript\":true"));
    }
}
