//! Serde shapes of the resource files.

use crate::model::PropertyMap;
use indexmap::IndexMap;
use serde::Deserialize;

/// References from a user agent (or child) to keyed definitions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefinitionRefs {
    #[serde(default)]
    pub browser: Option<String>,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefinitionEntry {
    #[serde(rename = "match", default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub properties: PropertyMap,
}

/// `{"platforms": {...}}`, `{"devices": {...}}` and so on: one named section
/// of keyed definitions.
pub type DefinitionsFile = IndexMap<String, IndexMap<String, DefinitionEntry>>;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionFile {
    #[serde(default)]
    pub division: Option<String>,
    #[serde(default)]
    pub sort_index: i64,
    #[serde(default)]
    pub user_agents: Vec<UserAgentEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAgentEntry {
    pub user_agent: String,
    #[serde(flatten)]
    pub refs: DefinitionRefs,
    #[serde(default)]
    pub properties: PropertyMap,
    #[serde(default)]
    pub children: Vec<ChildEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChildEntry {
    #[serde(rename = "match")]
    pub pattern: String,
    #[serde(flatten)]
    pub refs: DefinitionRefs,
    /// Platform keys; the child expands once per platform.
    #[serde(default)]
    pub platforms: Vec<String>,
    /// Device match text → device key; the child expands once per device.
    #[serde(default)]
    pub devices: IndexMap<String, String>,
    #[serde(default)]
    pub properties: PropertyMap,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyValue;

    #[test]
    fn test_parse_division_file() {
        let json = r#"{
            "division": "Chrome 62.0",
            "sortIndex": 100,
            "userAgents": [{
                "userAgent": "Chrome 62.0",
                "browser": "chrome",
                "properties": {"Parent": "DefaultProperties", "Version": "62.0"},
                "children": [{
                    "match": "Mozilla/5.0 (#PLATFORM#) Chrome/62.0*",
                    "platforms": ["android_8_0"],
                    "devices": {"Pixel 2": "pixel_2"}
                }]
            }]
        }"#;

        let file: DivisionFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.division.as_deref(), Some("Chrome 62.0"));
        assert_eq!(file.sort_index, 100);
        let ua = &file.user_agents[0];
        assert_eq!(ua.refs.browser.as_deref(), Some("chrome"));
        assert!(ua.refs.engine.is_none());
        assert_eq!(ua.properties["Version"], PropertyValue::text("62.0"));
        assert_eq!(ua.children[0].platforms, vec!["android_8_0"]);
        assert_eq!(ua.children[0].devices["Pixel 2"], "pixel_2");
    }

    #[test]
    fn test_parse_definitions_file() {
        let json = r#"{"platforms": {"android_8_0": {"match": "Linux; Android 8.0*", "properties": {"Platform": "Android"}}}}"#;
        let file: DefinitionsFile = serde_json::from_str(json).unwrap();
        let entry = &file["platforms"]["android_8_0"];
        assert_eq!(entry.pattern.as_deref(), Some("Linux; Android 8.0*"));
    }
}
