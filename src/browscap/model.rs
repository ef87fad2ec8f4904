use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;

/// Key of the abstract root every browser record eventually inherits from.
pub const DEFAULT_PROPERTIES: &str = "DefaultProperties";
/// Key of the catch-all record matching any user agent.
pub const DEFAULT_BROWSER: &str = "*";

pub const PARENT_PROPERTY: &str = "Parent";
pub const COMMENT_PROPERTY: &str = "Comment";

/// Identity namespaces. Keys must be unique within a namespace, not across them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Platform,
    Engine,
    Device,
    Browser,
    Division,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Namespace::Platform => "platform",
            Namespace::Engine => "engine",
            Namespace::Device => "device",
            Namespace::Browser => "browser",
            Namespace::Division => "division",
        };
        f.write_str(name)
    }
}

/// A raw property value as authored in the definition files.
///
/// Comparison between values goes through [`PropertyValue::normalized`]:
/// text is trimmed, and the exact literals `true`/`false` become booleans.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawValue")]
pub enum PropertyValue {
    Bool(bool),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl From<RawValue> for PropertyValue {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Bool(b) => PropertyValue::Bool(b),
            RawValue::Number(n) => PropertyValue::Text(n.to_string()),
            RawValue::Text(s) => PropertyValue::Text(s),
        }
    }
}

impl PropertyValue {
    pub fn text(s: impl Into<String>) -> Self {
        PropertyValue::Text(s.into())
    }

    pub fn normalized(&self) -> PropertyValue {
        match self {
            PropertyValue::Bool(b) => PropertyValue::Bool(*b),
            PropertyValue::Text(s) => match s.trim() {
                "true" => PropertyValue::Bool(true),
                "false" => PropertyValue::Bool(false),
                trimmed => PropertyValue::Text(trimmed.to_string()),
            },
        }
    }

    /// True for values that carry no information (empty text or `false`).
    pub fn is_blank(&self) -> bool {
        match self {
            PropertyValue::Bool(b) => !b,
            PropertyValue::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Text(s) => f.write_str(s),
        }
    }
}

pub type PropertyMap = IndexMap<String, PropertyValue>;

/// A keyed property bundle (platform, engine, device or browser) that
/// user-agent definitions pull in by key.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub key: String,
    /// Fragment substituted for `#PLATFORM#` placeholders (platforms only).
    pub match_fragment: Option<String>,
    pub properties: PropertyMap,
}

impl Definition {
    pub fn new(key: impl Into<String>, properties: PropertyMap) -> Self {
        Self {
            key: key.into(),
            match_fragment: None,
            properties,
        }
    }

    pub fn with_match(mut self, fragment: impl Into<String>) -> Self {
        self.match_fragment = Some(fragment.into());
        self
    }
}

/// One division entry of the capability hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub key: String,
    pub parent_key: Option<String>,
    /// The user-agent string this record stands for; `None` for abstract roots.
    pub identifying_name: Option<String>,
    pub division: String,
    pub properties: PropertyMap,
}

impl Record {
    /// Builds a record whose identifying name is its key.
    ///
    /// A `Parent` entry in `properties` is lifted into `parent_key`.
    pub fn new(key: impl Into<String>, division: impl Into<String>, mut properties: PropertyMap) -> Self {
        let key = key.into();
        let parent_key = properties
            .shift_remove(PARENT_PROPERTY)
            .map(|v| v.to_string().trim().to_string());
        let identifying_name = if key == DEFAULT_PROPERTIES {
            None
        } else {
            Some(key.clone())
        };
        Self {
            key,
            parent_key,
            identifying_name,
            division: division.into(),
            properties,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_key = Some(parent.into());
        self
    }

    pub fn is_root(&self) -> bool {
        self.key == DEFAULT_PROPERTIES || self.key == DEFAULT_BROWSER
    }
}
