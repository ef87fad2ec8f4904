use crate::error::Result;
use crate::store::fs::read_json;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILENAME: &str = "browscap.json";
const DEFAULT_VERSION: &str = "0";

/// Build configuration, read from `browscap.json` at the resource root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildConfig {
    /// Data version stamped into the artifact header
    #[serde(default)]
    pub version: Option<String>,

    /// Release date text stamped into the artifact header
    #[serde(default)]
    pub released: Option<String>,

    /// Header comment lines
    #[serde(default = "default_comments")]
    pub comments: Vec<String>,
}

fn default_comments() -> Vec<String> {
    vec![
        "Provided courtesy of https://browscap.org/".to_string(),
        "Created and maintained by the Browser Capabilities Project".to_string(),
        "Do NOT edit manually: this file is generated from the browscap resource tree."
            .to_string(),
    ]
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            version: None,
            released: None,
            comments: default_comments(),
        }
    }
}

/// The `{Version, Released}` pair as it appears in the artifact.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VersionData {
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Released")]
    pub released: String,
}

impl BuildConfig {
    /// Load config from the given directory, or return defaults if not found.
    /// The file is held to the same empty/ASCII/JSON rules as resource files.
    pub fn load<P: AsRef<Path>>(resource_dir: P) -> Result<Self> {
        let config_path = resource_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        read_json(&config_path)
    }

    pub fn with_version(mut self, version: Option<String>) -> Self {
        if version.is_some() {
            self.version = version;
        }
        self
    }

    pub fn with_released(mut self, released: Option<String>) -> Self {
        if released.is_some() {
            self.released = released;
        }
        self
    }

    pub fn version_data(&self) -> VersionData {
        VersionData {
            version: self
                .version
                .clone()
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            released: self.released.clone().unwrap_or_default(),
        }
    }
}
