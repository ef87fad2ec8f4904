//! # Property Catalog
//!
//! Static metadata about every property a definition may carry: its value
//! type, whether it reaches the output at all, whether it is an "extra"
//! (internal-only) property, and which output flavors include it.
//!
//! The catalog is a plain value handed to the resolver, so tests can build
//! alternate catalogs instead of patching global state. Entry order is the
//! order properties appear in every emitted row.

use crate::error::{BrowscapError, Result};
use crate::model::PropertyValue;
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyType {
    Boolean,
    /// Free text.
    String,
    /// Text restricted to the listed values.
    InArray(Vec<&'static str>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: String,
    pub kind: PropertyType,
    pub output: bool,
    pub extra: bool,
    pub lite: bool,
    pub standard: bool,
}

impl PropertyInfo {
    pub fn new(name: impl Into<String>, kind: PropertyType) -> Self {
        Self {
            name: name.into(),
            kind,
            output: true,
            extra: false,
            lite: false,
            standard: false,
        }
    }

    pub fn lite(mut self) -> Self {
        self.lite = true;
        self.standard = true;
        self
    }

    pub fn standard(mut self) -> Self {
        self.standard = true;
        self
    }

    pub fn extra(mut self) -> Self {
        self.extra = true;
        self
    }

    pub fn internal(mut self) -> Self {
        self.output = false;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct PropertyCatalog {
    entries: IndexMap<String, PropertyInfo>,
}

const BROWSER_TYPES: &[&str] = &[
    "Useragent Anonymizer",
    "Browser",
    "Offline Browser",
    "Multimedia Player",
    "Library",
    "Feed Reader",
    "Email Client",
    "Bot/Crawler",
    "Application",
    "Tool",
    "unknown",
];

const DEVICE_TYPES: &[&str] = &[
    "Console",
    "TV Device",
    "Tablet",
    "Mobile Phone",
    "Smartphone",
    "Feature Phone",
    "Mobile Device",
    "FonePad",
    "Desktop",
    "Ebook Reader",
    "Car Entertainment System",
    "Digital Camera",
    "unknown",
];

const POINTING_METHODS: &[&str] = &[
    "joystick",
    "stylus",
    "touchscreen",
    "clickpad",
    "trackpad",
    "trackball",
    "mouse",
    "unknown",
];

const BITS: &[&str] = &["0", "8", "16", "32", "64"];

impl PropertyCatalog {
    pub fn new(entries: impl IntoIterator<Item = PropertyInfo>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|info| (info.name.clone(), info))
                .collect(),
        }
    }

    /// The catalog of the browscap property set.
    pub fn browscap() -> Self {
        use PropertyType::{Boolean, InArray, String};

        let in_array = |values: &[&'static str]| InArray(values.to_vec());

        Self::new([
            PropertyInfo::new("Parent", String).lite(),
            PropertyInfo::new("Comment", String).lite(),
            PropertyInfo::new("Browser", String).lite(),
            PropertyInfo::new("Browser_Type", in_array(BROWSER_TYPES)).extra(),
            PropertyInfo::new("Browser_Bits", in_array(BITS)).extra(),
            PropertyInfo::new("Browser_Maker", String).extra(),
            PropertyInfo::new("Browser_Modus", String).extra(),
            PropertyInfo::new("Version", String).lite(),
            PropertyInfo::new("MajorVer", String).standard(),
            PropertyInfo::new("MinorVer", String).standard(),
            PropertyInfo::new("Platform", String).lite(),
            PropertyInfo::new("Platform_Version", String).standard(),
            PropertyInfo::new("Platform_Description", String),
            PropertyInfo::new("Platform_Bits", in_array(BITS)).extra(),
            PropertyInfo::new("Platform_Maker", String).extra(),
            PropertyInfo::new("Alpha", Boolean),
            PropertyInfo::new("Beta", Boolean),
            PropertyInfo::new("Win16", Boolean),
            PropertyInfo::new("Win32", Boolean),
            PropertyInfo::new("Win64", Boolean),
            PropertyInfo::new("Frames", Boolean),
            PropertyInfo::new("IFrames", Boolean),
            PropertyInfo::new("Tables", Boolean),
            PropertyInfo::new("Cookies", Boolean),
            PropertyInfo::new("BackgroundSounds", Boolean),
            PropertyInfo::new("JavaScript", Boolean).standard(),
            PropertyInfo::new("VBScript", Boolean),
            PropertyInfo::new("JavaApplets", Boolean),
            PropertyInfo::new("ActiveXControls", Boolean),
            PropertyInfo::new("isMobileDevice", Boolean).lite(),
            PropertyInfo::new("isTablet", Boolean).lite(),
            PropertyInfo::new("isSyndicationReader", Boolean),
            PropertyInfo::new("Crawler", Boolean).standard(),
            PropertyInfo::new("isFake", Boolean),
            PropertyInfo::new("isAnonymized", Boolean),
            PropertyInfo::new("isModified", Boolean),
            PropertyInfo::new("CssVersion", in_array(&["0", "1", "2", "3"])),
            PropertyInfo::new("AolVersion", String),
            PropertyInfo::new("Device_Name", String).standard(),
            PropertyInfo::new("Device_Maker", String).standard(),
            PropertyInfo::new("Device_Type", in_array(DEVICE_TYPES)).lite(),
            PropertyInfo::new("Device_Pointing_Method", in_array(POINTING_METHODS)).standard(),
            PropertyInfo::new("Device_Code_Name", String).extra(),
            PropertyInfo::new("Device_Brand_Name", String).extra(),
            PropertyInfo::new("RenderingEngine_Name", String).extra(),
            PropertyInfo::new("RenderingEngine_Version", String).extra(),
            PropertyInfo::new("RenderingEngine_Description", String).extra(),
            PropertyInfo::new("RenderingEngine_Maker", String).extra(),
            PropertyInfo::new("PatternId", String).internal(),
        ])
    }

    pub fn get(&self, name: &str) -> Option<&PropertyInfo> {
        self.entries.get(name)
    }

    /// Looks up a property, failing with a structural error that names the
    /// record the property was found on.
    pub fn require(&self, record_key: &str, name: &str) -> Result<&PropertyInfo> {
        self.entries.get(name).ok_or_else(|| {
            BrowscapError::Structure(format!(
                "property \"{}\" of \"{}\" is not a known property",
                name, record_key
            ))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyInfo> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PropertyInfo {
    /// Checks an enumerated value against the allowed set. Booleans and free
    /// text always pass.
    pub fn check_value(&self, record_key: &str, value: &PropertyValue) -> Result<()> {
        let PropertyType::InArray(allowed) = &self.kind else {
            return Ok(());
        };
        let text = value.to_string();
        if allowed.contains(&text.trim()) {
            return Ok(());
        }
        Err(BrowscapError::Structure(format!(
            "invalid value \"{}\" for property \"{}\" of \"{}\"",
            text, self.name, record_key
        )))
    }
}
