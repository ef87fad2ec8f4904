//! Turning division files into records.
//!
//! A user agent becomes one record keyed by its `userAgent` string. Each of
//! its children expands into one record per listed platform and device,
//! with `#PLATFORM#`/`#DEVICE#` replaced in the child's match text. Children
//! always take the enclosing user agent as their parent.

use super::schema::{ChildEntry, DefinitionRefs, DivisionFile};
use crate::collection::RecordCollection;
use crate::error::{BrowscapError, Result};
use crate::model::{Definition, PropertyMap, Record};
use std::path::Path;
use tracing::debug;

const PLATFORM_PLACEHOLDER: &str = "#PLATFORM#";
const DEVICE_PLACEHOLDER: &str = "#DEVICE#";

/// Properties contributed by referenced definitions, in browser, engine,
/// device, platform order.
fn referenced_properties(collection: &RecordCollection, refs: &DefinitionRefs) -> Result<PropertyMap> {
    let mut props = PropertyMap::new();
    if let Some(key) = &refs.browser {
        props.extend(collection.browser(key)?.properties.clone());
    }
    if let Some(key) = &refs.engine {
        props.extend(collection.engine(key)?.properties.clone());
    }
    if let Some(key) = &refs.device {
        props.extend(collection.device(key)?.properties.clone());
    }
    if let Some(key) = &refs.platform {
        props.extend(collection.platform(key)?.properties.clone());
    }
    Ok(props)
}

fn expand_child(
    collection: &RecordCollection,
    parent: &str,
    child: &ChildEntry,
) -> Result<Vec<(String, PropertyMap)>> {
    let platforms: Vec<Option<&Definition>> = if child.platforms.is_empty() {
        vec![None]
    } else {
        child
            .platforms
            .iter()
            .map(|key| collection.platform(key).map(Some))
            .collect::<Result<_>>()?
    };
    let devices: Vec<Option<(&str, &Definition)>> = if child.devices.is_empty() {
        vec![None]
    } else {
        child
            .devices
            .iter()
            .map(|(name, key)| collection.device(key).map(|d| Some((name.as_str(), d))))
            .collect::<Result<_>>()?
    };
    let base = referenced_properties(collection, &child.refs)?;

    let mut expanded = Vec::with_capacity(platforms.len() * devices.len());
    for platform in &platforms {
        for device in &devices {
            let mut name = child.pattern.clone();
            let mut props = base.clone();

            if let Some(platform) = platform {
                let fragment = platform.match_fragment.as_deref().ok_or_else(|| {
                    BrowscapError::Structure(format!(
                        "platform \"{}\" used by a child of \"{}\" has no match",
                        platform.key, parent
                    ))
                })?;
                name = name.replace(PLATFORM_PLACEHOLDER, fragment);
                props.extend(platform.properties.clone());
            }
            if let Some((device_name, device)) = device {
                name = name.replace(DEVICE_PLACEHOLDER, device_name);
                props.extend(device.properties.clone());
            }
            props.extend(child.properties.clone());

            if name.contains(PLATFORM_PLACEHOLDER) || name.contains(DEVICE_PLACEHOLDER) {
                return Err(BrowscapError::Structure(format!(
                    "match \"{}\" of a child of \"{}\" still contains a placeholder",
                    name, parent
                )));
            }
            expanded.push((name, props));
        }
    }
    Ok(expanded)
}

/// Adds every record described by `file` to the collection and returns how
/// many were added.
pub fn apply_division(collection: &mut RecordCollection, file: DivisionFile, path: &Path) -> Result<usize> {
    let label = file.division.ok_or_else(|| {
        BrowscapError::Structure(format!(
            "\"division\" is missing in file \"{}\"",
            path.display()
        ))
    })?;
    debug!(division = %label, path = %path.display(), "applying division");

    let mut added = 0;
    for ua in file.user_agents {
        let mut props = referenced_properties(collection, &ua.refs)?;
        props.extend(ua.properties);
        collection.add_division(Record::new(ua.user_agent.as_str(), label.as_str(), props))?;
        added += 1;

        for child in &ua.children {
            for (name, props) in expand_child(collection, &ua.user_agent, child)? {
                let record = Record::new(name, label.as_str(), props).with_parent(ua.user_agent.as_str());
                collection.add_division(record)?;
                added += 1;
            }
        }
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::PropertyValue;

    fn props(pairs: &[(&str, &str)]) -> PropertyMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), PropertyValue::text(*v)))
            .collect()
    }

    fn collection() -> RecordCollection {
        let mut c = RecordCollection::new();
        c.add_browser(Definition::new("chrome", props(&[("Browser", "Chrome")])))
            .unwrap()
            .add_platform(
                Definition::new("android_8_0", props(&[("Platform", "Android")]))
                    .with_match("Linux; Android 8.0*"),
            )
            .unwrap()
            .add_platform(
                Definition::new("android_8_1", props(&[("Platform", "Android")]))
                    .with_match("Linux; Android 8.1*"),
            )
            .unwrap()
            .add_device(Definition::new("pixel_2", props(&[("Device_Name", "Pixel 2")])))
            .unwrap();
        c
    }

    fn division(json: &str) -> DivisionFile {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_children_expand_per_platform_and_device() {
        let mut c = collection();
        let file = division(
            r##"{
            "division": "Chrome 62.0",
            "userAgents": [{
                "userAgent": "Chrome 62.0",
                "browser": "chrome",
                "properties": {"Parent": "DefaultProperties", "Comment": "Chrome 62.0"},
                "children": [{
                    "match": "Mozilla/5.0 (#PLATFORM#; #DEVICE# Build/*) Chrome/62.0*",
                    "platforms": ["android_8_0", "android_8_1"],
                    "devices": {"Pixel 2": "pixel_2"}
                }]
            }]
        }"##,
        );

        let added = apply_division(&mut c, file, Path::new("chrome.json")).unwrap();
        assert_eq!(added, 3);

        let ua = c.get("Chrome 62.0").unwrap();
        assert_eq!(ua.properties["Browser"], PropertyValue::text("Chrome"));
        assert_eq!(ua.parent_key.as_deref(), Some("DefaultProperties"));

        let child = c
            .get("Mozilla/5.0 (Linux; Android 8.1*; Pixel 2 Build/*) Chrome/62.0*")
            .unwrap();
        assert_eq!(child.parent_key.as_deref(), Some("Chrome 62.0"));
        assert_eq!(child.properties["Device_Name"], PropertyValue::text("Pixel 2"));
        assert_eq!(child.division, "Chrome 62.0");
    }

    #[test]
    fn test_missing_division_label() {
        let mut c = collection();
        let file = division(r#"{"userAgents": []}"#);
        let err = apply_division(&mut c, file, Path::new("x.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert!(err.to_string().contains("x.json"));
    }

    #[test]
    fn test_unknown_platform_reference() {
        let mut c = collection();
        let file = division(
            r#"{"division": "d", "userAgents": [{"userAgent": "U", "properties": {"Parent": "DefaultProperties"},
                "children": [{"match": "U/#PLATFORM#", "platforms": ["beos"]}]}]}"#,
        );
        let err = apply_division(&mut c, file, Path::new("x.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_unexpanded_placeholder() {
        let mut c = collection();
        let file = division(
            r#"{"division": "d", "userAgents": [{"userAgent": "U", "properties": {"Parent": "DefaultProperties"},
                "children": [{"match": "U/#DEVICE#"}]}]}"#,
        );
        let err = apply_division(&mut c, file, Path::new("x.json")).unwrap_err();
        assert!(err.to_string().contains("placeholder"));
    }
}
