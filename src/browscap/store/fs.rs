use super::division::apply_division;
use super::schema::{DefinitionsFile, DivisionFile};
use super::DataSource;
use crate::collection::RecordCollection;
use crate::config::BuildConfig;
use crate::error::{BrowscapError, Result};
use crate::model::{Definition, DEFAULT_PROPERTIES};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DEFINITION_DIRS: [&str; 4] = ["platforms", "engines", "devices", "browsers"];
const USER_AGENTS_DIR: &str = "user-agents";
const CORE_FILES: [&str; 2] = ["core/default-properties.json", "core/default-browser.json"];

/// Loads a resource tree from disk.
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn require_dir(&self, name: &str) -> Result<PathBuf> {
        let dir = self.root.join(name);
        if !dir.is_dir() {
            return Err(BrowscapError::MissingDirectory(dir));
        }
        Ok(dir)
    }

    fn require_file(&self, name: &str) -> Result<PathBuf> {
        let file = self.root.join(name);
        if !file.is_file() {
            return Err(BrowscapError::MissingFile(file));
        }
        Ok(file)
    }

    fn add_definitions(
        &self,
        collection: &mut RecordCollection,
        section: &str,
        files: &[PathBuf],
    ) -> Result<()> {
        for path in files {
            let mut file: DefinitionsFile = read_json(path)?;
            let entries = file.shift_remove(section).ok_or_else(|| {
                BrowscapError::Structure(format!(
                    "file \"{}\" has no \"{}\" section",
                    path.display(),
                    section
                ))
            })?;
            debug!(path = %path.display(), count = entries.len(), "loading {}", section);

            for (key, entry) in entries {
                let mut definition = Definition::new(key, entry.properties);
                if let Some(pattern) = entry.pattern {
                    definition = definition.with_match(pattern);
                }
                match section {
                    "platforms" => collection.add_platform(definition)?,
                    "engines" => collection.add_engine(definition)?,
                    "devices" => collection.add_device(definition)?,
                    _ => collection.add_browser(definition)?,
                };
            }
        }
        Ok(())
    }
}

/// Lists the `.json` files of a directory in file-name order.
fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| BrowscapError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| BrowscapError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    if files.is_empty() {
        return Err(BrowscapError::EmptyDirectory(dir.to_path_buf()));
    }
    files.sort();
    Ok(files)
}

/// Reads one resource file: must be non-empty, pure ASCII, well-formed JSON.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).map_err(|e| BrowscapError::io(path, e))?;
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(BrowscapError::EmptyFile(path.to_path_buf()));
    }
    if !bytes.is_ascii() {
        return Err(BrowscapError::NonAscii(path.to_path_buf()));
    }
    serde_json::from_slice(&bytes).map_err(|source| BrowscapError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

impl DataSource for FileSource {
    fn load(&self) -> Result<RecordCollection> {
        if !self.root.is_dir() {
            return Err(BrowscapError::MissingDirectory(self.root.clone()));
        }

        let mut definition_files = Vec::with_capacity(DEFINITION_DIRS.len());
        for name in DEFINITION_DIRS {
            let dir = self.require_dir(name)?;
            definition_files.push((name, json_files(&dir)?));
        }
        let division_files = json_files(&self.require_dir(USER_AGENTS_DIR)?)?;
        let core_files = CORE_FILES
            .iter()
            .map(|name| self.require_file(name))
            .collect::<Result<Vec<_>>>()?;

        let mut collection = RecordCollection::new();
        for (section, files) in &definition_files {
            self.add_definitions(&mut collection, section, files)?;
        }

        for path in &core_files {
            let file: DivisionFile = read_json(path)?;
            apply_division(&mut collection, file, path)?;
        }

        let mut divisions = Vec::with_capacity(division_files.len());
        for path in division_files {
            let file: DivisionFile = read_json(&path)?;
            divisions.push((path, file));
        }
        // stable: equal sortIndex keeps file-name order
        divisions.sort_by_key(|(_, file)| file.sort_index);
        for (path, file) in divisions {
            apply_division(&mut collection, file, &path)?;
        }

        if collection.index_of(DEFAULT_PROPERTIES).is_none() {
            return Err(BrowscapError::Structure(format!(
                "\"{}\" is not defined in \"{}\"",
                DEFAULT_PROPERTIES,
                self.root.join(CORE_FILES[0]).display()
            )));
        }

        info!(
            records = collection.len(),
            definitions = collection.definition_count(),
            "loaded resource tree"
        );
        Ok(collection)
    }

    fn config(&self) -> Result<BuildConfig> {
        BuildConfig::load(&self.root)
    }
}
