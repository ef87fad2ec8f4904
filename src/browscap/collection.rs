//! # Record Collection
//!
//! The in-memory graph of everything loaded from a resource tree: the keyed
//! definitions (platforms, engines, devices, browsers) and the ordered
//! division records built from them.
//!
//! Records are held in two explicit structures: an insertion-ordered `Vec`
//! and a name → position index. Parent links are names resolved through the
//! index, so "parent by name" and "parent by position" can never disagree.
//!
//! Every `add_*` operation rejects a key already present in its namespace.

use crate::error::{BrowscapError, Result};
use crate::model::{Definition, Namespace, Record};
use indexmap::IndexMap;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct RecordCollection {
    platforms: IndexMap<String, Definition>,
    engines: IndexMap<String, Definition>,
    devices: IndexMap<String, Definition>,
    browsers: IndexMap<String, Definition>,
    records: Vec<Record>,
    index: HashMap<String, usize>,
}

fn insert_unique(
    map: &mut IndexMap<String, Definition>,
    namespace: Namespace,
    definition: Definition,
) -> Result<()> {
    if map.contains_key(&definition.key) {
        return Err(BrowscapError::Duplicate {
            namespace,
            key: definition.key,
        });
    }
    map.insert(definition.key.clone(), definition);
    Ok(())
}

fn lookup<'a>(
    map: &'a IndexMap<String, Definition>,
    namespace: Namespace,
    key: &str,
) -> Result<&'a Definition> {
    map.get(key).ok_or_else(|| BrowscapError::NotFound {
        namespace,
        key: key.to_string(),
    })
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_platform(&mut self, platform: Definition) -> Result<&mut Self> {
        insert_unique(&mut self.platforms, Namespace::Platform, platform)?;
        Ok(self)
    }

    pub fn add_engine(&mut self, engine: Definition) -> Result<&mut Self> {
        insert_unique(&mut self.engines, Namespace::Engine, engine)?;
        Ok(self)
    }

    pub fn add_device(&mut self, device: Definition) -> Result<&mut Self> {
        insert_unique(&mut self.devices, Namespace::Device, device)?;
        Ok(self)
    }

    pub fn add_browser(&mut self, browser: Definition) -> Result<&mut Self> {
        insert_unique(&mut self.browsers, Namespace::Browser, browser)?;
        Ok(self)
    }

    pub fn add_division(&mut self, record: Record) -> Result<&mut Self> {
        if self.index.contains_key(&record.key) {
            return Err(BrowscapError::Duplicate {
                namespace: Namespace::Division,
                key: record.key,
            });
        }
        self.index.insert(record.key.clone(), self.records.len());
        self.records.push(record);
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Result<&Record> {
        self.index_of(key)
            .map(|i| &self.records[i])
            .ok_or_else(|| BrowscapError::NotFound {
                namespace: Namespace::Division,
                key: key.to_string(),
            })
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn platform(&self, key: &str) -> Result<&Definition> {
        lookup(&self.platforms, Namespace::Platform, key)
    }

    pub fn engine(&self, key: &str) -> Result<&Definition> {
        lookup(&self.engines, Namespace::Engine, key)
    }

    pub fn device(&self, key: &str) -> Result<&Definition> {
        lookup(&self.devices, Namespace::Device, key)
    }

    pub fn browser(&self, key: &str) -> Result<&Definition> {
        lookup(&self.browsers, Namespace::Browser, key)
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn definition_count(&self) -> usize {
        self.platforms.len() + self.engines.len() + self.devices.len() + self.browsers.len()
    }
}
