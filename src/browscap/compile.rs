//! Row ordering, pattern compression and parent rewriting.
//!
//! The output of this stage owns all of its strings, so the record
//! collection and the resolved rows can be dropped before rendering.

use crate::error::{BrowscapError, Result};
use crate::model::PropertyValue;
use crate::pattern::{
    has_wildcard, ordering_key, to_pattern, PatternCompressor, PatternEntry, PatternTarget,
};
use crate::resolve::ResolvedRow;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRow {
    /// Row index of the parent row.
    pub parent: Option<usize>,
    pub properties: Vec<(String, PropertyValue)>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledArtifact {
    pub patterns: BTreeMap<String, PatternTarget>,
    pub rows: BTreeMap<usize, CompiledRow>,
    /// Literal names of the rows other rows point at.
    pub parents: BTreeMap<usize, String>,
}

impl CompiledArtifact {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

/// Whether a row contributes a pattern of its own. Group headers only do
/// when their name is itself a wildcard.
fn emits_pattern<'a>(row: &ResolvedRow<'a>) -> Option<&'a str> {
    let name = row.identifying_name?;
    (!row.has_children_comment || has_wildcard(name)).then_some(name)
}

pub fn compile(mut rows: Vec<ResolvedRow<'_>>) -> Result<CompiledArtifact> {
    rows.sort_by_key(|row| ordering_key(row.identifying_name.unwrap_or(row.key)));

    let positions: HashMap<&str, usize> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| (row.key, index))
        .collect();

    let mut compressor = PatternCompressor::new();
    for (index, row) in rows.iter().enumerate() {
        if let Some(name) = emits_pattern(row) {
            compressor.add(index, to_pattern(name));
        }
    }
    debug!(groups = compressor.group_count(), "grouped digit-run patterns");

    let patterns: BTreeMap<String, PatternTarget> = compressor
        .finish()
        .into_iter()
        .map(PatternEntry::into_table_entry)
        .collect();

    let mut parents = BTreeMap::new();
    let mut compiled = BTreeMap::new();
    for (index, row) in rows.into_iter().enumerate() {
        let parent = match row.parent_key {
            Some(parent_key) => {
                let parent_index = *positions.get(parent_key).ok_or_else(|| {
                    BrowscapError::Structure(format!(
                        "Parent \"{}\" of \"{}\" was not compiled",
                        parent_key, row.key
                    ))
                })?;
                parents.insert(parent_index, parent_key.to_string());
                Some(parent_index)
            }
            None => None,
        };

        let properties = row
            .properties
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        compiled.insert(index, CompiledRow { parent, properties });
    }

    debug!(
        rows = compiled.len(),
        patterns = patterns.len(),
        parents = parents.len(),
        "compiled rows"
    );
    Ok(CompiledArtifact {
        patterns,
        rows: compiled,
        parents,
    })
}
