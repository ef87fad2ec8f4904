//! # Inheritance Resolver
//!
//! Reduces every record to its *effective* property set: the properties
//! whose normalized value differs from what the record would inherit from
//! its parent chain anyway.
//!
//! Records are visited in collection order. A parent always precedes its
//! children there, so the parent's fully inherited set is ready by the time
//! a child needs it; a parent that shows up later (or a record naming
//! itself) is rejected rather than chased.
//!
//! Comparison is on [`PropertyValue::normalized`] values: `"true"`, `" true "`
//! and `true` are the same boolean, `"True"` is just text.

use crate::catalog::PropertyCatalog;
use crate::collection::RecordCollection;
use crate::error::{BrowscapError, Result};
use crate::filter::PropertyFilter;
use crate::model::{PropertyValue, Record, COMMENT_PROPERTY};
use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::debug;

/// A record reduced to what it adds over its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRow<'a> {
    /// Position of the record in the collection.
    pub index: usize,
    pub key: &'a str,
    pub identifying_name: Option<&'a str>,
    pub parent_key: Option<&'a str>,
    /// The record carries its own `Comment`, i.e. it heads a group of
    /// children rather than standing for a user agent itself.
    pub has_children_comment: bool,
    /// Effective output properties in catalog order. `Parent` lives in
    /// `parent_key`, not here.
    pub properties: IndexMap<&'a str, PropertyValue>,
}

fn structure(message: String) -> BrowscapError {
    BrowscapError::Structure(message)
}

/// Looks up a record's parent, which must exist and come before it.
fn parent_before(
    collection: &RecordCollection,
    record: &Record,
    parent_key: &str,
    index: usize,
) -> Result<usize> {
    let parent_index = collection.index_of(parent_key).ok_or_else(|| {
        structure(format!(
            "Parent \"{}\" of \"{}\" does not exist",
            parent_key, record.key
        ))
    })?;
    if parent_index >= index {
        return Err(structure(format!(
            "Parent \"{}\" of \"{}\" must be defined before it",
            parent_key, record.key
        )));
    }
    Ok(parent_index)
}

pub fn resolve<'a>(
    collection: &'a RecordCollection,
    catalog: &PropertyCatalog,
    filter: &dyn PropertyFilter,
) -> Result<Vec<ResolvedRow<'a>>> {
    let records = collection.records();
    let mut inherited: Vec<HashMap<&'a str, PropertyValue>> = Vec::with_capacity(records.len());
    let mut rows = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        for (name, value) in &record.properties {
            catalog
                .require(&record.key, name)?
                .check_value(&record.key, value)?;
        }

        let own: IndexMap<&'a str, PropertyValue> = record
            .properties
            .iter()
            .map(|(name, value)| (name.as_str(), value.normalized()))
            .collect();

        let (effective, parent_key) = if record.is_root() {
            // Roots keep their full set; a declared Parent is still linked.
            let parent_key = record.parent_key.as_deref();
            if let Some(parent_key) = parent_key {
                parent_before(collection, record, parent_key, index)?;
            }
            inherited.push(own.iter().map(|(k, v)| (*k, v.clone())).collect());
            (own, parent_key)
        } else {
            let parent_key = record.parent_key.as_deref().ok_or_else(|| {
                structure(format!("\"Parent\" is missing for key \"{}\"", record.key))
            })?;
            let parent_index = parent_before(collection, record, parent_key, index)?;

            let parent_full = &inherited[parent_index];
            let effective: IndexMap<&'a str, PropertyValue> = own
                .iter()
                .filter(|(name, value)| parent_full.get(*name) != Some(*value))
                .map(|(name, value)| (*name, value.clone()))
                .collect();

            let mut full = parent_full.clone();
            full.extend(own);
            inherited.push(full);
            (effective, Some(parent_key))
        };

        let has_children_comment = effective
            .get(COMMENT_PROPERTY)
            .is_some_and(|comment| !comment.is_blank());

        rows.push(ResolvedRow {
            index,
            key: &record.key,
            identifying_name: record.identifying_name.as_deref(),
            parent_key,
            has_children_comment,
            properties: output_properties(effective, catalog, filter),
        });
    }

    debug!(rows = rows.len(), flavor = %filter.flavor(), "resolved inheritance");
    Ok(rows)
}

/// Restricts an effective set to emitted, non-extra properties the filter
/// admits, reordered into catalog order.
fn output_properties<'a>(
    mut effective: IndexMap<&'a str, PropertyValue>,
    catalog: &PropertyCatalog,
    filter: &dyn PropertyFilter,
) -> IndexMap<&'a str, PropertyValue> {
    catalog
        .iter()
        .filter(|info| info.output && !info.extra && filter.includes(info))
        .filter_map(|info| effective.shift_remove_entry(info.name.as_str()))
        .collect()
}
