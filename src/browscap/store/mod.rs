//! # Storage Layer
//!
//! This module defines where a build gets its input from. The [`DataSource`]
//! trait lets the pipeline run against different backends.
//!
//! ## Implementations
//!
//! - [`fs::FileSource`]: the production resource tree on disk
//!   - JSON only, ASCII only
//!   - Files inside a directory are read in file-name order
//!
//! - [`memory::InMemorySource`]: prebuilt records for testing
//!   - No filesystem
//!
//! ## Resource Tree
//!
//! ```text
//! <root>/
//! ├── browscap.json                # optional build config
//! ├── core/
//! │   ├── default-properties.json  # the DefaultProperties root
//! │   └── default-browser.json     # the "*" catch-all
//! ├── platforms/*.json             # {"platforms": {key: definition}}
//! ├── engines/*.json               # {"engines":   {key: definition}}
//! ├── devices/*.json               # {"devices":   {key: definition}}
//! ├── browsers/*.json              # {"browsers":  {key: definition}}
//! └── user-agents/*.json           # division files
//! ```
//!
//! Definitions are loaded before any division, because divisions pull
//! their properties in by key. Divisions are applied core files first, then
//! by `sortIndex` (ties broken by file name), which is what guarantees a
//! parent is always added before its children.

use crate::collection::RecordCollection;
use crate::config::BuildConfig;
use crate::error::Result;

pub mod division;
pub mod fs;
pub mod memory;
pub mod schema;

/// Abstract input of a build.
pub trait DataSource {
    /// Load and validate the complete record collection.
    fn load(&self) -> Result<RecordCollection>;

    /// Build configuration that accompanies the data.
    fn config(&self) -> Result<BuildConfig>;
}
