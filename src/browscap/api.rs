//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for
//! every client (the CLI, tests, embedders).
//!
//! The facade dispatches to `commands/*.rs` and returns `Result<CmdResult>`.
//! It does no printing and no file output: writing the artifact somewhere is
//! the caller's decision.
//!
//! ## Generic Over DataSource
//!
//! `BrowscapApi<S: DataSource>` runs the same pipeline over any input:
//! - Production: `BrowscapApi<FileSource>`
//! - Testing: `BrowscapApi<InMemorySource>`
//!
//! The property catalog is injected too, defaulting to
//! [`PropertyCatalog::browscap`].

use crate::catalog::PropertyCatalog;
use crate::commands::{self, build::BuildOptions, CmdResult};
use crate::error::Result;
use crate::store::DataSource;

pub struct BrowscapApi<S: DataSource> {
    source: S,
    catalog: PropertyCatalog,
}

impl<S: DataSource> BrowscapApi<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            catalog: PropertyCatalog::browscap(),
        }
    }

    pub fn with_catalog(mut self, catalog: PropertyCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn build(&self, options: &BuildOptions) -> Result<CmdResult> {
        commands::build::run(&self.source, &self.catalog, options)
    }

    pub fn check(&self) -> Result<CmdResult> {
        commands::check::run(&self.source, &self.catalog)
    }
}
