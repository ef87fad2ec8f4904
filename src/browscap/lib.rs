//! # Browscap Architecture
//!
//! Browscap compiles a hierarchical browser capability database (a tree of
//! JSON definition files) into a compact lookup artifact: an ordered table
//! of anchored user-agent patterns, each pointing at a row of minimal
//! property overrides.
//!
//! It is a library that happens to have a CLI client. The binary parses
//! arguments and writes files; everything else lives behind [`api`].
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, wired by main.rs)                      │
//! │  - Parses arguments, writes the artifact, prints messages   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Owns the data source and the property catalog            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - build: load → resolve → compile → render                 │
//! │  - check: load → resolve → compile                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataSource trait                                │
//! │  - FileSource (production), InMemorySource (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pipeline
//!
//! ```text
//!  FileSource ──► RecordCollection ──► ResolvedRow<'_> ──► CompiledArtifact ──► Artifact
//!    (store)       (collection)          (resolve)           (compile)          (render)
//! ```
//!
//! Each stage consumes an immutable view of the previous one. Resolved rows
//! borrow from the collection; the compiled artifact owns its data, so the
//! collection is dropped before rendering. Any error aborts the run before
//! a single byte of output is produced.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for `build` and `check`
//! - [`store`]: Data sources and the on-disk resource format
//! - [`collection`]: Records and definitions, keyed per namespace
//! - [`catalog`]: Property metadata (type, output, extra, flavors)
//! - [`resolve`]: Inheritance reduction to effective property sets
//! - [`pattern`]: Name → regex conversion and digit-run compression
//! - [`compile`]: Row ordering and parent rewriting
//! - [`render`]: Artifact document assembly
//! - [`filter`], [`formatter`]: Flavor filters and text escaping
//! - [`config`]: Build configuration (`browscap.json`)
//! - [`model`]: Core data types (`Record`, `Definition`, `PropertyValue`)
//! - [`error`]: Error types

pub mod api;
pub mod catalog;
pub mod collection;
pub mod commands;
pub mod compile;
pub mod config;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod model;
pub mod pattern;
pub mod render;
pub mod resolve;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;
