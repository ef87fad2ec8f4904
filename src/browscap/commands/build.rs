//! The full pipeline: load → resolve → compile → render.
//!
//! Each stage consumes the previous one. The record collection is released
//! as soon as the compiled tables exist, so peak memory holds at most two
//! stages at a time.

use crate::catalog::PropertyCatalog;
use crate::commands::{BuildStats, CmdMessage, CmdResult};
use crate::compile::compile;
use crate::error::Result;
use crate::filter::Flavor;
use crate::formatter::FormatterKind;
use crate::render::render;
use crate::resolve::resolve;
use crate::store::DataSource;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub flavor: Flavor,
    pub format: FormatterKind,
    /// Overrides the configured data version.
    pub version: Option<String>,
    /// Overrides the configured release date text.
    pub released: Option<String>,
}

pub fn run<S: DataSource>(
    source: &S,
    catalog: &PropertyCatalog,
    options: &BuildOptions,
) -> Result<CmdResult> {
    let config = source
        .config()?
        .with_version(options.version.clone())
        .with_released(options.released.clone());

    let collection = source.load()?;
    let filter = options.flavor.filter();
    let rows = resolve(&collection, catalog, filter.as_ref())?;
    let compiled = compile(rows)?;

    let stats = BuildStats {
        records: collection.len(),
        definitions: collection.definition_count(),
        rows: compiled.row_count(),
        patterns: compiled.pattern_count(),
        parents: compiled.parents.len(),
    };
    drop(collection);

    let formatter = options.format.formatter();
    let document = render(compiled, &config, formatter.as_ref())?.to_json()?;
    info!(
        flavor = %options.flavor,
        bytes = document.len(),
        "rendered artifact"
    );

    let mut result = CmdResult::default().with_stats(stats);
    result.add_message(CmdMessage::success(format!(
        "Compiled {} rows and {} patterns ({} flavor, version {}).",
        stats.rows,
        stats.patterns,
        options.flavor,
        config.version_data().version
    )));
    Ok(result.with_artifact(document))
}
