use crate::catalog::PropertyCatalog;
use crate::commands::{BuildStats, CmdMessage, CmdResult};
use crate::compile::compile;
use crate::error::Result;
use crate::filter::FullFilter;
use crate::resolve::resolve;
use crate::store::DataSource;

/// Validates a source without rendering anything.
pub fn run<S: DataSource>(source: &S, catalog: &PropertyCatalog) -> Result<CmdResult> {
    source.config()?;
    let collection = source.load()?;
    let rows = resolve(&collection, catalog, &FullFilter)?;
    let compiled = compile(rows)?;

    let stats = BuildStats {
        records: collection.len(),
        definitions: collection.definition_count(),
        rows: compiled.row_count(),
        patterns: compiled.pattern_count(),
        parents: compiled.parents.len(),
    };

    let mut result = CmdResult::default().with_stats(stats);
    result.add_message(CmdMessage::info(format!(
        "{} definitions, {} records, {} patterns.",
        stats.definitions, stats.records, stats.patterns
    )));
    if stats.patterns == 0 {
        result.add_message(CmdMessage::warning("No record produces a pattern."));
    }
    result.add_message(CmdMessage::success("Resources are valid."));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::{PropertyMap, PropertyValue, Record};
    use crate::store::memory::InMemorySource;

    fn record(key: &str, parent: Option<&str>) -> Record {
        let mut props = PropertyMap::new();
        if let Some(parent) = parent {
            props.insert("Parent".into(), PropertyValue::text(parent));
        }
        Record::new(key, "Test", props)
    }

    #[test]
    fn test_accepts_valid_source() {
        let source = InMemorySource::new(vec![
            record("DefaultProperties", None),
            record("*", None),
        ]);
        let result = run(&source, &PropertyCatalog::browscap()).unwrap();
        assert!(result.artifact.is_none());
        assert_eq!(result.stats.records, 2);
        assert_eq!(result.messages.last().unwrap().level, MessageLevel::Success);
    }

    #[test]
    fn test_warns_without_patterns() {
        let source = InMemorySource::new(vec![record("DefaultProperties", None)]);
        let result = run(&source, &PropertyCatalog::browscap()).unwrap();
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning));
    }

    #[test]
    fn test_rejects_dangling_parent() {
        let source = InMemorySource::new(vec![
            record("DefaultProperties", None),
            record("Orphan/1.0", Some("Nobody")),
        ]);
        assert!(run(&source, &PropertyCatalog::browscap()).is_err());
    }
}
