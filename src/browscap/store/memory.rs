use super::DataSource;
use crate::collection::RecordCollection;
use crate::config::BuildConfig;
use crate::error::Result;
use crate::model::Record;

/// A source over records that already exist in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<Record>,
    config: BuildConfig,
}

impl InMemorySource {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            config: BuildConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }
}

impl DataSource for InMemorySource {
    fn load(&self) -> Result<RecordCollection> {
        let mut collection = RecordCollection::new();
        for record in &self.records {
            collection.add_division(record.clone())?;
        }
        Ok(collection)
    }

    fn config(&self) -> Result<BuildConfig> {
        Ok(self.config.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyMap;

    #[test]
    fn test_load_preserves_order_and_rejects_duplicates() {
        let mut source = InMemorySource::new(vec![
            Record::new("DefaultProperties", "DefaultProperties", PropertyMap::new()),
            Record::new("*", "Default Browser", PropertyMap::new()),
        ]);
        let collection = source.load().unwrap();
        assert_eq!(collection.records()[1].key, "*");

        source.push(Record::new("*", "Again", PropertyMap::new()));
        assert!(source.load().is_err());
    }
}
