use super::DataStore;
use crate::error::Result;
use crate::model::DatasetRecord;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    records: Vec<DatasetRecord>,
    saves: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<DatasetRecord>) -> Self {
        Self { records, saves: 0 }
    }

    /// How many times the store has been written, so tests can assert "unchanged".
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl DataStore for InMemoryStore {
    fn load(&self) -> Result<Vec<DatasetRecord>> {
        Ok(self.records.clone())
    }

    fn save(&mut self, records: &[DatasetRecord]) -> Result<()> {
        self.records = records.to_vec();
        self.saves += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
