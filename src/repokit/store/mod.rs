//! # Storage Layer
//!
//! The provenance store is an ordered list of [`DatasetRecord`]s. The
//! [`DataStore`] trait only knows how to load and save that list; the upsert
//! rules live here once and are shared by every backend.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: a single pretty-printed JSON array on disk
//!   (`datasets.json` by default), written with write-then-rename.
//! - [`memory::InMemoryStore`]: no persistence, for tests.
//!
//! ## Identity
//!
//! A record is identified by `(data_name, destination)`, refined by `hash`
//! when the hash is non-empty (see [`DatasetRecord::key`]). Upserting a record
//! whose key matches an existing one replaces it in place, keeping its
//! position; anything else is appended. Records are never deleted here.
//!
//! ## Concurrency
//!
//! A registration does load → upsert → save with no file lock. Two processes
//! registering against the same store race and the last writer wins.

use crate::error::Result;
use crate::model::DatasetRecord;

pub mod fs;
pub mod memory;

/// Outcome of an upsert, with the position the record ended up at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted(usize),
    Replaced(usize),
}

impl Upsert {
    pub fn position(&self) -> usize {
        match self {
            Upsert::Inserted(i) | Upsert::Replaced(i) => *i,
        }
    }
}

/// Abstract interface for the provenance store.
pub trait DataStore {
    /// Load all records in store order. A store that was never written is empty.
    fn load(&self) -> Result<Vec<DatasetRecord>>;

    /// Replace the persisted records with `records`.
    fn save(&mut self, records: &[DatasetRecord]) -> Result<()>;

    /// Human-readable location of the store, for messages.
    fn location(&self) -> String;

    /// Read-modify-write a single record. Nothing is written if loading fails.
    fn upsert(&mut self, record: DatasetRecord) -> Result<Upsert> {
        let mut records = self.load()?;
        let outcome = upsert(&mut records, record);
        self.save(&records)?;
        Ok(outcome)
    }
}

pub fn upsert(records: &mut Vec<DatasetRecord>, record: DatasetRecord) -> Upsert {
    match records.iter().position(|r| r.key() == record.key()) {
        Some(i) => {
            records[i] = record;
            Upsert::Replaced(i)
        }
        None => {
            records.push(record);
            Upsert::Inserted(records.len() - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::FileStats;

    fn record(name: &str, destination: &str, hash: Option<&str>) -> DatasetRecord {
        let mut r = DatasetRecord::new(
            name.into(),
            destination.into(),
            Vec::new(),
            FileStats::default(),
        );
        r.hash = hash.map(String::from);
        r
    }

    #[test]
    fn test_upsert_appends_new_identity() {
        let mut records = vec![record("a", "data/raw/a", None)];
        let outcome = upsert(&mut records, record("b", "data/raw/b", None));
        assert_eq!(outcome, Upsert::Inserted(1));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_upsert_replaces_in_place_preserving_order() {
        let mut records = vec![
            record("a", "data/raw/a", None),
            record("b", "data/raw/b", None),
            record("c", "data/raw/c", None),
        ];
        let mut replacement = record("b", "data/raw/b", None);
        replacement.notes = Some("second run".into());

        let outcome = upsert(&mut records, replacement);
        assert_eq!(outcome, Upsert::Replaced(1));
        let names: Vec<_> = records.iter().map(|r| r.data_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(records[1].notes.as_deref(), Some("second run"));
    }

    #[test]
    fn test_same_name_different_destination_is_distinct() {
        let mut records = vec![record("a", "data/raw/a", None)];
        upsert(&mut records, record("a", "data/interim/a", None));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_hash_refines_identity() {
        let mut records = vec![record("a", "data/raw/a", Some("111"))];

        upsert(&mut records, record("a", "data/raw/a", Some("222")));
        assert_eq!(records.len(), 2);

        let outcome = upsert(&mut records, record("a", "data/raw/a", Some("222")));
        assert_eq!(outcome, Upsert::Replaced(1));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_empty_hashes_match_each_other() {
        let mut records = vec![record("a", "data/raw/a", Some(""))];
        let outcome = upsert(&mut records, record("a", "data/raw/a", None));
        assert_eq!(outcome, Upsert::Replaced(0));
    }
}
