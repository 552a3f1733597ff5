use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let records = store.load()?;
    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::info("No datasets registered yet."));
    }
    Ok(result.with_listed_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::FileStats;
    use crate::model::DatasetRecord;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_lists_in_store_order() {
        let records: Vec<_> = ["b", "a"]
            .iter()
            .map(|n| {
                DatasetRecord::new(
                    n.to_string(),
                    format!("data/raw/{}", n),
                    Vec::new(),
                    FileStats::default(),
                )
            })
            .collect();
        let store = InMemoryStore::with_records(records);

        let result = run(&store).unwrap();
        let names: Vec<_> = result
            .listed_records
            .iter()
            .map(|r| r.data_name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn test_empty_store_says_so() {
        let result = run(&InMemoryStore::new()).unwrap();
        assert!(result.listed_records.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
