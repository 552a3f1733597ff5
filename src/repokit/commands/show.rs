use crate::commands::CmdResult;
use crate::error::{RepokitError, Result};
use crate::store::DataStore;

/// Every record registered under `name`, one per identity.
pub fn run<S: DataStore>(store: &S, name: &str) -> Result<CmdResult> {
    let matches: Vec<_> = store
        .load()?
        .into_iter()
        .filter(|r| r.data_name == name)
        .collect();

    if matches.is_empty() {
        return Err(RepokitError::Api(format!("No dataset named {}", name)));
    }
    Ok(CmdResult::default().with_listed_records(matches))
}
