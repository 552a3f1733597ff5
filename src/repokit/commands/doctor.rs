//! Read-only consistency check of the provenance store.
//!
//! Findings are reported, never fixed: the store is the provenance record and
//! only registration rewrites it.

use crate::commands::{CmdMessage, CmdResult, Context};
use crate::error::Result;
use crate::inventory::extension_of;
use crate::model::DatasetRecord;
use crate::store::DataStore;
use std::collections::BTreeSet;
use std::path::Path;

const SIZE_TOLERANCE_MB: f64 = 1e-6;

pub fn run<S: DataStore>(store: &S, ctx: &Context<'_>) -> Result<CmdResult> {
    let records = store.load()?;
    let mut result = CmdResult::default();

    let findings: Vec<String> = records.iter().flat_map(|r| check(r, ctx)).collect();

    if findings.is_empty() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "{} inconsistencies found in {}:",
            findings.len(),
            store.location()
        )));
        for finding in findings {
            result.add_message(CmdMessage::warning(format!("  - {}", finding)));
        }
    }

    Ok(result)
}

fn check(record: &DatasetRecord, ctx: &Context<'_>) -> Vec<String> {
    let mut findings = Vec::new();
    let name = &record.data_name;

    if !ctx.paths.resolve(&record.destination).exists() {
        findings.push(format!(
            "{}: destination {} no longer exists",
            name, record.destination
        ));
    }

    if record.data_files.len() != record.number_of_files
        || record.data_size.len() != record.number_of_files
    {
        findings.push(format!(
            "{}: {} files, {} sizes, number_of_files is {}",
            name,
            record.data_files.len(),
            record.data_size.len(),
            record.number_of_files
        ));
    }

    let total: f64 = record.data_size.iter().sum();
    if (total - record.total_size_mb).abs() > SIZE_TOLERANCE_MB {
        findings.push(format!(
            "{}: total_size_mb is {:.2} but file sizes add up to {:.2}",
            name, record.total_size_mb, total
        ));
    }

    let formats: BTreeSet<String> = record
        .data_files
        .iter()
        .map(|f| extension_of(Path::new(f)))
        .collect();
    if formats != record.file_formats {
        findings.push(format!("{}: file_formats do not match data_files", name));
    }

    findings
}
