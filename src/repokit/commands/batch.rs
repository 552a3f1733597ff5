//! Registers everything already sitting in the conventional data layout.
//!
//! Only the direct entries of each configured subfolder are discovered. Each
//! entry, file or folder, becomes one dataset named after its sanitized base
//! name; a folder's files are still inventoried recursively by the registrar.

use crate::commands::register::{register_one, Registration};
use crate::commands::{report, CmdMessage, CmdResult, Context};
use crate::error::{RepokitError, Result};
use crate::model::sanitize_name;
use crate::store::DataStore;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub fn run<S: DataStore>(store: &mut S, ctx: &Context<'_>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let data_root = ctx.data_root();

    if !data_root.is_dir() {
        result.add_message(CmdMessage::info(format!(
            "No data folder at {}, nothing to register.",
            ctx.paths.display_path(&data_root)
        )));
        return Ok(result);
    }

    let entries = discover(ctx)?;
    if entries.is_empty() {
        result.add_message(CmdMessage::info("No datasets found to register."));
        return Ok(result);
    }

    for (name, path) in entries {
        let registration =
            Registration::new(sanitize_name(&name), ctx.paths.display_path(&path));
        let record = register_one(store, ctx, registration, &mut result)?;
        result.affected_records.push(record);
    }

    report::refresh_best_effort(store, ctx, &mut result);
    Ok(result)
}

/// `(name, path)` for every registrable entry, subfolders in configured order,
/// entries sorted by name within each.
pub fn discover(ctx: &Context<'_>) -> Result<Vec<(String, PathBuf)>> {
    let data_root = ctx.data_root();
    let mut found = Vec::new();

    for subdir in &ctx.config.data_subdirs {
        let dir = data_root.join(subdir);
        if !dir.is_dir() {
            continue;
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir).map_err(RepokitError::Io)? {
            let entry = entry.map_err(RepokitError::Io)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_vcs_placeholder(&name) {
                continue;
            }
            entries.push((name, entry.path()));
        }
        entries.sort();
        debug!("discovered {} entries in {}", entries.len(), dir.display());
        found.extend(entries);
    }

    Ok(found)
}

fn is_vcs_placeholder(name: &str) -> bool {
    name.starts_with(".git")
}
