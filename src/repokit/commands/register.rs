//! # Dataset Registrar
//!
//! Turns one acquisition intent into exactly one upserted [`DatasetRecord`]:
//!
//! 1. Normalize the destination.
//! 2. An existing single file is registered as-is: no command, no snapshots.
//! 3. Otherwise create the destination folder and snapshot it.
//! 4. Run the acquisition command, if any. A missing executable or a non-zero
//!    exit aborts here and the store is never touched.
//! 5. Snapshot again. With a command, the record holds only the new files;
//!    without one, everything already in the destination.
//! 6. Describe the files, fingerprint the destination, upsert.
//! 7. Regenerate the reports. Failures there are reported as warnings and never
//!    undo the registration.

use crate::acquire::AcquisitionCommand;
use crate::commands::{report, CmdMessage, CmdResult, Context};
use crate::error::{RepokitError, Result};
use crate::inventory::{self, normalize_destination};
use crate::model::{Citation, DatasetRecord};
use crate::store::{DataStore, Upsert};
use std::fs;
use tracing::{info, warn};

const ARCHIVE_GUIDANCE: &str = "https://aeadataeditor.github.io/aea-de-guidance/preparing-for-data-deposit.html#data-structure-of-a-replication-package";

#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub data_name: String,
    pub destination: String,
    pub source: Option<String>,
    pub run_command: Option<String>,
    pub citation: Citation,
}

impl Registration {
    pub fn new(data_name: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            data_name: data_name.into(),
            destination: destination.into(),
            ..Default::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_run_command(mut self, run_command: impl Into<String>) -> Self {
        self.run_command = Some(run_command.into());
        self
    }

    pub fn with_citation(mut self, citation: Citation) -> Self {
        self.citation = citation;
        self
    }
}

pub fn run<S: DataStore>(
    store: &mut S,
    ctx: &Context<'_>,
    registration: Registration,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let record = register_one(store, ctx, registration, &mut result)?;
    result.affected_records.push(record);

    report::refresh_best_effort(store, ctx, &mut result);
    Ok(result)
}

/// Register without touching the reports. Batch registration refreshes them once at the end.
pub(crate) fn register_one<S: DataStore>(
    store: &mut S,
    ctx: &Context<'_>,
    registration: Registration,
    result: &mut CmdResult,
) -> Result<DatasetRecord> {
    let Registration {
        data_name,
        destination,
        source,
        run_command,
        citation,
    } = registration;

    if data_name.trim().is_empty() {
        return Err(RepokitError::Api("Dataset name cannot be empty".into()));
    }

    let destination = normalize_destination(&destination);
    let resolved = ctx.paths.resolve(&destination);

    let mut invocation = None;
    let files = if resolved.is_file() {
        if run_command.is_some() {
            result.add_message(CmdMessage::warning(format!(
                "{} is an existing file, the run command was not executed.",
                destination
            )));
        }
        vec![resolved.clone()]
    } else {
        fs::create_dir_all(&resolved).map_err(RepokitError::Io)?;
        let before = inventory::snapshot(&resolved)?;

        match run_command.as_deref() {
            Some(command) => {
                let command = AcquisitionCommand::parse(command)?;
                let output = command.run(
                    ctx.installer,
                    &ctx.paths.root,
                    source.as_deref(),
                    &destination,
                )?;
                if !output.stdout.trim().is_empty() {
                    result.add_message(CmdMessage::info(format!(
                        "Command output:\n{}",
                        output.stdout.trim_end()
                    )));
                }
                invocation = Some(output.invocation);

                let after = inventory::snapshot(&resolved)?;
                inventory::diff(&before, &after).into_iter().collect()
            }
            None => before.into_iter().collect(),
        }
    };

    let stats = inventory::describe(&files)?;
    if stats.count > ctx.config.archive_threshold {
        warn!(
            "{} holds {} files, above the archive threshold of {}",
            destination, stats.count, ctx.config.archive_threshold
        );
        result.add_message(CmdMessage::warning(format!(
            "{} holds {} files. It is recommended to archive datasets with more than {} files when creating a replication package: {}",
            data_name, stats.count, ctx.config.archive_threshold, ARCHIVE_GUIDANCE
        )));
    }

    let data_files = files.iter().map(|f| ctx.paths.display_path(f)).collect();
    let mut record = DatasetRecord::new(data_name, destination, data_files, stats)
        .under_data_root(&ctx.config.data_root)
        .with_citation(citation);
    record.source = source;
    record.run_command = invocation;
    record.hash = ctx.vcs.object_id(&resolved);

    let outcome = store.upsert(record.clone())?;
    info!(
        "stored dataset {} ({} files) at position {} in {}",
        record.data_name,
        record.number_of_files,
        outcome.position(),
        store.location()
    );
    result.add_message(match outcome {
        Upsert::Inserted(_) => {
            CmdMessage::success(format!("Added new dataset entry for {}.", record.data_name))
        }
        Upsert::Replaced(_) => CmdMessage::success(format!(
            "Updated existing dataset entry for {}.",
            record.data_name
        )),
    });

    Ok(record)
}
