use crate::commands::{CmdMessage, CmdResult, Context};
use crate::error::Result;
use crate::model::DatasetRecord;
use crate::report::{compact_table, full_table, splice_into_readme, write_dataset_list};
use crate::store::DataStore;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Standalone report generation. Any failure here is the command's failure.
pub fn run<S: DataStore>(store: &S, ctx: &Context<'_>) -> Result<CmdResult> {
    let records = store.load()?;
    let written = write_reports(&records, ctx)?;

    let mut result = CmdResult::default();
    for path in &written {
        result.add_message(CmdMessage::success(format!(
            "Updated {}",
            ctx.paths.display_path(path)
        )));
    }
    result.written_paths = written;
    Ok(result)
}

/// Splice the compact table into the README and rewrite the full dataset list.
pub fn write_reports(records: &[DatasetRecord], ctx: &Context<'_>) -> Result<Vec<PathBuf>> {
    let readme = ctx.paths.resolve(&ctx.config.readme_path);
    let dataset_list = ctx.paths.resolve(&ctx.config.dataset_list_path);

    splice_into_readme(&compact_table(records), &readme, &ctx.config.readme_heading)?;
    debug!("spliced dataset table into {}", readme.display());

    write_dataset_list(&full_table(records), &dataset_list)?;
    debug!("wrote dataset list to {}", dataset_list.display());

    Ok(vec![readme, dataset_list])
}

/// Refresh reports after a registration. Failures become warnings; the
/// registration they follow has already been persisted.
pub(crate) fn refresh_best_effort<S: DataStore>(
    store: &S,
    ctx: &Context<'_>,
    result: &mut CmdResult,
) {
    let outcome = store
        .load()
        .and_then(|records| write_reports(&records, ctx));
    match outcome {
        Ok(written) => result.written_paths.extend(written),
        Err(e) => {
            warn!("report generation failed: {}", e);
            result.add_message(CmdMessage::warning(format!(
                "Dataset reports were not updated: {}",
                e
            )));
        }
    }
}
