use crate::commands::{CmdMessage, CmdResult, Context};
use crate::error::{RepokitError, Result};
use crate::model::DatasetRecord;
use crate::store::DataStore;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Pack the most recently registered dataset called `name` into
/// `<destination>.tar.gz`. The store is left alone.
pub fn run<S: DataStore>(store: &S, ctx: &Context<'_>, name: &str) -> Result<CmdResult> {
    let record = store
        .load()?
        .into_iter()
        .filter(|r| r.data_name == name)
        .max_by_key(|r| r.timestamp)
        .ok_or_else(|| RepokitError::Api(format!("No dataset named {}", name)))?;

    let mut result = CmdResult::default();
    if record.data_files.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "{} has no files to archive.",
            record.data_name
        )));
        return Ok(result);
    }

    let members = record
        .data_files
        .iter()
        .map(|file| {
            let path = ctx.paths.resolve(file);
            if path.is_file() {
                Ok((path, entry_name(file)))
            } else {
                Err(RepokitError::NotFound(path))
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let target = archive_path(ctx, &record);
    let partial = partial_path(&target);
    let written = File::create(&partial)
        .map_err(RepokitError::Io)
        .and_then(|file| write_archive(file, &members))
        .and_then(|()| fs::rename(&partial, &target).map_err(RepokitError::Io));
    if let Err(e) = written {
        let _ = fs::remove_file(&partial);
        return Err(e);
    }
    debug!(
        "archived {} files of {} into {}",
        record.data_files.len(),
        record.data_name,
        target.display()
    );

    result.add_message(CmdMessage::success(format!(
        "Archived {} files to {}",
        record.data_files.len(),
        ctx.paths.display_path(&target)
    )));
    result.written_paths.push(target);
    Ok(result.with_affected_records(vec![record]))
}

fn archive_path(ctx: &Context<'_>, record: &DatasetRecord) -> PathBuf {
    let destination = ctx.paths.resolve(&record.destination);
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| record.data_name.clone().into());
    name.push(".tar.gz");
    destination.with_file_name(name)
}

fn partial_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_os_string();
    name.push(".partial");
    PathBuf::from(name)
}

fn write_archive<W: Write>(writer: W, members: &[(PathBuf, PathBuf)]) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for (path, name) in members {
        tar.append_path_with_name(path, name)
            .map_err(RepokitError::Io)?;
    }

    tar.into_inner()
        .and_then(|enc| enc.finish())
        .map_err(RepokitError::Io)?;
    Ok(())
}

/// Archive members keep their recorded path, minus any root or prefix.
fn entry_name(file: &str) -> PathBuf {
    Path::new(file)
        .components()
        .filter(|c| matches!(c, std::path::Component::Normal(_)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::ProjectFixture;
    use crate::commands::register::{self, Registration};
    use crate::store::memory::InMemoryStore;
    use flate2::read::GzDecoder;

    fn members(path: &Path) -> Vec<String> {
        let file = File::open(path).unwrap();
        let mut archive = tar::Archive::new(GzDecoder::new(file));
        let mut names: Vec<String> = archive
            .entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_archives_next_to_destination() {
        let fx = ProjectFixture::new();
        fx.write("data/raw/survey/a.csv", 10);
        fx.write("data/raw/survey/nested/b.csv", 10);
        let mut store = InMemoryStore::new();
        register::run(
            &mut store,
            &fx.ctx(),
            Registration::new("survey", "data/raw/survey"),
        )
        .unwrap();
        let saves = store.save_count();

        let result = run(&store, &fx.ctx(), "survey").unwrap();

        let target = fx.root().join("data/raw/survey.tar.gz");
        assert_eq!(result.written_paths, vec![target.clone()]);
        assert_eq!(
            members(&target),
            vec!["data/raw/survey/a.csv", "data/raw/survey/nested/b.csv"]
        );
        assert_eq!(store.save_count(), saves);
    }

    #[test]
    fn test_single_file_dataset() {
        let fx = ProjectFixture::new();
        fx.write("data/processed/model.pkl", 10);
        let mut store = InMemoryStore::new();
        register::run(
            &mut store,
            &fx.ctx(),
            Registration::new("model", "data/processed/model.pkl"),
        )
        .unwrap();

        run(&store, &fx.ctx(), "model").unwrap();

        assert!(fx.root().join("data/processed/model.pkl.tar.gz").is_file());
    }

    #[test]
    fn test_missing_file_fails_without_leaving_an_archive() {
        let fx = ProjectFixture::new();
        fx.write("data/raw/survey/a.csv", 10);
        let file = fx.write("data/raw/survey/b.csv", 10);
        let mut store = InMemoryStore::new();
        register::run(
            &mut store,
            &fx.ctx(),
            Registration::new("survey", "data/raw/survey"),
        )
        .unwrap();
        std::fs::remove_file(file).unwrap();

        assert!(matches!(
            run(&store, &fx.ctx(), "survey"),
            Err(RepokitError::NotFound(_))
        ));
        assert!(!fx.root().join("data/raw/survey.tar.gz").exists());
        assert!(!fx.root().join("data/raw/survey.tar.gz.partial").exists());
    }

    #[test]
    fn test_unknown_and_empty_datasets() {
        let fx = ProjectFixture::new();
        let mut store = InMemoryStore::new();
        register::run(
            &mut store,
            &fx.ctx(),
            Registration::new("empty", "data/raw/empty"),
        )
        .unwrap();

        assert!(matches!(
            run(&store, &fx.ctx(), "nope"),
            Err(RepokitError::Api(_))
        ));
        let result = run(&store, &fx.ctx(), "empty").unwrap();
        assert!(result.written_paths.is_empty());
    }
}
