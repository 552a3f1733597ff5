use crate::commands::{CmdMessage, CmdResult, Context};
use crate::config::RepokitConfig;
use crate::error::{RepokitError, Result};
use std::fs;

const PLACEHOLDER: &str = ".gitkeep";

/// Create the conventional data layout and the config directory. Safe to rerun.
pub fn run(ctx: &Context<'_>) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let config_dir = ctx.paths.config_dir();
    if !RepokitConfig::exists_in(&config_dir) {
        ctx.config.save(&config_dir)?;
        result.add_message(CmdMessage::success(format!(
            "Wrote default config to {}",
            ctx.paths.display_path(&config_dir)
        )));
    }

    let data_root = ctx.data_root();
    for subdir in &ctx.config.data_subdirs {
        let dir = data_root.join(subdir);
        fs::create_dir_all(&dir).map_err(RepokitError::Io)?;
        let placeholder = dir.join(PLACEHOLDER);
        if !placeholder.exists() {
            fs::write(&placeholder, "").map_err(RepokitError::Io)?;
            result.written_paths.push(placeholder);
        }
    }

    result.add_message(CmdMessage::success(format!(
        "Initialized data layout at {}",
        ctx.paths.display_path(&data_root)
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::ProjectFixture;

    #[test]
    fn test_creates_layout_and_config() {
        let fx = ProjectFixture::new();

        let result = run(&fx.ctx()).unwrap();

        for sub in ["raw", "interim", "processed", "external"] {
            assert!(fx.root().join("data").join(sub).join(".gitkeep").is_file());
        }
        assert!(RepokitConfig::exists_in(fx.paths.config_dir()));
        assert_eq!(result.written_paths.len(), 4);
    }

    #[test]
    fn test_rerun_keeps_existing_files() {
        let fx = ProjectFixture::new();
        run(&fx.ctx()).unwrap();
        fx.write("data/raw/keep.csv", 10);

        let result = run(&fx.ctx()).unwrap();

        assert!(result.written_paths.is_empty());
        assert!(fx.root().join("data/raw/keep.csv").is_file());
    }
}
