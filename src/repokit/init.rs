use crate::api::{RepokitApi, RepokitPaths};
use crate::config::{RepokitConfig, CONFIG_DIR};
use crate::env::PathInstaller;
use crate::error::Result;
use crate::store::fs::FileStore;
use crate::vcs::GitCli;
use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// Overrides project root discovery.
pub const ROOT_ENV: &str = "REPOKIT_ROOT";

pub struct RepokitContext {
    pub api: RepokitApi<FileStore>,
    pub config: RepokitConfig,
}

/// Find the project root by walking up from cwd to the first directory holding
/// either `.repokit` or `.git`. Gives up at the home directory or the
/// filesystem root.
pub fn find_project_root(cwd: &Path) -> Option<PathBuf> {
    let home_dir = BaseDirs::new().map(|bd| bd.home_dir().to_path_buf());
    let mut current = cwd.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() || current.join(".git").exists() {
            return Some(current);
        }

        if let Some(ref home) = home_dir {
            if &current == home {
                return None;
            }
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => return None,
        }
    }
}

pub fn resolve_root(cwd: &Path) -> PathBuf {
    if let Some(root) = std::env::var_os(ROOT_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(root);
    }
    find_project_root(cwd).unwrap_or_else(|| cwd.to_path_buf())
}

pub fn initialize(cwd: &Path) -> Result<RepokitContext> {
    let paths = RepokitPaths::new(resolve_root(cwd));
    let config = RepokitConfig::load(paths.config_dir())?;
    let store = FileStore::new(paths.resolve(&config.store_path));
    let api = RepokitApi::new(
        store,
        paths,
        config.clone(),
        Box::new(PathInstaller),
        Box::new(GitCli),
    );

    Ok(RepokitContext { api, config })
}
