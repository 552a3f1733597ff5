use crate::config::{RepokitConfig, CONFIG_DIR};
use crate::env::Installer;
use crate::inventory::path_to_string;
use crate::model::DatasetRecord;
use crate::vcs::VersionControl;
use std::path::{Path, PathBuf};

pub mod archive;
pub mod batch;
pub mod config;
pub mod doctor;
pub mod init;
pub mod list;
pub mod register;
pub mod report;
pub mod show;

/// Where the project lives. Relative settings and destinations resolve against `root`.
#[derive(Debug, Clone)]
pub struct RepokitPaths {
    pub root: PathBuf,
}

impl RepokitPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR)
    }

    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Path as recorded in the store: relative to the root when inside it.
    pub fn display_path(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(rel) => path_to_string(rel),
            Err(_) => path_to_string(path),
        }
    }
}

/// Everything a command needs besides the store.
pub struct Context<'a> {
    pub paths: &'a RepokitPaths,
    pub config: &'a RepokitConfig,
    pub installer: &'a dyn Installer,
    pub vcs: &'a dyn VersionControl,
}

impl Context<'_> {
    pub fn store_path(&self) -> PathBuf {
        self.paths.resolve(&self.config.store_path)
    }

    pub fn data_root(&self) -> PathBuf {
        self.paths.resolve(&self.config.data_root)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<DatasetRecord>,
    pub listed_records: Vec<DatasetRecord>,
    pub written_paths: Vec<PathBuf>,
    pub config: Option<RepokitConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<DatasetRecord>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<DatasetRecord>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_config(mut self, config: RepokitConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
    }
}
