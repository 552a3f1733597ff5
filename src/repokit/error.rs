use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepokitError {
    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("The executable '{0}' was not found in the PATH")]
    ExecutableNotFound(String),

    #[error("Command `{command}` failed ({status})")]
    CommandExecution {
        command: String,
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },

    #[error("Malformed dataset store {}: {source}", path.display())]
    MalformedStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Report generation failed: {0}")]
    ReportGeneration(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, RepokitError>;
