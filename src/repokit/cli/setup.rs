use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "repokit", bin_name = "repokit", version)]
#[command(
    about = "Track where a research project's datasets come from",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a dataset, or everything under the data folder when no name is given
    Register(RegisterArgs),

    /// List registered datasets
    #[command(alias = "ls")]
    List,

    /// Show every record registered under a name
    Show {
        /// Dataset name
        name: String,
    },

    /// Regenerate the README dataset table and the dataset list
    Report,

    /// Check the store for inconsistencies without changing it
    Doctor,

    /// Pack a dataset's files into <destination>.tar.gz
    Archive {
        /// Dataset name
        name: String,
    },

    /// Create the data folder layout and the config directory
    Init,

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., data-root)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct RegisterArgs {
    /// Dataset name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Where the data comes from (URL, path, ...), passed to the command
    #[arg(short, long)]
    pub source: Option<String>,

    /// Acquisition command; receives the source and destination as its last arguments
    #[arg(short = 'c', long = "command")]
    pub run_command: Option<String>,

    /// File or folder holding the dataset [default: <data-root>/raw/<name>]
    #[arg(short, long)]
    pub destination: Option<String>,

    #[arg(long)]
    pub doi: Option<String>,

    #[arg(long)]
    pub citation: Option<String>,

    #[arg(long)]
    pub license: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

impl RegisterArgs {
    /// True only for a bare `register`. Any flag, metadata included, means a
    /// single registration, which then needs `--name`.
    pub fn is_batch(&self) -> bool {
        self.name.is_none()
            && self.source.is_none()
            && self.run_command.is_none()
            && self.destination.is_none()
            && self.doi.is_none()
            && self.citation.is_none()
            && self.license.is_none()
            && self.notes.is_none()
    }
}
