//! # CLI Layer
//!
//! One possible UI client for repokit, and the only place that knows about
//! terminal I/O, argument parsing, exit codes and the tracing subscriber.
//!
//! - `setup`: clap definitions
//! - `commands`: `run()` plus one `handle_*()` per subcommand, each calling the
//!   API and rendering its `CmdResult`
//! - `render`: terminal formatting of messages and records

mod commands;
mod render;
mod setup;

pub use commands::run;
