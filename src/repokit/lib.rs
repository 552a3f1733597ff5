//! # Repokit Architecture
//!
//! Repokit keeps a research project's data honest: every dataset that lands in
//! the repository is registered in a provenance store together with where it
//! came from, the command that produced it and what it contains. The store then
//! feeds the dataset tables in the README and the dataset list shipped with a
//! replication package.
//!
//! Like any client of this library, the CLI is a thin layer on top.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders results, installs logging      │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Owns the store, config and collaborators                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Registration, batch discovery, reports, maintenance      │
//! │  - Returns `Result<CmdResult>`, never prints                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait with shared upsert rules        │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands reach the outside world through two seams, both injected by the
//! API: [`env::Installer`] (is an executable available?) and
//! [`vcs::VersionControl`] (content fingerprint of a destination). Tests swap
//! both for fakes.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: The dataset record and its identity
//! - [`inventory`]: Filesystem snapshots, diffs and size statistics
//! - [`acquire`]: Running acquisition commands
//! - [`report`]: Markdown tables and README splicing
//! - [`config`]: Configuration management
//! - [`init`]: Project root discovery and production wiring
//! - [`error`]: Error types
//! - `cli`: Argument parsing and terminal rendering for the binary (not part of the lib API)

pub mod acquire;
pub mod api;
pub mod commands;
pub mod config;
pub mod env;
pub mod error;
pub mod init;
pub mod inventory;
pub mod model;
pub mod report;
pub mod store;
pub mod vcs;
