//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! repokit operation, whatever the UI.
//!
//! The facade dispatches to `commands/*.rs` and owns what those commands
//! borrow: the store, the project paths, the loaded configuration and the
//! collaborator implementations ([`Installer`], [`VersionControl`]). It does no
//! I/O of its own and returns structured [`CmdResult`]s.
//!
//! `RepokitApi<S: DataStore>` is generic over the store:
//! - Production: `RepokitApi<FileStore>`
//! - Testing: `RepokitApi<InMemoryStore>`

use crate::commands::{self, Context};
use crate::config::RepokitConfig;
use crate::env::Installer;
use crate::error::Result;
use crate::model::{sanitize_name, Citation};
use crate::store::DataStore;
use crate::vcs::VersionControl;
use std::path::Path;

/// What the caller knows about a dataset to register explicitly.
#[derive(Debug, Clone, Default)]
pub struct RegisterRequest {
    pub data_name: String,
    pub destination: Option<String>,
    pub source: Option<String>,
    pub run_command: Option<String>,
    pub citation: Citation,
}

pub struct RepokitApi<S: DataStore> {
    store: S,
    paths: commands::RepokitPaths,
    config: RepokitConfig,
    installer: Box<dyn Installer>,
    vcs: Box<dyn VersionControl>,
}

impl<S: DataStore> RepokitApi<S> {
    pub fn new(
        store: S,
        paths: commands::RepokitPaths,
        config: RepokitConfig,
        installer: Box<dyn Installer>,
        vcs: Box<dyn VersionControl>,
    ) -> Self {
        Self {
            store,
            paths,
            config,
            installer,
            vcs,
        }
    }

    fn ctx(&self) -> Context<'_> {
        Context {
            paths: &self.paths,
            config: &self.config,
            installer: self.installer.as_ref(),
            vcs: self.vcs.as_ref(),
        }
    }

    /// The store mutably alongside a context borrowing the remaining fields.
    fn split(&mut self) -> (&mut S, Context<'_>) {
        let ctx = Context {
            paths: &self.paths,
            config: &self.config,
            installer: self.installer.as_ref(),
            vcs: self.vcs.as_ref(),
        };
        (&mut self.store, ctx)
    }

    /// Register one dataset. Without a destination it lands in
    /// `<data_root>/raw/<sanitized name>`.
    pub fn register(&mut self, request: RegisterRequest) -> Result<commands::CmdResult> {
        let destination = request
            .destination
            .unwrap_or_else(|| self.default_destination(&request.data_name));
        let mut registration =
            commands::register::Registration::new(request.data_name, destination)
                .with_citation(request.citation);
        registration.source = request.source;
        registration.run_command = request.run_command;

        let (store, ctx) = self.split();
        commands::register::run(store, &ctx, registration)
    }

    pub fn register_all(&mut self) -> Result<commands::CmdResult> {
        let (store, ctx) = self.split();
        commands::batch::run(store, &ctx)
    }

    pub fn report(&self) -> Result<commands::CmdResult> {
        commands::report::run(&self.store, &self.ctx())
    }

    pub fn list(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn show(&self, name: &str) -> Result<commands::CmdResult> {
        commands::show::run(&self.store, name)
    }

    pub fn doctor(&self) -> Result<commands::CmdResult> {
        commands::doctor::run(&self.store, &self.ctx())
    }

    pub fn archive(&self, name: &str) -> Result<commands::CmdResult> {
        commands::archive::run(&self.store, &self.ctx(), name)
    }

    pub fn init(&self) -> Result<commands::CmdResult> {
        commands::init::run(&self.ctx())
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn paths(&self) -> &commands::RepokitPaths {
        &self.paths
    }

    fn default_destination(&self, data_name: &str) -> String {
        let path = Path::new(&self.config.data_root)
            .join("raw")
            .join(sanitize_name(data_name));
        crate::inventory::path_to_string(&path)
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, RepokitPaths};
