//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for running bump, whatever the UI.
//!
//! ## The Pipeline
//!
//! [`BumpApi::run`] executes the steps strictly in order:
//!
//! 1. **Resolve** the input file, creating it with default content if missing
//! 2. **Build** the variable environment from the instant and `-D` definitions
//! 3. **Render** the version file
//! 4. **Write** the result to the output file, or hand it back for stdout
//!
//! The first failing step aborts the rest. Rendering happens before the output
//! file is opened, so a template error leaves an existing output untouched.
//!
//! ## What the API Does NOT Do
//!
//! - Read the clock: the caller passes the instant used for the time built-ins
//! - Print anything: stdout text is returned in [`CmdResult::stdout`]
//! - Exit the process
//!
//! ## Generic Over VersionStore
//!
//! `BumpApi<S: VersionStore>` runs against `FileStore` in production and
//! `InMemoryStore` in tests.

use crate::commands::{self, CmdResult};
use crate::config::BumpConfig;
use crate::error::Result;
use crate::store::VersionStore;
use crate::variables;
use chrono::{DateTime, Utc};
use tracing::info;

pub struct BumpApi<S: VersionStore> {
    store: S,
}

impl<S: VersionStore> BumpApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Runs the whole pipeline for `config`.
    ///
    /// `now` binds the time built-ins unless `config.time` overrides it.
    pub fn run(&mut self, config: &BumpConfig, now: DateTime<Utc>) -> Result<CmdResult> {
        let input = commands::resolve::run(&mut self.store, config.input_path())?;

        let instant = config.time.unwrap_or(now);
        info!("time is {} ({})", instant.timestamp(), instant.to_rfc3339());
        let ctx = variables::environment(instant, &config.defines);

        let rendered = commands::render::run(&input.source, &ctx)?;

        let stdout =
            commands::write::run(&mut self.store, config.output.as_deref(), rendered.text)?;

        Ok(CmdResult::default()
            .with_input(input.path, input.created)
            .with_output(config.output.clone())
            .with_stdout(stdout)
            .with_variables(rendered.used))
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
