//! # Bump Architecture
//!
//! Bump generates version and build information files. It reads a small
//! version file, binds its variables (build time, user definitions, values
//! declared in the file itself) and renders the result to a header file or to
//! stdout.
//!
//! Like any tool here, bump is a library that happens to have a CLI client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints help/version/output             │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Runs resolve → environment → render → write              │
//! │  - Returns a structured CmdResult                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs, variables.rs)                │
//! │  - One step of the pipeline each                            │
//! │  - Template syntax lives in the `stamp` crate               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract VersionStore trait                              │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout, never exits the process
//! and never reads the clock. Verbose diagnostics are `tracing` events; the
//! CLI decides whether and where they are shown.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: unit tests of each step against `InMemoryStore`
//! 2. **API**: the whole pipeline against `InMemoryStore`, including failure
//!    ordering (a template error never touches the output file)
//! 3. **CLI**: argument parsing unit tests plus `assert_cmd` tests of the
//!    binary in a temporary directory
//!
//! ## Module Overview
//!
//! - [`api`]: Facade running the pipeline
//! - [`commands`]: Resolve, render and write steps
//! - [`config`]: Run configuration, `-D` definitions and defaults
//! - [`error`]: Error types and exit codes
//! - [`store`]: Storage abstraction
//! - [`variables`]: Built-in variables and the render context

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod store;
pub mod variables;
