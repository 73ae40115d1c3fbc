//! # CLI Behavior
//!
//! This is **one possible UI client** for bump. The CLI is the only place that
//! knows about terminal I/O, exit codes and the process clock.
//!
//! For the overall architecture, see the crate-level documentation of `bump`.
//!
//! ## Flow
//!
//! `bump [options] [file]` goes through three states:
//!
//! - **Help**: `-h`/`--help` anywhere before `--` wins over everything else,
//!   including arguments that would not parse. Prints the fixed help text.
//! - **Version**: `--version` prints `bump <version>`.
//! - **Run**: resolves the input (default `./version`, created if missing),
//!   renders it and writes the result to `-o FILE` or stdout.
//!
//! ## Module Structure
//!
//! - `commands`: `run()`, the dispatch on the parsed action
//! - `render`: Logging setup and stdout output
//! - `setup`: Argument parsing via clap, help text, version string

mod commands;
mod render;
pub mod setup;

pub use commands::run;
