//! # Terminal Output
//!
//! Everything bump shows on the terminal goes through here. Results, help and
//! version go to stdout; diagnostics from `-v` go to stderr through a
//! `tracing` subscriber so they never mix with rendered output.

use super::setup::{get_version, HELP_TEXT};
use bump::commands::CmdResult;
use bump::error::{BumpError, Result};
use std::io::{self, Write};
use tracing::{debug, info, Level};

/// Installs the stderr subscriber: everything down to `DEBUG` when verbose,
/// warnings only otherwise.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .with_level(false)
        .init();
}

/// Logs what a run did. Only visible with `-v`.
pub fn report(result: &CmdResult) {
    if result.created_input {
        info!("created {} with default content", result.input.display());
    }
    for (name, value) in &result.variables {
        debug!("resolved {} = {}", name, value);
    }
    match &result.output {
        Some(path) => info!("wrote {}", path.display()),
        None => info!("writing to stdout"),
    }
}

pub fn print_help() -> Result<()> {
    print_stdout(HELP_TEXT)
}

pub fn print_version() -> Result<()> {
    print_stdout(&format!("bump {}\n", get_version()))
}

/// Writes `text` to stdout as is, without adding a newline.
pub fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| BumpError::io("<stdout>", e))
}
