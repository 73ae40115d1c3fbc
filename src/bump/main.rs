//! # Bump CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/bump/cli/`, while
//! this file only invokes `cli::run()` and handles process termination.
//!
//! Errors are printed as a single `Error: <message>` line on stderr and mapped
//! to the exit code of their kind (usage 2, I/O 3, template 4).

use console::style;

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{} {}", style("Error:").for_stderr().red(), e);
        std::process::exit(e.exit_code());
    }
}
