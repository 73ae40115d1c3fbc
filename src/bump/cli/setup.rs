use bump::config::{parse_time, BumpConfig, Define};
use bump::error::{BumpError, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Help text printed for `-h`/`--help`.
pub const HELP_TEXT: &str = "\
Version and build information tool.

Usage: bump [options] [file]

Options:
    -v, --verbose                    Run verbosely
    -h, --help                       Emit help information
        --version                    Emit version and exit
    -t, --time TIME                  Set specific time
    -o, --output FILE                Output file name
    -D, --define DEFINE              Define variable

Input file name is './version', if no file specified.
Input file is created with default content, if it does not exist.

Examples:
    bump -v
    bump -o output.h  -t `date +%s`  foo.ver
    bump --output header.hpp  version
    bump -Dbuildcfg=release -Ddate=02-12-12  foo  >foo.h

See readme.md for input file syntax.

";

/// Short flags that consume the rest of their cluster as a value.
const VALUE_SHORTS: &[char] = &['t', 'o', 'D'];

/// Version shown by `--version`: the package version, plus the git hash and
/// commit date stamped by `build.rs` unless HEAD is a clean, tagged release.
pub fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "bump",
    bin_name = "bump",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Run verbosely
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit help information
    #[arg(short, long)]
    pub help: bool,

    /// Emit version and exit
    #[arg(long)]
    pub version: bool,

    /// Set specific time
    #[arg(
        short,
        long,
        value_name = "TIME",
        value_parser = parse_time,
        allow_negative_numbers = true
    )]
    pub time: Option<DateTime<Utc>>,

    /// Output file name
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Define variable
    #[arg(short = 'D', long = "define", value_name = "DEFINE")]
    pub defines: Vec<Define>,

    /// Input file
    pub file: Option<PathBuf>,
}

impl Cli {
    pub fn into_config(self) -> BumpConfig {
        BumpConfig {
            verbose: self.verbose,
            time: self.time,
            output: self.output,
            input: self.file,
            defines: self.defines,
        }
    }
}

/// What the invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Help,
    Version,
    Run(BumpConfig),
}

/// Turns a full argument list (program name first) into an [`Action`].
///
/// A help request wins even when the other arguments are invalid.
pub fn parse_action<I, T>(args: I) -> Result<Action>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if wants_help(&args) {
        return Ok(Action::Help);
    }

    let cli = Cli::try_parse_from(&args).map_err(usage_error)?;
    if cli.help {
        return Ok(Action::Help);
    }
    if cli.version {
        return Ok(Action::Version);
    }
    Ok(Action::Run(cli.into_config()))
}

/// Scans for `-h`/`--help` without validating anything else.
///
/// Stops at `--`. A value attached to `-t`, `-o` or `-D` is skipped, so
/// `-Dh=1` defines `h` rather than asking for help.
pub fn wants_help(args: &[OsString]) -> bool {
    for arg in args.iter().skip(1) {
        let Some(arg) = arg.to_str() else {
            continue;
        };
        if arg == "--" {
            return false;
        }
        if arg == "--help" {
            return true;
        }
        if arg.starts_with("--") {
            continue;
        }
        let Some(cluster) = arg.strip_prefix('-') else {
            continue;
        };
        for c in cluster.chars() {
            if c == 'h' {
                return true;
            }
            if VALUE_SHORTS.contains(&c) {
                break;
            }
        }
    }
    false
}

fn usage_error(err: clap::Error) -> BumpError {
    let rendered = err.to_string();
    let line = rendered.lines().next().unwrap_or_default();
    BumpError::usage(line.strip_prefix("error: ").unwrap_or(line))
}
