use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Input file used when none is given on the command line.
pub const DEFAULT_INPUT_PATH: &str = "./version";

/// Content written to a newly created input file.
pub const DEFAULT_CONTENT: &str = r#"# Version file for bump.
#
# Lines above the '---' separator declare variables as 'name = value'.
# Text below the separator is the output template; each {{ name }} is
# replaced by the variable's value. Built-in variables: time, date,
# year, clock, timestamp. Use -D name=value to set or override variables.
major = 0
minor = 1
patch = 0
version = {{ major }}.{{ minor }}.{{ patch }}
---
/* Generated by bump. Do not edit. */
#define VERSION        "{{ version }}"
#define VERSION_MAJOR  {{ major }}
#define VERSION_MINOR  {{ minor }}
#define VERSION_PATCH  {{ patch }}
#define BUILD_TIME     {{ time }}
#define BUILD_DATE     "{{ date }}"
"#;

/// Configuration for one invocation, built from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BumpConfig {
    /// Emit progress diagnostics on stderr
    pub verbose: bool,

    /// Explicit value for the built-in time variables (defaults to now)
    pub time: Option<DateTime<Utc>>,

    /// Output file; `None` writes to stdout
    pub output: Option<PathBuf>,

    /// Input file; `None` means [`DEFAULT_INPUT_PATH`]
    pub input: Option<PathBuf>,

    /// `-D` definitions in command-line order
    pub defines: Vec<Define>,
}

impl BumpConfig {
    /// The input path after applying the default.
    pub fn input_path(&self) -> &Path {
        self.input
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_INPUT_PATH))
    }
}

/// A `name=value` variable definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Define {
    pub name: String,
    pub value: String,
}

impl Define {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl FromStr for Define {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
        if !stamp::is_valid_name(name) {
            return Err(format!("invalid variable name '{}'", name));
        }
        Ok(Define::new(name, value))
    }
}

/// Parses a `-t` value: epoch seconds, or an RFC 3339 timestamp.
pub fn parse_time(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(secs) = s.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| format!("time out of range: {}", secs));
    }
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| {
            format!(
                "invalid time '{}', expected epoch seconds or an RFC 3339 timestamp",
                s
            )
        })
}
