//! # Variable Environment
//!
//! Builds the [`Context`] a version file is rendered against.
//!
//! Built-in variables all describe the same instant, in UTC:
//!
//! | Name        | Example                | Format           |
//! |-------------|------------------------|------------------|
//! | `time`      | `1329040800`           | epoch seconds    |
//! | `date`      | `2012-02-12`           | `%Y-%m-%d`       |
//! | `year`      | `2012`                 | `%Y`             |
//! | `clock`     | `10:00:00`             | `%H:%M:%S`       |
//! | `timestamp` | `2012-02-12T10:00:00Z` | RFC 3339         |
//!
//! `-D` definitions are applied on top in command-line order, so a later
//! definition replaces an earlier one and any definition replaces a built-in
//! (or a declaration in the version file) of the same name.

use crate::config::Define;
use chrono::{DateTime, SecondsFormat, Utc};
use stamp::Context;

/// Built-in variables for `instant`.
pub fn builtins(instant: DateTime<Utc>) -> Vec<(&'static str, String)> {
    vec![
        ("time", instant.timestamp().to_string()),
        ("date", instant.format("%Y-%m-%d").to_string()),
        ("year", instant.format("%Y").to_string()),
        ("clock", instant.format("%H:%M:%S").to_string()),
        (
            "timestamp",
            instant.to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
    ]
}

/// Seeds the built-ins for `instant`, then applies `defines` in order.
pub fn environment(instant: DateTime<Utc>, defines: &[Define]) -> Context {
    let mut ctx = Context::new();
    for (name, value) in builtins(instant) {
        ctx.set_builtin(name, &value);
    }
    for define in defines {
        ctx.define(&define.name, &define.value);
    }
    ctx
}
