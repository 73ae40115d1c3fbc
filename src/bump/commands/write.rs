use crate::error::Result;
use crate::store::VersionStore;
use std::path::Path;

/// Writes `text` to `output` when given. Otherwise hands the text back for
/// the caller to print on stdout.
pub fn run<S: VersionStore>(
    store: &mut S,
    output: Option<&Path>,
    text: String,
) -> Result<Option<String>> {
    match output {
        Some(path) => {
            store.write(path, &text)?;
            Ok(None)
        }
        None => Ok(Some(text)),
    }
}
