use std::path::PathBuf;

pub mod render;
pub mod resolve;
pub mod write;

/// Outcome of a successful run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CmdResult {
    /// Input file that was rendered
    pub input: PathBuf,
    /// True if the input file was created with default content
    pub created_input: bool,
    /// Output file that was written, if any
    pub output: Option<PathBuf>,
    /// Rendered text for stdout, when no output file was given
    pub stdout: Option<String>,
    /// Variables the template referenced, with their values
    pub variables: Vec<(String, String)>,
}

impl CmdResult {
    pub fn with_input(mut self, input: PathBuf, created: bool) -> Self {
        self.input = input;
        self.created_input = created;
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_stdout(mut self, text: Option<String>) -> Self {
        self.stdout = text;
        self
    }

    pub fn with_variables(mut self, variables: Vec<(String, String)>) -> Self {
        self.variables = variables;
        self
    }
}
