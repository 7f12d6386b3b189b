//! Run configuration
//!
//! Everything a single conversion needs besides the input location.

use std::path::PathBuf;

use crate::diagram::DiagramMode;
use crate::loaders::Loader;
use crate::output::OutputFormat;

/// Configuration of one conversion
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Report format
    pub format: OutputFormat,
    /// Output file; stdout (or `./html/` for HTML) when unset
    pub output: Option<PathBuf>,
    /// Detail of the element diagrams in HTML reports
    pub diagram_mode: DiagramMode,
    /// Indent XML and JSON reports
    pub pretty: bool,
    /// Report phase timings on stderr
    pub timing: bool,
    /// Grammar loading settings
    pub loader: Loader,
}

impl Config {
    /// Create a configuration for a format
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    /// Set the output file
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Set the diagram mode
    pub fn with_diagram_mode(mut self, mode: DiagramMode) -> Self {
        self.diagram_mode = mode;
        self
    }

    /// Set whether reports are indented
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Set whether phase timings are reported
    pub fn with_timing(mut self, timing: bool) -> Self {
        self.timing = timing;
        self
    }

    /// Set the grammar loader
    pub fn with_loader(mut self, loader: Loader) -> Self {
        self.loader = loader;
        self
    }
}
