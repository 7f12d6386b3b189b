//! Grammar loading
//!
//! Reads a RELAX NG document from a location, checks it and builds the
//! grammar model. Parsing errors surface before any output is produced.

use log::{debug, info};
use roxmltree::{Document, ParsingOptions};
use std::fs;
use std::io::Read;

use crate::error::{Error, Result};
use crate::grammar::{check_root_namespace, Grammar};
use crate::limits::Limits;
use crate::locations::Location;
use crate::validation::check_structure;

/// Loader for RELAX NG grammars
#[derive(Debug, Clone, Default)]
pub struct Loader {
    /// Resource limits
    limits: Limits,
    /// Whether to run the structural pre-check
    validate: bool,
}

impl Loader {
    /// Create a new loader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Enable or disable the structural pre-check
    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// The configured limits
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Whether the structural pre-check runs
    pub fn validates(&self) -> bool {
        self.validate
    }

    /// Load the text of a location
    pub fn load_text(&self, location: &Location) -> Result<String> {
        match location {
            Location::Path(path) => {
                if !path.exists() {
                    return Err(Error::InputNotFound(path.display().to_string()));
                }
                let bytes = fs::read(path)?;
                self.limits.check_xml_size(bytes.len())?;
                String::from_utf8(bytes).map_err(|e| {
                    Error::MalformedDocument(format!("'{}' is not valid UTF-8: {}", path.display(), e))
                })
            }
            Location::Url(url) => Err(Error::Resource(format!(
                "only local files can be read, got '{}'",
                url
            ))),
            Location::String(s) => {
                self.limits.check_xml_size(s.len())?;
                Ok(s.clone())
            }
        }
    }

    /// Load and parse the grammar at a location
    pub fn load(&self, location: &Location) -> Result<Grammar> {
        info!("Loading grammar from {}", location);
        let text = self.load_text(location)?;
        self.parse(&text)
    }

    /// Read a grammar from any reader
    pub fn load_reader<R: Read>(&self, mut reader: R) -> Result<Grammar> {
        let mut bytes = Vec::new();
        reader
            .by_ref()
            .take(self.limits.max_xml_size as u64 + 1)
            .read_to_end(&mut bytes)?;
        self.limits.check_xml_size(bytes.len())?;
        let text = String::from_utf8(bytes)
            .map_err(|e| Error::MalformedDocument(format!("input is not valid UTF-8: {}", e)))?;
        self.parse(&text)
    }

    /// Parse grammar text
    pub fn parse(&self, text: &str) -> Result<Grammar> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(text, options)?;
        check_root_namespace(&doc)?;
        if self.validate {
            debug!("Running structural pre-check");
            check_structure(doc.root_element())?;
        }
        Grammar::from_xml(&doc, &self.limits)
    }
}
