//! Error types for rng2doc
//!
//! This module defines all error types used throughout the library, together
//! with the mapping from error kind to the exit code of the command line tool.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias using rng2doc Error
pub type Result<T> = std::result::Result<T, Error>;

/// Exit code for a successful run
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for input that is not well-formed or not a usable RELAX NG grammar
pub const EXIT_MALFORMED: i32 = 20;
/// Exit code for missing input or failing file access
pub const EXIT_NOT_FOUND: i32 = 40;
/// Exit code for a bad command line invocation
pub const EXIT_INVOCATION: i32 = 50;
/// Exit code for a run interrupted by the user
pub const EXIT_INTERRUPTED: i32 = 200;
/// Exit code for everything else
pub const EXIT_INTERNAL: i32 = 255;

/// Main error type for rng2doc operations
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid command arguments
    #[error("invalid invocation: {0}")]
    Invocation(String),

    /// Input path does not exist
    #[error("file not found '{0}'")]
    InputNotFound(String),

    /// Input is not well-formed XML
    #[error("failed to parse the XML input: {0}")]
    MalformedDocument(String),

    /// Root element is outside the RELAX NG structural namespace
    #[error(
        "wrong namespace in root element '{tag}' (namespace: {}); expected a RELAX NG element",
        .namespace.as_deref().unwrap_or("none")
    )]
    WrongGrammarNamespace {
        /// Actual namespace of the root element
        namespace: Option<String>,
        /// Actual local name of the root element
        tag: String,
    },

    /// The grammar failed the structural pre-check
    #[error("schema validation error: {0}")]
    SchemaValidation(#[from] ValidationError),

    /// Requested output format is not supported
    #[error("unsupported output format '{0}' (expected xml, html or json)")]
    UnsupportedOutputFormat(String),

    /// User-initiated cancellation, raised by embedders that cancel a run.
    /// An `io::ErrorKind::Interrupted` is a retried EINTR and stays `Io`.
    #[error("interrupted")]
    Interrupted,

    /// A resource limit was crossed while loading
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// Resource location cannot be loaded
    #[error("resource error: {0}")]
    Resource(String),

    /// Writing the report failed
    #[error("output error: {0}")]
    Output(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::MalformedDocument(err.to_string())
    }
}

impl Error {
    /// Exit code the command line tool reports for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Invocation(_) | Error::UnsupportedOutputFormat(_) => EXIT_INVOCATION,
            Error::InputNotFound(_) | Error::Io(_) => EXIT_NOT_FOUND,
            Error::MalformedDocument(_)
            | Error::WrongGrammarNamespace { .. }
            | Error::SchemaValidation(_)
            | Error::LimitExceeded(_) => EXIT_MALFORMED,
            Error::Interrupted => EXIT_INTERRUPTED,
            Error::Resource(_) | Error::Output(_) | Error::Url(_) => EXIT_INTERNAL,
        }
    }
}

/// Structural pre-check violation with context
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Error message
    pub message: String,
    /// Path to the grammar node that failed the check
    pub path: Option<String>,
    /// Underlying reason
    pub reason: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            reason: None,
        }
    }

    /// Set the path where the check failed
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref reason) = self.reason {
            write!(f, "\n\nReason: {}", reason)?;
        }

        if let Some(ref path) = self.path {
            write!(f, "\n\nPath: {}", path)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}
