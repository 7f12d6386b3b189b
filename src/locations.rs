//! Input location resolution
//!
//! A grammar can be read from a file path, a URL or an in-memory string.

use crate::error::{Error, Result};
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Input location of a RELAX NG grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// File system path
    Path(PathBuf),
    /// URL (only `file:` URLs can be loaded)
    Url(Url),
    /// In-memory grammar text
    String(String),
}

impl Location {
    /// Create a location from a command line argument.
    ///
    /// Anything that parses as a URL with a scheme longer than one character
    /// is a URL (so `C:\schema.rng` stays a path); `file:` URLs are turned
    /// into paths right away.
    pub fn from_arg(arg: &str) -> Result<Self> {
        if let Ok(url) = Url::parse(arg) {
            if url.scheme().len() > 1 {
                if url.scheme() == "file" {
                    let path = url
                        .to_file_path()
                        .map_err(|_| Error::Resource(format!("Invalid file URL: {}", url)))?;
                    return Ok(Location::Path(path));
                }
                return Ok(Location::Url(url));
            }
        }

        Ok(Location::Path(PathBuf::from(arg)))
    }

    /// Check if this is a remote location (URL)
    pub fn is_remote(&self) -> bool {
        matches!(self, Location::Url(_))
    }

    /// Check if this is a local file
    pub fn is_file(&self) -> bool {
        matches!(self, Location::Path(_))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Path(p) => write!(f, "{}", p.display()),
            Location::Url(u) => write!(f, "{}", u),
            Location::String(_) => write!(f, "<string>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_url() {
        let loc = Location::from_arg("http://example.com/schema.rng").unwrap();
        assert!(matches!(loc, Location::Url(_)));
        assert!(loc.is_remote());
    }

    #[test]
    fn test_location_from_file_url() {
        let loc = Location::from_arg("file:///tmp/schema.rng").unwrap();
        assert_eq!(loc, Location::Path(PathBuf::from("/tmp/schema.rng")));
    }

    #[test]
    fn test_location_from_path() {
        let loc = Location::from_arg("schemas/book.rng").unwrap();
        assert!(matches!(loc, Location::Path(_)));
        assert!(loc.is_file());
    }

    #[test]
    fn test_location_display() {
        let loc = Location::String("<element/>".to_string());
        assert_eq!(loc.to_string(), "<string>");
    }
}
