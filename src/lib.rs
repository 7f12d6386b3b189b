//! # rng2doc
//!
//! Generates reference documentation from RELAX NG grammars in XML syntax.
//!
//! ## Features
//!
//! - One documentation record per `element` pattern, in document order
//! - Attribute classification: datatypes with parameters, text, enumerations
//! - Required/optional attribute use, resolved through `ref`/`define`
//! - Namespace resolution from prefixes, `ns` attributes and inheritance
//! - XML, JSON and HTML reports, with Graphviz diagrams per element
//! - Terminates on recursive grammars
//!
//! ## Example
//!
//! ```rust,ignore
//! use rng2doc::{Loader, Location};
//!
//! let location = Location::from_arg("schema.rng")?;
//! let documentation = rng2doc::parse(&location, &Loader::new())?;
//! for record in &documentation {
//!     println!("{} {}", record.id, record.name);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Utilities
pub mod locations;
pub mod names;
pub mod namespaces;

// Grammar model and loading
pub mod grammar;
pub mod loaders;
pub mod validation;

// Documentation
pub mod builder;
pub mod classifier;
pub mod records;
pub mod resolver;

// Output
pub mod config;
pub mod diagram;
pub mod output;

// Re-exports for convenience
pub use builder::{DocumentationBuilder, ElementIndex};
pub use config::Config;
pub use diagram::DiagramMode;
pub use error::{Error, Result};
pub use grammar::Grammar;
pub use loaders::Loader;
pub use locations::Location;
pub use output::{render, OutputFormat, Rendered};
pub use records::Documentation;

/// Version of the rng2doc library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use namespaces::{ANNOTATIONS_NAMESPACE, RNG_NAMESPACE, XML_NAMESPACE};

/// Load the grammar at `location` and build its documentation
pub fn parse(location: &Location, loader: &Loader) -> Result<Documentation> {
    let grammar = loader.load(location)?;
    Ok(DocumentationBuilder::new(&grammar).build())
}
