//! Report serializers
//!
//! Reports are rendered completely in memory; nothing is written until
//! rendering succeeded.

mod html;
mod json;
mod xml;

pub use html::HtmlRenderer;
pub use json::render_json;
pub use xml::XmlRenderer;

use log::{info, warn};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::builder::ElementIndex;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::grammar::Grammar;
use crate::records::Documentation;

/// Directory the HTML page set is written to, next to the output path
pub const HTML_DIR: &str = "html";
/// Index page name when no output path is given
pub const HTML_INDEX: &str = "index.html";

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// XML report
    #[default]
    Xml,
    /// HTML page set
    Html,
    /// JSON report
    Json,
}

impl OutputFormat {
    /// Format name as accepted on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Xml => "xml",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(OutputFormat::Xml),
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            _ => Err(Error::UnsupportedOutputFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered report waiting to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Text for standard output
    Stdout(String),
    /// Files with their content
    Files(Vec<(PathBuf, String)>),
}

impl Rendered {
    /// Write the report, creating missing directories
    pub fn write(&self) -> Result<()> {
        match self {
            Rendered::Stdout(text) => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(text.as_bytes())?;
                stdout.flush()?;
            }
            Rendered::Files(files) => {
                let mut written = Written::default();
                if let Err(err) = written.write_all(files) {
                    warn!("Writing output failed, removing {} partial file(s)", written.files.len());
                    written.roll_back();
                    return Err(err);
                }
                info!("Wrote {} file(s)", files.len());
            }
        }
        Ok(())
    }
}

/// Files and directories created by one write, removed again on failure
#[derive(Debug, Default)]
struct Written {
    files: Vec<PathBuf>,
    dirs: Vec<PathBuf>,
}

impl Written {
    fn write_all(&mut self, files: &[(PathBuf, String)]) -> Result<()> {
        for (path, content) in files {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                self.create_dirs(parent)?;
            }
            fs::write(path, content)?;
            self.files.push(path.clone());
        }
        Ok(())
    }

    fn create_dirs(&mut self, dir: &Path) -> Result<()> {
        // outermost directory that does not exist yet
        let created = dir
            .ancestors()
            .take_while(|a| !a.as_os_str().is_empty() && !a.exists())
            .last()
            .map(Path::to_path_buf);
        fs::create_dir_all(dir)?;
        self.dirs.extend(created);
        Ok(())
    }

    fn roll_back(&self) {
        for path in self.files.iter().rev() {
            if let Err(err) = fs::remove_file(path) {
                warn!("Could not remove '{}': {}", path.display(), err);
            }
        }
        for dir in self.dirs.iter().rev() {
            if let Err(err) = fs::remove_dir_all(dir) {
                warn!("Could not remove '{}': {}", dir.display(), err);
            }
        }
    }
}

/// Render the documentation in the configured format
pub fn render(
    documentation: &Documentation,
    grammar: &Grammar,
    index: &ElementIndex,
    config: &Config,
) -> Result<Rendered> {
    let text = match config.format {
        OutputFormat::Xml => {
            let indent = if config.pretty { Some(2) } else { None };
            XmlRenderer::new()
                .with_indent(indent)
                .with_declaration(config.pretty)
                .render(documentation)?
        }
        OutputFormat::Json => render_json(documentation, config.pretty)?,
        OutputFormat::Html => {
            let (dir, index_name) = html_location(config.output.as_deref());
            let files = HtmlRenderer::new(grammar, index, config.diagram_mode).render(
                documentation,
                &dir,
                &index_name,
            );
            return Ok(Rendered::Files(files));
        }
    };

    let text = text + "\n";
    Ok(match &config.output {
        Some(path) => Rendered::Files(vec![(path.clone(), text)]),
        None => Rendered::Stdout(text),
    })
}

/// Page set directory and index page name for an output path.
///
/// `out/doc.html` yields `out/html` and `doc.html`; without a path the
/// pages go to `./html/index.html`.
pub fn html_location(output: Option<&Path>) -> (PathBuf, String) {
    let Some(output) = output else {
        return (PathBuf::from(HTML_DIR), HTML_INDEX.to_string());
    };
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| HTML_INDEX.to_string());
    let dir = output.parent().unwrap_or_else(|| Path::new("")).join(HTML_DIR);
    (dir, name)
}
