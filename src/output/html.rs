//! HTML page set
//!
//! An index page linking every element, one page per element and the
//! element's content model diagram as a DOT file next to it.

use quick_xml::escape::escape;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::builder::ElementIndex;
use crate::diagram::{DiagramBuilder, DiagramMode};
use crate::grammar::Grammar;
use crate::records::{AttributeRecord, AttributeType, Documentation, DocumentationRecord};

const STYLE: &str = "body { font-family: sans-serif; margin: 2em; }\n\
table { border-collapse: collapse; }\n\
th, td { border: 1px solid #a2a4aa; padding: 0.2em 0.6em; text-align: left; }\n\
code { background: #c0ffee; }\n";

/// Renders the HTML page set into a directory
pub struct HtmlRenderer<'g> {
    grammar: &'g Grammar,
    index: &'g ElementIndex,
    mode: DiagramMode,
}

impl<'g> HtmlRenderer<'g> {
    /// Create a renderer drawing diagrams in `mode`
    pub fn new(grammar: &'g Grammar, index: &'g ElementIndex, mode: DiagramMode) -> Self {
        Self { grammar, index, mode }
    }

    /// Render all pages as `(path, content)` pairs below `dir`.
    ///
    /// The index page is `dir/<index_name>`; element pages and diagrams go
    /// to `dir/elements/`.
    pub fn render(&self, documentation: &Documentation, dir: &Path, index_name: &str) -> Vec<(PathBuf, String)> {
        let mut files = vec![(dir.join(index_name), self.index_page(documentation))];
        let diagrams = DiagramBuilder::new(self.grammar, self.mode);

        for record in documentation {
            let elements = dir.join("elements");
            files.push((
                elements.join(format!("{}.html", record.id)),
                self.element_page(record, index_name),
            ));
            if let Some(node) = self.index.node_of(record.id) {
                files.push((
                    elements.join(format!("{}.dot", record.id)),
                    diagrams.build(node).to_dot(&record.name),
                ));
            }
        }
        files
    }

    fn index_page(&self, documentation: &Documentation) -> String {
        let mut body = String::from("<h1>Elements</h1>\n<ul>\n");
        for record in documentation {
            let _ = writeln!(
                body,
                "<li><a href=\"elements/{}.html\">{}</a>{}</li>",
                record.id,
                escape(record.name.as_str()),
                namespace_suffix(record.namespace.as_deref())
            );
        }
        body.push_str("</ul>\n");
        page("Elements", &body)
    }

    fn element_page(&self, record: &DocumentationRecord, index_name: &str) -> String {
        let mut body = String::new();
        let _ = writeln!(body, "<p><a href=\"../{}\">Index</a></p>", escape(index_name));
        let _ = writeln!(body, "<h1>{}</h1>", escape(record.name.as_str()));
        let _ = writeln!(
            body,
            "<p>Namespace: {}</p>",
            record
                .namespace
                .as_deref()
                .map(|ns| format!("<code>{}</code>", escape(ns)))
                .unwrap_or_else(|| "none".to_string())
        );
        if !record.description.is_empty() {
            let _ = writeln!(body, "<p>{}</p>", escape(record.description.as_str()));
        }

        if !record.children.is_empty() {
            body.push_str("<h2>Children</h2>\n<ul>\n");
            for child in &record.children {
                let _ = writeln!(
                    body,
                    "<li><a href=\"{}.html\">{}</a></li>",
                    child.id,
                    escape(child.name.as_str())
                );
            }
            body.push_str("</ul>\n");
        }

        if !record.attributes.is_empty() {
            body.push_str("<h2>Attributes</h2>\n<table>\n");
            body.push_str("<tr><th>Name</th><th>Namespace</th><th>Type</th><th>Use</th><th>Description</th></tr>\n");
            for attribute in &record.attributes {
                attribute_row(&mut body, attribute);
            }
            body.push_str("</table>\n");
        }

        let _ = writeln!(
            body,
            "<h2>Diagram</h2>\n<p><a href=\"{}.dot\">Content model (Graphviz)</a></p>",
            record.id
        );
        page(&record.name, &body)
    }
}

fn attribute_row(body: &mut String, attribute: &AttributeRecord) {
    let data_type = match &attribute.data_type {
        AttributeType::Enum { values } => values
            .iter()
            .map(|v| format!("<code>{}</code>", escape(v.value.as_str())))
            .collect::<Vec<_>>()
            .join(" | "),
        other => escape(other.type_name().unwrap_or("unknown")).into_owned(),
    };
    let _ = writeln!(
        body,
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        escape(attribute.name.as_str()),
        escape(attribute.namespace.as_deref().unwrap_or_default()),
        data_type,
        attribute.usage,
        escape(attribute.description.as_str())
    );
}

fn namespace_suffix(namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) => format!(" <small>({})</small>", escape(ns)),
        None => String::new(),
    }
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        STYLE,
        body
    )
}
