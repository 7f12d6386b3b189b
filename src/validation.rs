//! Structural pre-check of RELAX NG documents
//!
//! A lightweight stand-in for validating against the RELAX NG meta-schema:
//! every element in the structural namespace must be known, carry the
//! attributes its kind requires and appear where its kind may appear.

use roxmltree::Node;

use crate::error::ValidationError;
use crate::grammar::NodeKind;
use crate::names::{is_valid_ncname, is_valid_qname};
use crate::namespaces::RNG_NAMESPACE;

/// Check the RELAX NG elements below and including `root` in document order.
///
/// Stops at the first violation, which carries the location path of the
/// offending element.
pub fn check_structure(root: Node) -> Result<(), ValidationError> {
    for node in root.descendants().filter(|n| is_rng(*n)) {
        check_node(node).map_err(|e| e.with_path(location_path(node)))?;
    }
    Ok(())
}

fn is_rng(node: Node) -> bool {
    node.is_element() && node.tag_name().namespace() == Some(RNG_NAMESPACE)
}

fn check_node(node: Node) -> Result<(), ValidationError> {
    let tag = node.tag_name().name();
    let Some(kind) = NodeKind::from_rng_tag(tag) else {
        return Err(ValidationError::new(format!("unknown RELAX NG element '{}'", tag)));
    };

    match kind {
        NodeKind::Define | NodeKind::Ref | NodeKind::ParentRef => {
            let name = required(node, "name")?;
            if !is_valid_ncname(name) {
                return Err(ValidationError::new(format!("'{}' is not a valid definition name", name))
                    .with_reason("definition names must be NCNames"));
            }
        }
        NodeKind::Data => {
            required(node, "type")?;
        }
        NodeKind::Include | NodeKind::ExternalRef => {
            required(node, "href")?;
        }
        NodeKind::Element | NodeKind::Attribute => match node.attribute("name") {
            Some(name) if !is_valid_qname(name.trim()) => {
                return Err(ValidationError::new(format!("'{}' is not a valid name", name.trim())));
            }
            Some(_) => {}
            None if has_name_class(node) => {}
            None => {
                return Err(ValidationError::new(format!(
                    "<{}> needs a 'name' attribute or a name class",
                    tag
                )));
            }
        },
        _ => {}
    }

    if kind == NodeKind::Define {
        let parent = node.parent_element().filter(|p| is_rng(*p)).map(|p| p.tag_name().name());
        if !matches!(parent, Some("grammar" | "div" | "include")) {
            return Err(ValidationError::new("<define> outside of a grammar")
                .with_reason("definitions may only appear in grammar, div or include"));
        }
    }

    Ok(())
}

fn required<'a>(node: Node<'a, '_>, attribute: &str) -> Result<&'a str, ValidationError> {
    node.attribute(attribute).ok_or_else(|| {
        ValidationError::new(format!(
            "<{}> is missing the '{}' attribute",
            node.tag_name().name(),
            attribute
        ))
    })
}

fn has_name_class(node: Node) -> bool {
    node.children()
        .find(|c| is_rng(*c))
        .map(|c| matches!(c.tag_name().name(), "name" | "anyName" | "nsName" | "choice"))
        .unwrap_or(false)
}

/// Location path of an element, e.g. `/grammar/define[2]/element`
fn location_path(node: Node) -> String {
    let mut steps = Vec::new();
    for element in node.ancestors().filter(Node::is_element) {
        let name = element.tag_name().name();
        let siblings: Vec<Node> = match element.parent_element() {
            Some(parent) => parent
                .children()
                .filter(|c| c.is_element() && c.tag_name() == element.tag_name())
                .collect(),
            None => vec![element],
        };
        if siblings.len() > 1 {
            let position = siblings.iter().position(|s| *s == element).unwrap_or(0);
            steps.push(format!("{}[{}]", name, position + 1));
        } else {
            steps.push(name.to_string());
        }
    }
    steps.reverse();
    format!("/{}", steps.join("/"))
}
