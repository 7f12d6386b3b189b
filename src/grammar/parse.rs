//! Grammar construction from a parsed XML tree
//!
//! Only elements in the RELAX NG structural namespace and `a:documentation`
//! annotations become grammar nodes. Other foreign markup is dropped with its
//! subtree, as are comments, processing instructions and whitespace text.

use log::{debug, trace, warn};
use roxmltree::{Document, Node};

use super::node::{GrammarNode, NodeId, NodeKind};
use super::Grammar;
use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::namespaces::{ANNOTATIONS_NAMESPACE, FOREIGN_NAMESPACES, RNG_NAMESPACE};

/// Fail unless the root element is in the RELAX NG structural namespace
pub fn check_root_namespace(doc: &Document) -> Result<()> {
    let root = doc.root_element();
    let tag = root.tag_name();
    if tag.namespace() != Some(RNG_NAMESPACE) {
        return Err(Error::WrongGrammarNamespace {
            namespace: tag.namespace().map(str::to_string),
            tag: tag.name().to_string(),
        });
    }
    Ok(())
}

impl Grammar {
    /// Build the grammar model from a parsed XML document
    pub fn from_xml(doc: &Document, limits: &Limits) -> Result<Self> {
        check_root_namespace(doc)?;

        let root = doc.root_element();
        if classify(root).is_none() {
            return Err(Error::MalformedDocument(format!(
                "'{}' is not a RELAX NG pattern or grammar",
                root.tag_name().name()
            )));
        }

        let mut nodes: Vec<GrammarNode> = Vec::new();
        // (xml node, parent in the arena, depth)
        let mut stack: Vec<(Node, Option<NodeId>, usize)> = vec![(root, None, 1)];

        while let Some((xml, parent, depth)) = stack.pop() {
            let Some(kind) = classify(xml) else {
                let tag = xml.tag_name();
                match tag.namespace() {
                    Some(RNG_NAMESPACE) => warn!("Skipping unknown RELAX NG element '{}'", tag.name()),
                    Some(ns) if FOREIGN_NAMESPACES.contains(&ns) => trace!("Skipping {} from {}", tag.name(), ns),
                    _ => debug!("Skipping foreign element '{}'", tag.name()),
                }
                continue;
            };
            limits.check_xml_depth(depth)?;

            let id = NodeId(nodes.len());
            let mut node = GrammarNode::new(kind);
            node.parent = parent;

            for attribute in xml.attributes() {
                if attribute.namespace().is_none() {
                    let value = if attribute.name() == "ns" {
                        attribute.value().to_string()
                    } else {
                        attribute.value().trim().to_string()
                    };
                    node.attributes.insert(attribute.name().to_string(), value);
                }
            }

            for namespace in xml.namespaces() {
                let Some(prefix) = namespace.name() else {
                    continue;
                };
                let inherited = xml
                    .parent_element()
                    .and_then(|p| p.lookup_namespace_uri(Some(prefix)));
                if inherited != Some(namespace.uri()) {
                    node.namespaces.add_prefix(prefix, namespace.uri());
                }
            }

            if kind == NodeKind::Value {
                // a value has no child nodes, so a kept next sibling gets the next id
                let next = xml.next_sibling_element();
                if next.and_then(classify) == Some(NodeKind::Documentation) {
                    node.annotation = Some(NodeId(id.0 + 1));
                }
            }

            if kind.holds_text() {
                node.text = Some(text_content(xml, kind));
            } else {
                for child in xml.children().filter(Node::is_element).collect::<Vec<_>>().into_iter().rev() {
                    stack.push((child, Some(id), depth + 1));
                }
            }

            if let Some(parent) = parent {
                nodes[parent.0].children.push(id);
            }
            nodes.push(node);
            limits.check_grammar_nodes(nodes.len())?;
        }

        debug!("Built grammar model with {} nodes", nodes.len());
        Ok(Grammar::from_nodes(nodes))
    }
}

fn classify(node: Node) -> Option<NodeKind> {
    let tag = node.tag_name();
    match tag.namespace() {
        Some(RNG_NAMESPACE) => NodeKind::from_rng_tag(tag.name()),
        Some(ANNOTATIONS_NAMESPACE) if tag.name() == "documentation" => Some(NodeKind::Documentation),
        _ => None,
    }
}

fn text_content(node: Node, kind: NodeKind) -> String {
    let text: String = match kind {
        // documentation may carry inline markup, keep all of its text
        NodeKind::Documentation => node
            .descendants()
            .filter(Node::is_text)
            .filter_map(|n| n.text())
            .collect(),
        _ => node
            .children()
            .filter(Node::is_text)
            .filter_map(|n| n.text())
            .collect(),
    };
    match kind {
        NodeKind::Name => text.trim().to_string(),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(text: &str) -> Result<Grammar> {
        let doc = Document::parse(text)?;
        Grammar::from_xml(&doc, &Limits::default())
    }

    #[test]
    fn test_document_order_and_parents() {
        let g = build(
            r#"<element name="a" xmlns="http://relaxng.org/ns/structure/1.0">
                 <element name="b"><text/></element>
                 <element name="c"><empty/></element>
               </element>"#,
        )
        .unwrap();

        let kinds: Vec<NodeKind> = g.node_ids().map(|id| g.kind(id)).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Element,
                NodeKind::Element,
                NodeKind::Text,
                NodeKind::Element,
                NodeKind::Empty
            ]
        );
        assert_eq!(g.children(NodeId(0)), &[NodeId(1), NodeId(3)]);
        assert_eq!(g.parent(NodeId(2)), Some(NodeId(1)));
    }

    #[test]
    fn test_foreign_markup_is_dropped() {
        let g = build(
            r#"<element name="a" xmlns="http://relaxng.org/ns/structure/1.0"
                        xmlns:a="http://relaxng.org/ns/compatibility/annotations/1.0"
                        xmlns:s="http://purl.oclc.org/dsdl/schematron">
                 <!-- a comment -->
                 <a:documentation>Root <b xmlns="">element</b></a:documentation>
                 <s:pattern><s:rule context="a"/></s:pattern>
                 <text/>
               </element>"#,
        )
        .unwrap();

        assert_eq!(g.len(), 3);
        let doc = g.documentation(g.root()).unwrap();
        assert_eq!(g.node(doc).text(), "Root element");
    }

    #[test]
    fn test_value_annotation_must_follow_directly() {
        let g = build(
            r#"<choice xmlns="http://relaxng.org/ns/structure/1.0"
                       xmlns:a="http://relaxng.org/ns/compatibility/annotations/1.0"
                       xmlns:h="http://www.w3.org/1999/xhtml">
                 <value>a</value>
                 <h:p>x</h:p>
                 <a:documentation>About b</a:documentation>
                 <value>b</value>
                 <a:documentation>About c</a:documentation>
                 <value>c</value>
               </choice>"#,
        )
        .unwrap();

        let values: Vec<NodeId> = g.nodes_of_kind(NodeKind::Value).collect();
        assert_eq!(g.node(values[0]).annotation, None);
        let annotation = g.node(values[1]).annotation.unwrap();
        assert_eq!(g.node(annotation).text(), "About c");
        assert_eq!(g.node(values[2]).annotation, None);
    }

    #[test]
    fn test_namespace_declarations_are_recorded_where_made() {
        let g = build(
            r#"<element name="db:book" xmlns="http://relaxng.org/ns/structure/1.0"
                        xmlns:db="http://docbook.org/ns/docbook">
                 <element name="x:title" xmlns:x="urn:x"><text/></element>
               </element>"#,
        )
        .unwrap();

        assert_eq!(
            g.node(NodeId(0)).namespaces.get_namespace("db"),
            Some("http://docbook.org/ns/docbook")
        );
        let inner = &g.node(NodeId(1)).namespaces;
        assert_eq!(inner.get_namespace("x"), Some("urn:x"));
        assert_eq!(inner.get_namespace("db"), None);
    }

    #[test]
    fn test_wrong_root_namespace() {
        let err = build(r#"<wrongelement xmlns="urn:x-test:wrong-ns"/>"#).unwrap_err();
        match err {
            Error::WrongGrammarNamespace { namespace, tag } => {
                assert_eq!(namespace.as_deref(), Some("urn:x-test:wrong-ns"));
                assert_eq!(tag, "wrongelement");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_input() {
        let err = build(r#"<element name="a" xmlns="http://relaxng.org/ns/structure/1.0">"#).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn test_depth_limit() {
        let doc = Document::parse(
            r#"<element name="a" xmlns="http://relaxng.org/ns/structure/1.0">
                 <group><group><group><text/></group></group></group>
               </element>"#,
        )
        .unwrap();
        let limits = Limits {
            max_xml_depth: 3,
            ..Limits::default()
        };
        let err = Grammar::from_xml(&doc, &limits).unwrap_err();
        assert!(matches!(err, Error::LimitExceeded(_)));
    }
}
