//! Content model diagrams
//!
//! Each documented element gets a graph of the particles of its content
//! model, rendered as Graphviz DOT text.

use lazy_static::lazy_static;
use log::trace;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::str::FromStr;

use crate::error::Error;
use crate::grammar::{DefineKey, Grammar, NodeId, NodeKind};
use crate::resolver::Resolver;

/// Level of detail of a diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagramMode {
    /// Only elements and attributes
    Simple,
    /// Every particle
    #[default]
    Full,
}

impl FromStr for DiagramMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(DiagramMode::Simple),
            "full" => Ok(DiagramMode::Full),
            other => Err(Error::Invocation(format!(
                "unknown diagram mode '{}', expected 'full' or 'simple'",
                other
            ))),
        }
    }
}

/// Graphviz attributes of a diagram node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStyle {
    /// Node shape
    pub shape: &'static str,
    /// Node style
    pub style: Option<&'static str>,
    /// Fill color
    pub fill_color: Option<&'static str>,
    /// Fixed label, if the kind has one
    pub glyph: Option<&'static str>,
}

impl NodeStyle {
    const fn new(shape: &'static str) -> Self {
        Self {
            shape,
            style: None,
            fill_color: None,
            glyph: None,
        }
    }

    const fn filled(shape: &'static str, style: &'static str, fill_color: &'static str) -> Self {
        Self {
            shape,
            style: Some(style),
            fill_color: Some(fill_color),
            glyph: None,
        }
    }

    const fn operator(glyph: &'static str) -> Self {
        Self {
            shape: "circle",
            style: None,
            fill_color: None,
            glyph: Some(glyph),
        }
    }
}

const DEFAULT_STYLE: NodeStyle = NodeStyle::new("ellipse");
const REFERENCE_STYLE: NodeStyle = NodeStyle {
    shape: "box",
    style: Some("dashed"),
    fill_color: None,
    glyph: None,
};

lazy_static! {
    /// Diagram style of each drawn node kind
    pub static ref NODE_STYLES: HashMap<NodeKind, NodeStyle> = {
        let mut m = HashMap::new();
        m.insert(NodeKind::Element, NodeStyle::filled("box", "rounded,filled", "#c0ffee"));
        m.insert(NodeKind::Attribute, NodeStyle::filled("ellipse", "filled", "#fca9a9"));
        m.insert(NodeKind::Data, NodeStyle::filled("ellipse", "filled", "#a9bdfc"));
        m.insert(NodeKind::Value, NodeStyle::filled("ellipse", "filled", "#a2a4aa"));
        m.insert(NodeKind::Param, NodeStyle::filled("ellipse", "filled", "#f9d368"));
        m.insert(NodeKind::ZeroOrMore, NodeStyle::operator("*"));
        m.insert(NodeKind::OneOrMore, NodeStyle::operator("+"));
        m.insert(NodeKind::Optional, NodeStyle::operator("?"));
        m.insert(NodeKind::Choice, NodeStyle::operator("|"));
        m.insert(NodeKind::Interleave, NodeStyle::operator("&"));
        m.insert(NodeKind::Except, NodeStyle::operator("-"));
        m.insert(NodeKind::Group, NodeStyle::operator("group"));
        m.insert(NodeKind::List, NodeStyle::operator("list"));
        m.insert(NodeKind::Mixed, NodeStyle::operator("mixed"));
        m.insert(NodeKind::NsName, NodeStyle::new("circle"));
        m.insert(NodeKind::Text, NodeStyle::new("rect"));
        m.insert(NodeKind::Empty, NodeStyle::new("rect"));
        m.insert(NodeKind::NotAllowed, NodeStyle::new("rect"));
        m.insert(NodeKind::AnyName, NodeStyle::new("rect"));
        m.insert(NodeKind::Div, NodeStyle::new("rect"));
        m
    };
}

/// Style of a node kind
pub fn style_of(kind: NodeKind) -> NodeStyle {
    NODE_STYLES.get(&kind).copied().unwrap_or(DEFAULT_STYLE)
}

/// A drawn particle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramNode {
    /// Kind of the particle
    pub kind: NodeKind,
    /// Label shown in the node
    pub label: String,
    /// Reference to a definition already drawn elsewhere in the diagram
    pub reference: bool,
}

impl DiagramNode {
    fn style(&self) -> NodeStyle {
        if self.reference {
            REFERENCE_STYLE
        } else {
            style_of(self.kind)
        }
    }
}

/// Diagram of one element's content model
#[derive(Debug, Clone)]
pub struct Diagram {
    /// Particles and parent → child edges
    pub graph: Graph<DiagramNode, ()>,
    /// The documented element
    pub root: NodeIndex,
}

impl Diagram {
    /// Number of drawn nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Labels of the nodes in insertion order
    pub fn labels(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .map(|i| self.graph[i].label.as_str())
            .collect()
    }

    /// Render as a Graphviz digraph
    pub fn to_dot(&self, name: &str) -> String {
        let mut dot = String::new();
        let _ = writeln!(dot, "digraph \"{}\" {{", escape_label(name));
        for index in self.graph.node_indices() {
            let node = &self.graph[index];
            let style = node.style();
            let _ = write!(
                dot,
                "  node{} [label=\"{}\", shape=\"{}\"",
                index.index(),
                escape_label(&node.label),
                style.shape
            );
            if let Some(s) = style.style {
                let _ = write!(dot, ", style=\"{}\"", s);
            }
            if let Some(color) = style.fill_color {
                let _ = write!(dot, ", fillcolor=\"{}\"", color);
            }
            dot.push_str("];\n");
        }
        for edge in self.graph.edge_references() {
            let _ = writeln!(dot, "  node{} -> node{};", edge.source().index(), edge.target().index());
        }
        dot.push_str("}\n");
        dot
    }
}

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Builds element diagrams over one grammar
#[derive(Debug, Clone, Copy)]
pub struct DiagramBuilder<'g> {
    resolver: Resolver<'g>,
    mode: DiagramMode,
}

impl<'g> DiagramBuilder<'g> {
    /// Create a builder drawing in `mode`
    pub fn new(grammar: &'g Grammar, mode: DiagramMode) -> Self {
        Self {
            resolver: Resolver::new(grammar),
            mode,
        }
    }

    /// Draw the content model of an `element` node.
    ///
    /// References are expanded in place. Expanding a definition a second
    /// time in the same diagram draws a dashed reference node instead, which
    /// also ends recursion.
    pub fn build(&self, element: NodeId) -> Diagram {
        let grammar = self.resolver.grammar();
        let mut graph = Graph::new();
        let root = graph.add_node(DiagramNode {
            kind: NodeKind::Element,
            label: self.resolver.element_name(element),
            reference: false,
        });

        let mut visited: HashSet<DefineKey> = grammar
            .enclosing(element, NodeKind::Define)
            .and_then(|d| grammar.define_key(d))
            .into_iter()
            .collect();

        let mut stack: Vec<(NodeId, NodeIndex)> = grammar
            .content_children(element)
            .map(|c| (c, root))
            .collect();
        stack.reverse();

        while let Some((current, parent)) = stack.pop() {
            let kind = grammar.kind(current);
            match kind {
                NodeKind::Documentation => continue,
                NodeKind::Ref | NodeKind::ParentRef => {
                    let Some(key) = grammar.define_key(current) else {
                        continue;
                    };
                    if visited.insert(key.clone()) {
                        let children = self.resolver.deref(current);
                        stack.extend(children.into_iter().rev().map(|c| (c, parent)));
                    } else {
                        trace!("Definition '{}' already drawn", key.name);
                        let index = graph.add_node(DiagramNode {
                            kind,
                            label: key.name,
                            reference: true,
                        });
                        graph.add_edge(parent, index, ());
                    }
                    continue;
                }
                _ => {}
            }

            if !self.draws(kind) {
                stack.extend(grammar.children(current).iter().rev().map(|c| (*c, parent)));
                continue;
            }

            let index = graph.add_node(DiagramNode {
                kind,
                label: self.label(current),
                reference: false,
            });
            graph.add_edge(parent, index, ());

            // simple diagrams stop at the first element or attribute
            if self.mode == DiagramMode::Full {
                let children: Vec<NodeId> = grammar.content_children(current).collect();
                stack.extend(children.into_iter().rev().map(|c| (c, index)));
            }
        }

        Diagram { graph, root }
    }

    fn draws(&self, kind: NodeKind) -> bool {
        match self.mode {
            DiagramMode::Simple => matches!(kind, NodeKind::Element | NodeKind::Attribute),
            DiagramMode::Full => !matches!(
                kind,
                NodeKind::Grammar | NodeKind::Start | NodeKind::Define | NodeKind::Include
            ),
        }
    }

    fn label(&self, id: NodeId) -> String {
        let grammar = self.resolver.grammar();
        let node = grammar.node(id);
        let style = style_of(node.kind);
        match node.kind {
            NodeKind::Element => self.resolver.element_name(id),
            NodeKind::Attribute => self
                .resolver
                .declared_name(id)
                .unwrap_or("name class")
                .to_string(),
            NodeKind::Data => node.attribute("type").unwrap_or_default().to_string(),
            NodeKind::Value | NodeKind::Name => node.text().to_string(),
            NodeKind::Param => node.name().unwrap_or_default().to_string(),
            NodeKind::NsName => node.attribute("ns").unwrap_or("No Namespace").to_string(),
            kind => style.glyph.unwrap_or(kind.tag()).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::Limits;
    use pretty_assertions::assert_eq;

    fn grammar(text: &str) -> Grammar {
        let doc = roxmltree::Document::parse(text).unwrap();
        Grammar::from_xml(&doc, &Limits::default()).unwrap()
    }

    fn element(g: &Grammar, name: &str) -> NodeId {
        g.nodes_of_kind(NodeKind::Element)
            .find(|e| g.node(*e).name() == Some(name))
            .unwrap()
    }

    const BOOK: &str = r#"
        <grammar xmlns="http://relaxng.org/ns/structure/1.0">
          <start><ref name="book"/></start>
          <define name="book">
            <element name="book">
              <optional><attribute name="lang"><data type="language"/></attribute></optional>
              <oneOrMore><ref name="chapter"/></oneOrMore>
            </element>
          </define>
          <define name="chapter">
            <element name="chapter">
              <choice><text/><ref name="book"/></choice>
            </element>
          </define>
        </grammar>"#;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("simple".parse::<DiagramMode>().unwrap(), DiagramMode::Simple);
        assert_eq!("full".parse::<DiagramMode>().unwrap(), DiagramMode::Full);
        assert!(matches!("fancy".parse::<DiagramMode>(), Err(Error::Invocation(_))));
        assert_eq!(DiagramMode::default(), DiagramMode::Full);
    }

    #[test]
    fn test_full_diagram() {
        let g = grammar(BOOK);
        let diagram = DiagramBuilder::new(&g, DiagramMode::Full).build(element(&g, "book"));

        assert_eq!(
            diagram.labels(),
            vec!["book", "?", "lang", "language", "+", "chapter", "|", "text", "book"]
        );
        let last = diagram.graph.node_indices().last().unwrap();
        assert!(diagram.graph[last].reference);
        assert_eq!(diagram.graph.edge_count(), diagram.node_count() - 1);
    }

    #[test]
    fn test_simple_diagram() {
        let g = grammar(BOOK);
        let diagram = DiagramBuilder::new(&g, DiagramMode::Simple).build(element(&g, "book"));

        assert_eq!(diagram.labels(), vec!["book", "lang", "chapter"]);
        for edge in diagram.graph.edge_references() {
            assert_eq!(edge.source(), diagram.root);
        }
    }

    #[test]
    fn test_self_reference_terminates() {
        let g = grammar(
            r#"<grammar xmlns="http://relaxng.org/ns/structure/1.0">
                 <start><ref name="node"/></start>
                 <define name="node">
                   <element name="node"><zeroOrMore><ref name="node"/></zeroOrMore></element>
                 </define>
               </grammar>"#,
        );
        let diagram = DiagramBuilder::new(&g, DiagramMode::Full).build(element(&g, "node"));
        assert_eq!(diagram.labels(), vec!["node", "*", "node"]);
    }

    #[test]
    fn test_dot_output() {
        let g = grammar(
            r#"<element name="say &quot;hi&quot;" xmlns="http://relaxng.org/ns/structure/1.0">
                 <attribute name="a"/>
               </element>"#,
        );
        let diagram = DiagramBuilder::new(&g, DiagramMode::Full).build(g.root());
        let dot = diagram.to_dot("say");

        assert_eq!(
            dot,
            "digraph \"say\" {\n  \
               node0 [label=\"say \\\"hi\\\"\", shape=\"box\", style=\"rounded,filled\", fillcolor=\"#c0ffee\"];\n  \
               node1 [label=\"a\", shape=\"ellipse\", style=\"filled\", fillcolor=\"#fca9a9\"];\n  \
               node0 -> node1;\n\
             }\n"
        );
    }
}
