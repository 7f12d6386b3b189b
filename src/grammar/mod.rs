//! RELAX NG grammar model
//!
//! A parsed grammar is an arena of [`GrammarNode`]s stored in document
//! order. Children are owned through the arena; parent links are plain
//! indices and never imply ownership. The [`DefineTable`] is built once when
//! the grammar is constructed and is read-only afterwards.

mod defines;
mod node;
mod parse;

pub use defines::{DefineKey, DefineTable};
pub use node::{GrammarNode, NodeId, NodeKind};
pub use parse::check_root_namespace;

use crate::namespaces::NamespaceContext;

/// Parsed RELAX NG grammar
#[derive(Debug, Clone)]
pub struct Grammar {
    nodes: Vec<GrammarNode>,
    defines: DefineTable,
}

impl Grammar {
    /// Create a grammar from nodes stored in document order, root first
    pub(crate) fn from_nodes(nodes: Vec<GrammarNode>) -> Self {
        let defines = DefineTable::build(&nodes);
        Self { nodes, defines }
    }

    /// Root node
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Get a node by id
    pub fn node(&self, id: NodeId) -> &GrammarNode {
        &self.nodes[id.0]
    }

    /// Kind of a node
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the grammar has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The define table of this grammar
    pub fn defines(&self) -> &DefineTable {
        &self.defines
    }

    /// All node ids in document order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Node ids of a given kind in document order
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = NodeId> + '_ {
        self.node_ids().filter(move |id| self.kind(*id) == kind)
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Children of a node in document order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Ancestors of a node, nearest first
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            grammar: self,
            next: self.parent(id),
        }
    }

    /// Nearest ancestor of a given kind
    pub fn enclosing(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.ancestors(id).find(|a| self.kind(*a) == kind)
    }

    /// Name class child of an `element` or `attribute` without a `name`
    /// attribute: its first child that is not an annotation.
    pub fn name_class(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id);
        if !matches!(node.kind, NodeKind::Element | NodeKind::Attribute) || node.name().is_some() {
            return None;
        }
        node.children
            .iter()
            .copied()
            .find(|c| self.kind(*c) != NodeKind::Documentation)
    }

    /// Children that make up the content pattern (the name class excluded)
    pub fn content_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let name_class = self.name_class(id);
        self.children(id)
            .iter()
            .copied()
            .filter(move |c| Some(*c) != name_class)
    }

    /// First direct `a:documentation` child
    pub fn documentation(&self, id: NodeId) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|c| self.kind(*c) == NodeKind::Documentation)
    }

    /// Namespace declaration scopes from a node outwards
    pub fn namespace_scopes(&self, id: NodeId) -> impl Iterator<Item = &NamespaceContext> + '_ {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .map(move |n| &self.node(n).namespaces)
    }

    /// Define key a `define`, `ref` or `parentRef` node belongs to
    pub fn define_key(&self, id: NodeId) -> Option<DefineKey> {
        self.defines.key_of(&self.nodes, id)
    }

    /// Location path of a node, e.g. `/grammar/define[2]/element`
    pub fn path(&self, id: NodeId) -> String {
        let mut steps = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            let kind = self.kind(node);
            let step = match self.parent(node) {
                Some(parent) => {
                    let same: Vec<NodeId> = self
                        .children(parent)
                        .iter()
                        .copied()
                        .filter(|c| self.kind(*c) == kind)
                        .collect();
                    if same.len() > 1 {
                        let position = same.iter().position(|c| *c == node).unwrap_or(0);
                        format!("{}[{}]", kind, position + 1)
                    } else {
                        kind.to_string()
                    }
                }
                None => kind.to_string(),
            };
            steps.push(step);
            current = self.parent(node);
        }
        steps.reverse();
        format!("/{}", steps.join("/"))
    }
}

/// Iterator over the ancestors of a node
pub struct Ancestors<'g> {
    grammar: &'g Grammar,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.grammar.parent(current);
        Some(current)
    }
}
