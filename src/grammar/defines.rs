//! Define table: named pattern definitions and their references
//!
//! Definitions are scoped by the nearest enclosing `grammar` element. All
//! `define`s sharing a name within one grammar (RELAX NG `combine`) are kept
//! in document order. The reverse index from a definition to the `ref` and
//! `parentRef` nodes pointing at it is built in the same pass.

use indexmap::IndexMap;

use super::node::{GrammarNode, NodeId, NodeKind};

/// Key of a definition: enclosing grammar plus define name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DefineKey {
    /// Nearest enclosing `grammar` element (None for a bare pattern document)
    pub scope: Option<NodeId>,
    /// Define name
    pub name: String,
}

/// Lookup table from define name to define nodes
#[derive(Debug, Clone, Default)]
pub struct DefineTable {
    defines: IndexMap<DefineKey, Vec<NodeId>>,
    references: IndexMap<DefineKey, Vec<NodeId>>,
}

impl DefineTable {
    /// Build the table by scanning all nodes once
    pub fn build(nodes: &[GrammarNode]) -> Self {
        let mut table = Self::default();

        for (index, node) in nodes.iter().enumerate() {
            let id = NodeId(index);
            match node.kind {
                NodeKind::Define => {
                    if let Some(key) = key_for(nodes, id) {
                        table.defines.entry(key).or_default().push(id);
                    }
                }
                NodeKind::Ref | NodeKind::ParentRef => {
                    if let Some(key) = key_for(nodes, id) {
                        table.references.entry(key).or_default().push(id);
                    }
                }
                _ => {}
            }
        }

        table
    }

    /// Key a `define`, `ref` or `parentRef` node resolves to
    pub fn key_of(&self, nodes: &[GrammarNode], id: NodeId) -> Option<DefineKey> {
        key_for(nodes, id)
    }

    /// Define nodes registered under a key, empty if unresolved
    pub fn lookup(&self, key: &DefineKey) -> &[NodeId] {
        self.defines.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Reference nodes pointing at a key
    pub fn references(&self, key: &DefineKey) -> &[NodeId] {
        self.references.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if a key has at least one definition
    pub fn contains(&self, key: &DefineKey) -> bool {
        self.defines.contains_key(key)
    }

    /// Number of distinct definitions
    pub fn len(&self) -> usize {
        self.defines.len()
    }

    /// Check if no definition was found
    pub fn is_empty(&self) -> bool {
        self.defines.is_empty()
    }

    /// Iterate over definition keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &DefineKey> {
        self.defines.keys()
    }
}

fn key_for(nodes: &[GrammarNode], id: NodeId) -> Option<DefineKey> {
    let node = &nodes[id.0];
    let name = node.name()?.to_string();
    let scope = match node.kind {
        NodeKind::Define | NodeKind::Ref => enclosing_grammar(nodes, id),
        NodeKind::ParentRef => enclosing_grammar(nodes, id).and_then(|g| enclosing_grammar(nodes, g)),
        _ => return None,
    };
    Some(DefineKey { scope, name })
}

fn enclosing_grammar(nodes: &[GrammarNode], id: NodeId) -> Option<NodeId> {
    let mut current = nodes[id.0].parent;
    while let Some(parent) = current {
        if nodes[parent.0].kind == NodeKind::Grammar {
            return Some(parent);
        }
        current = nodes[parent.0].parent;
    }
    None
}
