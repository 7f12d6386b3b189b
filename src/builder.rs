//! Documentation assembly
//!
//! Every `element` pattern of the grammar gets one record. Ids are assigned
//! in document order, so the same input always yields the same ids.

use log::{debug, info};
use std::collections::HashMap;

use crate::classifier::Classifier;
use crate::grammar::{Grammar, NodeId, NodeKind};
use crate::records::Documentation;

/// Document-order numbering of the `element` patterns of a grammar
#[derive(Debug, Clone, Default)]
pub struct ElementIndex {
    elements: Vec<NodeId>,
    ids: HashMap<NodeId, usize>,
}

impl ElementIndex {
    /// Number all `element` patterns of a grammar
    pub fn enumerate(grammar: &Grammar) -> Self {
        let elements: Vec<NodeId> = grammar.nodes_of_kind(NodeKind::Element).collect();
        let ids = elements.iter().enumerate().map(|(id, node)| (*node, id)).collect();
        Self { elements, ids }
    }

    /// Record id of an `element` node
    pub fn id_of(&self, node: NodeId) -> Option<usize> {
        self.ids.get(&node).copied()
    }

    /// `element` node with a given record id
    pub fn node_of(&self, id: usize) -> Option<NodeId> {
        self.elements.get(id).copied()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the grammar has no element pattern
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// `(id, node)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.elements.iter().copied().enumerate()
    }
}

/// Builds the documentation of a grammar
pub struct DocumentationBuilder<'g> {
    grammar: &'g Grammar,
    index: ElementIndex,
}

impl<'g> DocumentationBuilder<'g> {
    /// Create a builder, numbering the elements of `grammar`
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            index: ElementIndex::enumerate(grammar),
        }
    }

    /// The element numbering used for record ids
    pub fn index(&self) -> &ElementIndex {
        &self.index
    }

    /// Consume the builder, keeping the element numbering
    pub fn into_index(self) -> ElementIndex {
        self.index
    }

    /// Build one record per `element` pattern, ordered by id
    pub fn build(&self) -> Documentation {
        info!("Documenting {} elements", self.index.len());
        let classifier = Classifier::new(self.grammar, &self.index);

        let elements = self
            .index
            .iter()
            .map(|(id, node)| {
                let record = classifier.classify_element(node);
                debug!(
                    "Element {} '{}': {} children, {} attributes",
                    id,
                    record.name,
                    record.children.len(),
                    record.attributes.len()
                );
                record
            })
            .collect();

        Documentation { elements }
    }
}
