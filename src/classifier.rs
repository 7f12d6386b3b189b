//! Content classification
//!
//! Turns `attribute` and `element` patterns into documentation records by
//! structural descent over their content models.

use crate::builder::ElementIndex;
use crate::grammar::{Grammar, NodeId, NodeKind};
use crate::records::{
    AttributeRecord, AttributeType, ChildRef, Datatype, DocumentationRecord, EnumValue, Param, Use,
};
use crate::resolver::Resolver;

/// Classifies attribute and element patterns of one grammar
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'g> {
    resolver: Resolver<'g>,
    index: &'g ElementIndex,
}

impl<'g> Classifier<'g> {
    /// Create a classifier using the element ids of `index`
    pub fn new(grammar: &'g Grammar, index: &'g ElementIndex) -> Self {
        Self {
            resolver: Resolver::new(grammar),
            index,
        }
    }

    fn grammar(&self) -> &'g Grammar {
        self.resolver.grammar()
    }

    /// Build the documentation record of an `element` pattern
    pub fn classify_element(&self, element: NodeId) -> DocumentationRecord {
        let children = self
            .resolver
            .descend_for_kind(element, NodeKind::Element)
            .into_iter()
            .filter_map(|child| {
                self.index.id_of(child).map(|id| ChildRef {
                    id,
                    name: self.resolver.element_name(child),
                })
            })
            .collect();

        let attributes = self
            .resolver
            .descend_for_kind(element, NodeKind::Attribute)
            .into_iter()
            .map(|attribute| self.classify_attribute(attribute))
            .collect();

        DocumentationRecord {
            id: self.index.id_of(element).unwrap_or_default(),
            name: self.resolver.element_name(element),
            namespace: self.resolver.namespace_of(element),
            description: description_of(self.grammar(), element),
            children,
            attributes,
        }
    }

    /// Build the record of an `attribute` pattern
    pub fn classify_attribute(&self, attribute: NodeId) -> AttributeRecord {
        let optional = self
            .resolver
            .ascend_for_wrapper(attribute, NodeKind::Optional, NodeKind::Element);

        AttributeRecord {
            name: self.resolver.attribute_name(attribute),
            namespace: self.resolver.namespace_of(attribute),
            description: description_of(self.grammar(), attribute),
            usage: if optional { Use::Optional } else { Use::Required },
            data_type: self.attribute_type(attribute),
        }
    }

    /// Classify the content of an `attribute` pattern.
    ///
    /// Branches are tried in order: datatype, text, enumeration, single
    /// value. An attribute without any content pattern is text.
    pub fn attribute_type(&self, attribute: NodeId) -> AttributeType {
        let grammar = self.grammar();
        let has_content = grammar
            .content_children(attribute)
            .any(|c| grammar.kind(c) != NodeKind::Documentation);
        if !has_content {
            return AttributeType::Text;
        }

        if let Some(data) = self.resolver.first_of_kind(attribute, NodeKind::Data) {
            return AttributeType::Primitive(self.datatype(data));
        }
        if self.resolver.first_of_kind(attribute, NodeKind::Text).is_some() {
            return AttributeType::Text;
        }
        if let Some(choice) = self.resolver.first_of_kind(attribute, NodeKind::Choice) {
            let values = self
                .resolver
                .descend_for_kind(choice, NodeKind::Value)
                .into_iter()
                .map(|value| self.enum_value(value))
                .collect();
            return AttributeType::Enum { values };
        }
        if let Some(value) = self.resolver.first_of_kind(attribute, NodeKind::Value) {
            return AttributeType::Enum {
                values: vec![self.enum_value(value)],
            };
        }

        AttributeType::Unknown
    }

    fn datatype(&self, data: NodeId) -> Datatype {
        let grammar = self.grammar();
        let params = grammar
            .children(data)
            .iter()
            .filter(|c| grammar.kind(**c) == NodeKind::Param)
            .map(|p| {
                let node = grammar.node(*p);
                Param {
                    name: node.name().unwrap_or_default().to_string(),
                    value: node.text().to_string(),
                }
            })
            .collect();

        Datatype {
            name: grammar.node(data).attribute("type").unwrap_or_default().to_string(),
            description: description_of(grammar, data),
            params,
        }
    }

    fn enum_value(&self, value: NodeId) -> EnumValue {
        let grammar = self.grammar();
        let description = grammar
            .node(value)
            .annotation
            .map(|doc| strip_newlines(grammar.node(doc).text()))
            .unwrap_or_default();

        EnumValue {
            value: grammar.node(value).text().to_string(),
            description,
        }
    }
}

/// Text of the first direct `a:documentation` child, newline-stripped
pub fn description_of(grammar: &Grammar, node: NodeId) -> String {
    grammar
        .documentation(node)
        .map(|doc| strip_newlines(grammar.node(doc).text()))
        .unwrap_or_default()
}

/// Join the non-blank lines of a text with single spaces
pub fn strip_newlines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
