//! Reference resolution over the grammar graph
//!
//! `ref` → `define` links turn the grammar tree into a possibly cyclic graph.
//! Every search here is an explicit worklist with a visited set keyed by
//! define, so recursive grammars terminate without relying on the call stack.

use log::trace;
use std::collections::{HashSet, VecDeque};

use crate::grammar::{DefineKey, Grammar, NodeId, NodeKind};
use crate::namespaces::resolve_prefixed;

/// Name used for elements and attributes matched by a name class
pub const ANY_NAME: &str = "anyName";

/// Resolves references, ancestor searches and names over one grammar
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'g> {
    grammar: &'g Grammar,
}

impl<'g> Resolver<'g> {
    /// Create a resolver for a grammar
    pub fn new(grammar: &'g Grammar) -> Self {
        Self { grammar }
    }

    /// The grammar this resolver reads
    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// Children of all definitions a `ref`/`parentRef` points at.
    ///
    /// Unresolved references yield an empty list.
    pub fn deref(&self, reference: NodeId) -> Vec<NodeId> {
        match self.grammar.define_key(reference) {
            Some(key) => self.define_children(&key),
            None => Vec::new(),
        }
    }

    fn define_children(&self, key: &DefineKey) -> Vec<NodeId> {
        let defines = self.grammar.defines().lookup(key);
        if defines.is_empty() {
            trace!("Unresolved reference to '{}'", key.name);
        }
        defines
            .iter()
            .flat_map(|d| self.grammar.children(*d).iter().copied())
            .collect()
    }

    /// Search upwards from `node` for an ancestor of kind `wrapper`.
    ///
    /// A `stop` ancestor ends the path it was found on. A `define` forks the
    /// search to every reference pointing at it; each definition is forked at
    /// most once per search.
    pub fn ascend_for_wrapper(&self, node: NodeId, wrapper: NodeKind, stop: NodeKind) -> bool {
        let mut queue: VecDeque<NodeId> = self.grammar.parent(node).into_iter().collect();
        let mut visited: HashSet<DefineKey> = HashSet::new();

        while let Some(current) = queue.pop_front() {
            let kind = self.grammar.kind(current);
            if kind == stop {
                continue;
            }
            if kind == wrapper {
                trace!("Found {} above {}", wrapper, self.grammar.path(node));
                return true;
            }
            if kind == NodeKind::Define {
                if let Some(key) = self.grammar.define_key(current) {
                    if visited.insert(key.clone()) {
                        queue.extend(self.grammar.defines().references(&key).iter().copied());
                    }
                }
            }
            if let Some(parent) = self.grammar.parent(current) {
                queue.push_back(parent);
            }
        }

        false
    }

    /// Collect the nodes of kind `target` below `node` in document order.
    ///
    /// References are expanded inline, each definition once per search.
    /// Nested `element`s are boundaries: they are collected when they are the
    /// target but never entered, and the same holds for `attribute`s. Matched
    /// nodes are not entered either.
    pub fn descend_for_kind(&self, node: NodeId, target: NodeKind) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut visited: HashSet<DefineKey> = HashSet::new();
        let mut stack: Vec<NodeId> = self.grammar.content_children(node).collect();
        stack.reverse();

        while let Some(current) = stack.pop() {
            let kind = self.grammar.kind(current);
            if kind == target {
                found.push(current);
                continue;
            }
            match kind {
                NodeKind::Element | NodeKind::Attribute => {}
                NodeKind::Ref | NodeKind::ParentRef => {
                    if let Some(key) = self.grammar.define_key(current) {
                        if visited.insert(key.clone()) {
                            stack.extend(self.define_children(&key).into_iter().rev());
                        }
                    }
                }
                _ => stack.extend(self.grammar.children(current).iter().rev().copied()),
            }
        }

        found
    }

    /// First node of kind `target` below `node`, see [`Self::descend_for_kind`]
    pub fn first_of_kind(&self, node: NodeId, target: NodeKind) -> Option<NodeId> {
        self.descend_for_kind(node, target).into_iter().next()
    }

    /// Name written on an `element` or `attribute`: its `name` attribute, or
    /// the text of a `<name>` name class.
    pub fn declared_name(&self, node: NodeId) -> Option<&'g str> {
        let grammar = self.grammar;
        if let Some(name) = grammar.node(node).name() {
            return Some(name);
        }
        grammar
            .name_class(node)
            .filter(|nc| grammar.kind(*nc) == NodeKind::Name)
            .map(|nc| grammar.node(nc).text())
    }

    /// Documented name of an element.
    ///
    /// The declared name wins; an anonymous element takes the name of its
    /// nearest enclosing `define`, and falls back to `anyName`.
    pub fn element_name(&self, element: NodeId) -> String {
        if let Some(name) = self.declared_name(element) {
            return name.to_string();
        }
        self.grammar
            .enclosing(element, NodeKind::Define)
            .and_then(|d| self.grammar.node(d).name())
            .unwrap_or(ANY_NAME)
            .to_string()
    }

    /// Documented name of an attribute
    pub fn attribute_name(&self, attribute: NodeId) -> String {
        self.declared_name(attribute).unwrap_or(ANY_NAME).to_string()
    }

    /// Namespace of an `element` or `attribute`.
    ///
    /// Precedence: prefix of the name, explicit `ns` (on a `<name>` name
    /// class, then on the node), nearest ancestor `ns` for elements only,
    /// then no namespace. An empty `ns` means no namespace and ends the search.
    pub fn namespace_of(&self, node: NodeId) -> Option<String> {
        let grammar = self.grammar;
        let name_class = grammar
            .name_class(node)
            .filter(|nc| grammar.kind(*nc) == NodeKind::Name);

        if let Some(name) = self.declared_name(node) {
            let scope = name_class.unwrap_or(node);
            if let Some(namespace) = resolve_prefixed(name, grammar.namespace_scopes(scope)) {
                return Some(namespace);
            }
        }

        let explicit = name_class
            .and_then(|nc| grammar.node(nc).attribute("ns"))
            .or_else(|| grammar.node(node).attribute("ns"));
        if let Some(ns) = explicit {
            return non_empty(ns);
        }

        if grammar.kind(node) == NodeKind::Element {
            for ancestor in grammar.ancestors(node) {
                if let Some(ns) = grammar.node(ancestor).attribute("ns") {
                    return non_empty(ns);
                }
            }
        }

        None
    }
}

fn non_empty(ns: &str) -> Option<String> {
    if ns.is_empty() {
        None
    } else {
        Some(ns.to_string())
    }
}
