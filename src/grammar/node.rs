//! Grammar nodes and the closed set of RELAX NG node kinds

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::namespaces::NamespaceContext;

/// Index of a node inside the grammar arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in document order
    pub fn index(self) -> usize {
        self.0
    }
}

/// Kind of a grammar node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    /// `element` pattern
    Element,
    /// `attribute` pattern
    Attribute,
    /// Named pattern definition
    Define,
    /// Reference to a definition in the current grammar
    Ref,
    /// Reference to a definition in the parent grammar
    ParentRef,
    /// Grammar root
    Grammar,
    /// Start pattern of a grammar
    Start,
    /// Inclusion of an external grammar
    Include,
    /// Reference to an external pattern
    ExternalRef,
    /// `zeroOrMore` operator
    ZeroOrMore,
    /// `oneOrMore` operator
    OneOrMore,
    /// Whitespace separated list
    List,
    /// Ordered group
    Group,
    /// `optional` operator
    Optional,
    /// Unordered group
    Interleave,
    /// Alternatives (pattern or name class)
    Choice,
    /// Datatype pattern
    Data,
    /// Arbitrary text
    Text,
    /// Empty content
    Empty,
    /// Pattern that never matches
    NotAllowed,
    /// Datatype parameter
    Param,
    /// Fixed value
    Value,
    /// Name class matching a single name
    Name,
    /// Name class matching any name
    AnyName,
    /// Name class matching any name in a namespace
    NsName,
    /// Exclusion from a name class or datatype
    Except,
    /// Grouping of grammar content
    Div,
    /// Mixed content
    Mixed,
    /// `a:documentation` annotation
    Documentation,
}

impl NodeKind {
    /// Map a local name in the RELAX NG structural namespace to its kind
    pub fn from_rng_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "element" => Self::Element,
            "attribute" => Self::Attribute,
            "define" => Self::Define,
            "ref" => Self::Ref,
            "parentRef" => Self::ParentRef,
            "grammar" => Self::Grammar,
            "start" => Self::Start,
            "include" => Self::Include,
            "externalRef" => Self::ExternalRef,
            "zeroOrMore" => Self::ZeroOrMore,
            "oneOrMore" => Self::OneOrMore,
            "list" => Self::List,
            "group" => Self::Group,
            "optional" => Self::Optional,
            "interleave" => Self::Interleave,
            "choice" => Self::Choice,
            "data" => Self::Data,
            "text" => Self::Text,
            "empty" => Self::Empty,
            "notAllowed" => Self::NotAllowed,
            "param" => Self::Param,
            "value" => Self::Value,
            "name" => Self::Name,
            "anyName" => Self::AnyName,
            "nsName" => Self::NsName,
            "except" => Self::Except,
            "div" => Self::Div,
            "mixed" => Self::Mixed,
            _ => return None,
        };
        Some(kind)
    }

    /// Element tag of this kind
    pub fn tag(self) -> &'static str {
        match self {
            Self::Element => "element",
            Self::Attribute => "attribute",
            Self::Define => "define",
            Self::Ref => "ref",
            Self::ParentRef => "parentRef",
            Self::Grammar => "grammar",
            Self::Start => "start",
            Self::Include => "include",
            Self::ExternalRef => "externalRef",
            Self::ZeroOrMore => "zeroOrMore",
            Self::OneOrMore => "oneOrMore",
            Self::List => "list",
            Self::Group => "group",
            Self::Optional => "optional",
            Self::Interleave => "interleave",
            Self::Choice => "choice",
            Self::Data => "data",
            Self::Text => "text",
            Self::Empty => "empty",
            Self::NotAllowed => "notAllowed",
            Self::Param => "param",
            Self::Value => "value",
            Self::Name => "name",
            Self::AnyName => "anyName",
            Self::NsName => "nsName",
            Self::Except => "except",
            Self::Div => "div",
            Self::Mixed => "mixed",
            Self::Documentation => "documentation",
        }
    }

    /// References that expand to the children of a definition
    pub fn is_reference(self) -> bool {
        matches!(self, Self::Ref | Self::ParentRef)
    }

    /// Kinds that keep their content as text instead of child nodes
    pub fn holds_text(self) -> bool {
        matches!(self, Self::Value | Self::Param | Self::Name | Self::Documentation)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A node of the parsed grammar tree
#[derive(Debug, Clone)]
pub struct GrammarNode {
    /// Node kind
    pub kind: NodeKind,
    /// Unqualified attributes in document order
    pub attributes: IndexMap<String, String>,
    /// Inline text content
    pub text: Option<String>,
    /// Child nodes in document order
    pub children: Vec<NodeId>,
    /// Parent node (non-owning)
    pub parent: Option<NodeId>,
    /// Prefix declarations made on this node
    pub namespaces: NamespaceContext,
    /// `a:documentation` directly following a `value` in the source
    pub annotation: Option<NodeId>,
}

impl GrammarNode {
    /// Create a node without attributes or children
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
            parent: None,
            namespaces: NamespaceContext::new(),
            annotation: None,
        }
    }

    /// Get an attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// The `name` attribute
    pub fn name(&self) -> Option<&str> {
        self.attribute("name")
    }

    /// Text content, empty if none
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}
