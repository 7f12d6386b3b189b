//! XML namespace handling
//!
//! Well-known namespace URIs and the per-node prefix declarations used to
//! resolve `prefix:local` names found in a grammar.

use crate::names::split_qname;
use indexmap::IndexMap;

/// XML Namespace URI
pub type NamespaceUri = String;

/// Namespace prefix
pub type Prefix = String;

/// RELAX NG structural namespace
pub const RNG_NAMESPACE: &str = "http://relaxng.org/ns/structure/1.0";

/// RELAX NG DTD compatibility annotations namespace
pub const ANNOTATIONS_NAMESPACE: &str = "http://relaxng.org/ns/compatibility/annotations/1.0";

/// XML namespace, bound to the `xml` prefix
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// DocBook namespace
pub const DOCBOOK_NAMESPACE: &str = "http://docbook.org/ns/docbook";

/// Schematron namespace
pub const SCHEMATRON_NAMESPACE: &str = "http://purl.oclc.org/dsdl/schematron";

/// XHTML namespace
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// XLink namespace
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Namespaces whose content may be embedded in a grammar as foreign markup
pub const FOREIGN_NAMESPACES: &[&str] = &[
    ANNOTATIONS_NAMESPACE,
    DOCBOOK_NAMESPACE,
    SCHEMATRON_NAMESPACE,
    XHTML_NAMESPACE,
    XLINK_NAMESPACE,
];

/// Prefix declarations made on a single node (`xmlns:prefix="uri"`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceContext {
    /// Mapping from prefix to namespace URI
    prefixes: IndexMap<Prefix, NamespaceUri>,
}

impl NamespaceContext {
    /// Create a new empty namespace context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a namespace prefix mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Get the namespace for a prefix
    pub fn get_namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(|s| s.as_str())
    }

    /// Check whether no prefix is declared
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Iterate over the declared prefixes in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }
}

/// Resolve the prefix of a `prefix:local` name through a chain of scopes,
/// innermost first.
///
/// Returns `None` for unprefixed names and for unknown prefixes. The `xml`
/// prefix is always bound.
pub fn resolve_prefixed<'a, I>(name: &str, scopes: I) -> Option<String>
where
    I: IntoIterator<Item = &'a NamespaceContext>,
{
    let (prefix, _local) = split_qname(name);
    let prefix = prefix?;
    if prefix == "xml" {
        return Some(XML_NAMESPACE.to_string());
    }
    scopes
        .into_iter()
        .find_map(|scope| scope.get_namespace(prefix))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_context() {
        let mut ctx = NamespaceContext::new();
        assert!(ctx.is_empty());
        ctx.add_prefix("db", DOCBOOK_NAMESPACE);

        assert_eq!(ctx.get_namespace("db"), Some(DOCBOOK_NAMESPACE));
        assert_eq!(ctx.get_namespace("xs"), None);
        assert_eq!(ctx.iter().count(), 1);
    }

    #[test]
    fn test_resolve_prefixed_inner_scope_wins() {
        let mut outer = NamespaceContext::new();
        outer.add_prefix("p", "urn:outer");
        let mut inner = NamespaceContext::new();
        inner.add_prefix("p", "urn:inner");

        assert_eq!(
            resolve_prefixed("p:foo", [&inner, &outer]),
            Some("urn:inner".to_string())
        );
        assert_eq!(
            resolve_prefixed("p:foo", [&outer]),
            Some("urn:outer".to_string())
        );
    }

    #[test]
    fn test_resolve_prefixed_special_cases() {
        let empty = NamespaceContext::new();
        assert_eq!(
            resolve_prefixed("xml:lang", [&empty]),
            Some(XML_NAMESPACE.to_string())
        );
        assert_eq!(resolve_prefixed("foo", [&empty]), None);
        assert_eq!(resolve_prefixed("q:foo", [&empty]), None);
    }
}
