//! Resolved qualified names: `(namespace_uri, local_name)` pairs.
//!
//! A [`QualifiedName`] is the registry's key. It is distinct from
//! [`crate::parser::QName`], which is the raw, possibly-prefixed string a
//! document spells a reference with (`"tns:Order"`); resolving a `QName`
//! against a declaring document's namespace table produces a
//! `QualifiedName`.

use crate::parser::QName;
use std::collections::HashMap;
use std::fmt;

/// The W3C XML Schema namespace, used for built-in scalar types
/// (`xs:string`, `xs:int`, ...) that never need registry lookup.
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    pub namespace_uri: String,
    pub local_name: String,
}

impl QualifiedName {
    pub fn new(namespace_uri: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace_uri: namespace_uri.into(),
            local_name: local_name.into(),
        }
    }

    /// A name in the empty namespace — used when no namespace can be
    /// determined per the qualified-name resolver's rule 4.
    pub fn unqualified(local_name: impl Into<String>) -> Self {
        Self::new(String::new(), local_name)
    }

    pub fn is_builtin_xsd(&self) -> bool {
        self.namespace_uri == XSD_NAMESPACE
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.namespace_uri, self.local_name)
    }
}

/// Resolves a possibly-prefixed [`QName`] to a [`QualifiedName`], given the
/// namespace declarations and target namespace of the document the
/// reference appears in.
///
/// This resolver is pure and memoized per `(name, document identity)` by
/// its caller (the registry builder and type expander each hold their own
/// small memo table keyed on the raw string plus the declaring document's
/// path, since the element-identity scoping called for in the distilled
/// contract collapses to document-identity here: every namespace
/// declaration this engine sees is hoisted to the document root by the
/// parser, so there is only one ancestor chain per document to search).
pub fn resolve_qname(
    name: &QName,
    document_namespaces: &HashMap<String, String>,
    document_target_namespace: Option<&str>,
) -> QualifiedName {
    match name.prefix() {
        Some(prefix) => {
            if let Some(uri) = document_namespaces.get(prefix) {
                QualifiedName::new(uri.clone(), name.local_name())
            } else if prefix == "tns" {
                QualifiedName::new(
                    document_target_namespace.unwrap_or_default(),
                    name.local_name(),
                )
            } else {
                QualifiedName::unqualified(name.local_name())
            }
        }
        None => QualifiedName::new(
            document_target_namespace.unwrap_or_default(),
            name.local_name(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn namespaces() -> HashMap<String, String> {
        let mut ns = HashMap::new();
        ns.insert("xs".to_string(), XSD_NAMESPACE.to_string());
        ns.insert("ord".to_string(), "urn:orders".to_string());
        ns
    }

    #[test]
    fn resolves_known_prefix() {
        let q = resolve_qname(&QName::from("ord:Order"), &namespaces(), Some("urn:tns"));
        assert_eq!(q, QualifiedName::new("urn:orders", "Order"));
    }

    #[test]
    fn falls_back_to_target_namespace_for_tns_prefix() {
        let q = resolve_qname(&QName::from("tns:Order"), &namespaces(), Some("urn:tns"));
        assert_eq!(q, QualifiedName::new("urn:tns", "Order"));
    }

    #[test]
    fn unprefixed_name_uses_target_namespace() {
        let q = resolve_qname(&QName::from("Order"), &namespaces(), Some("urn:tns"));
        assert_eq!(q, QualifiedName::new("urn:tns", "Order"));
    }

    #[test]
    fn unknown_prefix_without_target_namespace_is_empty() {
        let q = resolve_qname(&QName::from("foo:Order"), &namespaces(), None);
        assert_eq!(q, QualifiedName::unqualified("Order"));
    }

    #[test]
    fn builtin_xsd_type_is_recognized() {
        let q = resolve_qname(&QName::from("xs:string"), &namespaces(), Some("urn:tns"));
        assert!(q.is_builtin_xsd());
    }
}
