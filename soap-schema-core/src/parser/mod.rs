//! WSDL and XSD document parsing into typed, per-document models.
//!
//! This module turns WSDL/XSD XML text into typed Rust structures. It does
//! not resolve references across documents or namespaces — that is the job
//! of [`crate::registry`] and [`crate::expander`], which consume the typed
//! models produced here.

pub mod wsdl;
pub mod xsd;

pub use wsdl::parser::parse_wsdl;
pub use wsdl::WsdlModel;
pub use xsd::parser::parse_schema;
pub use xsd::XmlSchema;

/// A possibly-prefixed XML name as it appears literally in a WSDL/XSD
/// document, e.g. `tns:PersonType` or `xs:string`.
///
/// This is distinct from [`crate::qname::QualifiedName`], which is a
/// resolved (namespace URI, local name) pair. A `QName` only becomes a
/// `QualifiedName` once its prefix has been looked up against the
/// declaring document's namespace table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QName(pub String);

impl QName {
    /// The part after the last `:`, or the whole string if unprefixed.
    pub fn local_name(&self) -> &str {
        match self.0.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.0,
        }
    }

    /// The part before the first `:`, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.0.split_once(':').map(|(p, _)| p)
    }
}

impl From<&str> for QName {
    fn from(s: &str) -> Self {
        QName(s.to_string())
    }
}

impl From<String> for QName {
    fn from(s: String) -> Self {
        QName(s)
    }
}

impl std::fmt::Display for QName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
