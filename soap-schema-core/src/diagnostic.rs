//! Non-fatal conditions collected during a conversion run.
//!
//! These never unwind — every site that would otherwise return one of
//! these as an `Err` instead pushes a `Diagnostic` onto the run's
//! collector and produces a stub value (an opaque attribute, a stubbed
//! `TypeExpansion`) so the run can continue. See error kinds table in the
//! ambient error-handling section of the full spec.

use serde::Serialize;

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "PascalCase")]
pub enum Diagnostic {
    /// A qualified name referenced by the schema graph has no registry entry.
    UnresolvedReference { qname: String, context: String },
    /// The cycle detector denied re-entry into an already-visited path key.
    CircularReference { path: String },
    /// The type expander's recursion depth limit was reached.
    MaxDepthExceeded { path: String, depth: usize },
    /// An element was structurally invalid (e.g. `xsd:element` without `@name`).
    MalformedSchema { reason: String, source_file: String },
    /// Two documents declared the same qualified name; the first wins.
    DuplicateDefinition { qname: String, source_file: String },
    /// A file in the batch (usually an imported XSD) could not be loaded.
    FileSkipped { path: String, reason: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::UnresolvedReference { .. } => Severity::Warning,
            Diagnostic::CircularReference { .. } => Severity::Info,
            Diagnostic::MaxDepthExceeded { .. } => Severity::Warning,
            Diagnostic::MalformedSchema { .. } => Severity::Warning,
            Diagnostic::DuplicateDefinition { .. } => Severity::Warning,
            Diagnostic::FileSkipped { .. } => Severity::Warning,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circular_reference_is_info_severity() {
        let d = Diagnostic::CircularReference {
            path: "Node.next.next".to_string(),
        };
        assert_eq!(d.severity(), Severity::Info);
    }

    #[test]
    fn unresolved_reference_is_warning_severity() {
        let d = Diagnostic::UnresolvedReference {
            qname: "tns#UnknownType".to_string(),
            context: "message part".to_string(),
        };
        assert_eq!(d.severity(), Severity::Warning);
    }
}
