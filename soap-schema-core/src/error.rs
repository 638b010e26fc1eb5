//! Error types for schema ingestion
//!
//! Mirrors the teacher codegen crate's error module: one `thiserror` enum
//! for conditions fatal to a conversion run, a `with_context` helper, and a
//! `WithContext` variant for chaining. Non-fatal conditions (unresolved
//! references, cycles, depth limits) are never represented here — they are
//! [`crate::diagnostic::Diagnostic`] values collected on the run's
//! processing metadata instead, so they never unwind across the engine's
//! API boundary.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Errors fatal to a conversion run
#[derive(Error, Debug)]
pub enum IngestError {
    /// Failed to read a file
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write a file
    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// XML parsing error
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// WSDL parsing error
    #[error("WSDL parsing error: {0}")]
    WsdlParse(String),

    /// XSD schema parsing error
    #[error("XSD schema parsing error: {0}")]
    XsdParse(String),

    /// Missing required element in WSDL
    #[error("Missing required WSDL element: {element}")]
    MissingWsdlElement { element: String },

    /// The main WSDL document could not be loaded at all
    #[error("Main WSDL document could not be loaded: {reason}")]
    MainDocumentMissing { reason: String },

    /// A reference string could not be parsed as a qualified name
    #[error("Invalid qualified name reference: '{0}'")]
    InvalidQualifiedName(String),

    /// Missing configuration field
    #[error("Missing required configuration field: {field}")]
    MissingConfiguration { field: String },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<IngestError>,
    },

    /// Other errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IngestError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        IngestError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<quick_xml::Error> for IngestError {
    fn from(err: quick_xml::Error) -> Self {
        IngestError::XmlParse(err.to_string())
    }
}

impl From<std::str::Utf8Error> for IngestError {
    fn from(err: std::str::Utf8Error) -> Self {
        IngestError::XmlParse(format!("UTF-8 decoding error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::MissingWsdlElement {
            element: "types".to_string(),
        };
        assert_eq!(err.to_string(), "Missing required WSDL element: types");
    }

    #[test]
    fn test_with_context() {
        let err = IngestError::MainDocumentMissing {
            reason: "file not found".to_string(),
        };
        let err_with_ctx = err.with_context("while starting conversion run");

        assert!(err_with_ctx
            .to_string()
            .contains("while starting conversion run"));
        assert!(err_with_ctx.to_string().contains("file not found"));
    }
}
