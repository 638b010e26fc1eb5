//! The `CommonAPISpec` output document and the normalized views of the
//! WSDL service/binding/message structure it passes through.
//!
//! These are plain serde-serializable value types, kept separate from
//! [`crate::parser::wsdl`]'s parsed model: the parser's types are an
//! internal, per-document representation; these are the stable, public
//! shape the emitter (§4.8 of the full spec) produces.

use crate::expander::{AttributeDescriptor, TypeExpansion};
use serde::Serialize;

/// One normalized SOAP operation, synthesized with a REST-shaped `path`
/// and `method` since SOAP itself has neither (§4.7 of the full spec).
#[derive(Clone, Debug, Serialize)]
pub struct Endpoint {
    pub path: String,
    pub method: String,
    pub operation_name: String,
    pub soap_action: String,
    pub summary: String,
    pub description: String,
    pub request: MessageShape,
    pub response: MessageShape,
    pub faults: Vec<String>,
}

/// A request or response message, flattened to its leaf attributes for
/// search indexing: direct scalar fields plus every recursively
/// discovered nested field, regardless of nesting depth.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MessageShape {
    pub message_name: String,
    pub all_attributes: Vec<AttributeDescriptor>,
}

/// Passthrough of a `wsdl:service`/`wsdl:port`.
#[derive(Clone, Debug, Serialize)]
pub struct ServiceView {
    pub name: String,
    pub ports: Vec<PortView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PortView {
    pub name: String,
    pub binding: String,
    pub address: String,
}

/// Passthrough of a `wsdl:portType`.
#[derive(Clone, Debug, Serialize)]
pub struct PortTypeView {
    pub name: String,
    pub operations: Vec<PortTypeOperationView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PortTypeOperationView {
    pub name: String,
    pub input: Option<String>,
    pub output: Option<String>,
    pub faults: Vec<String>,
}

/// Passthrough of a `wsdl:binding`, carrying the SOAP `style`/`use` pairs
/// the distilled spec's `Endpoint` doesn't mention but a downstream
/// SOAP-version-aware consumer needs (supplemented per original_source/).
#[derive(Clone, Debug, Serialize)]
pub struct BindingView {
    pub name: String,
    pub type_: String,
    pub transport: String,
    pub soap_version: String,
    pub operations: Vec<BindingOperationView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct BindingOperationView {
    pub name: String,
    pub soap_action: Option<String>,
    pub style: Option<String>,
    #[serde(rename = "use")]
    pub use_: Option<String>,
}

/// Passthrough of a `wsdl:message`.
#[derive(Clone, Debug, Serialize)]
pub struct MessageView {
    pub name: String,
    pub parts: Vec<MessagePartView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct MessagePartView {
    pub name: String,
    pub element: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

/// A registered type, serialized under its qualified name so `data_types`
/// can be sorted lexicographically (invariant 6 / §4.8).
#[derive(Clone, Debug, Serialize)]
pub struct DataTypeEntry {
    pub qualified_name: String,
    #[serde(flatten)]
    pub expansion: TypeExpansion,
}

/// Per-file outcome tracking for the batch of documents a run attempted,
/// independent of whether the overall run succeeded.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProcessingMetadata {
    pub source_file: String,
    pub processed_at: String,
    pub parser_version: String,
    pub files_loaded: Vec<String>,
    pub files_failed: Vec<String>,
    pub diagnostics: Vec<crate::diagnostic::Diagnostic>,
    pub cache_stats: crate::cache::CacheStats,
    /// Operation names whose `soap_action` is the synthetic
    /// `"urn:" + operation_name` fallback rather than one read from a
    /// binding, so a consumer can tell a real SOAPAction from an invented
    /// one without re-deriving it.
    pub synthetic_soap_actions: Vec<String>,
}

/// The root emitted document (§6.2 of the distilled spec).
#[derive(Clone, Debug, Serialize)]
pub struct CommonApiSpec {
    pub id: u64,
    pub api_name: String,
    pub version: String,
    pub description: String,
    pub base_url: String,
    pub api_type: String,
    pub target_namespace: String,
    pub services: Vec<ServiceView>,
    pub port_types: Vec<PortTypeView>,
    pub bindings: Vec<BindingView>,
    pub messages: Vec<MessageView>,
    pub endpoints: Vec<Endpoint>,
    pub data_types: Vec<DataTypeEntry>,
    pub processing_metadata: ProcessingMetadata,
}
