//! The emitter: assembles the final [`CommonApiSpec`] document out of the
//! parsed WSDL model, the schema registry, and the endpoints the operation
//! extractor produced.
//!
//! `data_types` walks every registered `complexType` through the type
//! expander (so the emitted document is self-contained — a consumer never
//! has to re-resolve a reference) and is sorted by qualified name so two
//! runs over the same inputs produce byte-identical JSON.

use crate::cache::ResolutionCache;
use crate::context::ResolutionContext;
use crate::diagnostic::Diagnostic;
use crate::document::LoadedDocument;
use crate::expander::TypeExpander;
use crate::model::{
    BindingOperationView, BindingView, CommonApiSpec, DataTypeEntry, Endpoint, MessageView,
    PortTypeOperationView, PortTypeView, PortView, ProcessingMetadata, ServiceView,
};
use crate::parser::wsdl::WsdlModel;
use crate::registry::{RegistryKind, SchemaRegistry};
use std::path::Path;

/// Build the passthrough `services`/`port_types`/`bindings`/`messages`
/// views and the fully expanded `data_types`/`endpoints`, and wrap them all
/// in a [`CommonApiSpec`].
#[allow(clippy::too_many_arguments)]
pub fn emit(
    source_path: &Path,
    model: &WsdlModel,
    registry: &SchemaRegistry,
    cache: &mut ResolutionCache,
    diagnostics: &mut Vec<Diagnostic>,
    endpoints: Vec<Endpoint>,
    loaded_documents: &[LoadedDocument],
    max_depth: usize,
    max_cycles: usize,
    processed_at: String,
    synthetic_soap_actions: Vec<String>,
) -> CommonApiSpec {
    let services = model
        .services()
        .iter()
        .map(|s| ServiceView {
            name: s.name.clone(),
            ports: s
                .ports
                .iter()
                .map(|p| PortView {
                    name: p.name.clone(),
                    binding: p.binding.to_string(),
                    address: p.address.clone(),
                })
                .collect(),
        })
        .collect();

    let port_types = model
        .port_types()
        .iter()
        .map(|pt| PortTypeView {
            name: pt.name.clone(),
            operations: pt
                .operations
                .iter()
                .map(|op| PortTypeOperationView {
                    name: op.name.clone(),
                    input: op.input.as_ref().map(|q| q.to_string()),
                    output: op.output.as_ref().map(|q| q.to_string()),
                    faults: op.faults.iter().map(|f| f.message.to_string()).collect(),
                })
                .collect(),
        })
        .collect();

    let bindings = model
        .bindings()
        .iter()
        .map(|b| BindingView {
            name: b.name.clone(),
            type_: b.type_.to_string(),
            transport: b.transport.clone(),
            soap_version: b.soap_version.clone(),
            operations: b
                .operations
                .iter()
                .map(|op| BindingOperationView {
                    name: op.name.clone(),
                    soap_action: op.soap_action.clone(),
                    style: op.style.clone(),
                    use_: op.use_.clone(),
                })
                .collect(),
        })
        .collect();

    let messages = model
        .messages()
        .iter()
        .map(|m| MessageView {
            name: m.name.clone(),
            parts: m
                .parts
                .iter()
                .map(|p| crate::model::MessagePartView {
                    name: p.name.clone(),
                    element: p.element.as_ref().map(|q| q.to_string()),
                    type_: p.type_.as_ref().map(|q| q.to_string()),
                })
                .collect(),
        })
        .collect();

    let data_types = expand_all_complex_types(registry, cache, diagnostics, max_depth, max_cycles);

    let target_namespace = model.target_namespace().unwrap_or_default().to_string();
    let api_name = model
        .service_name()
        .map(str::to_string)
        .unwrap_or_else(|| "UnnamedSoapService".to_string());
    let base_url = model.endpoint_url().unwrap_or_default().to_string();

    let files_loaded = std::iter::once(source_path.display().to_string())
        .chain(loaded_documents.iter().map(|d| d.path.display().to_string()))
        .collect();
    let files_failed = diagnostics
        .iter()
        .filter_map(|d| match d {
            Diagnostic::FileSkipped { path, .. } => Some(path.clone()),
            _ => None,
        })
        .collect();

    CommonApiSpec {
        id: hash_path(source_path),
        api_name,
        version: "1.0.0".to_string(),
        description: format!("SOAP API ingested from {}", source_path.display()),
        base_url,
        api_type: "SOAP".to_string(),
        target_namespace,
        services,
        port_types,
        bindings,
        messages,
        endpoints,
        data_types,
        processing_metadata: ProcessingMetadata {
            source_file: source_path.display().to_string(),
            processed_at,
            parser_version: env!("CARGO_PKG_VERSION").to_string(),
            files_loaded,
            files_failed,
            diagnostics: diagnostics.clone(),
            cache_stats: cache.stats(),
            synthetic_soap_actions,
        },
    }
}

/// Expand every global `complexType` the registry knows about into a
/// `DataTypeEntry`, sorted by qualified name (invariant: deterministic
/// output for the same inputs).
fn expand_all_complex_types(
    registry: &SchemaRegistry,
    cache: &mut ResolutionCache,
    diagnostics: &mut Vec<Diagnostic>,
    max_depth: usize,
    max_cycles: usize,
) -> Vec<DataTypeEntry> {
    let mut qualified_names: Vec<_> = registry
        .iter()
        .filter(|(_, entry)| entry.kind == RegistryKind::ComplexType)
        .map(|(qname, _)| qname.clone())
        .collect();
    qualified_names.sort();

    qualified_names
        .into_iter()
        .map(|qname| {
            let ctx = ResolutionContext::new(max_depth, max_cycles);
            let mut expander = TypeExpander::new(registry, cache, diagnostics);
            let expansion = expander.expand(&qname, &qname.local_name, ctx);
            DataTypeEntry {
                qualified_name: qname.to_string(),
                expansion,
            }
        })
        .collect()
}

/// A small FNV-1a style hash of the source path, used as the document's
/// stable `id`. Not cryptographic — only needs to be deterministic across
/// runs over the same path, which `DefaultHasher` does not guarantee
/// (its seed varies per process).
fn hash_path(path: &Path) -> u64 {
    const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    let mut hash = FNV_OFFSET_BASIS;
    for byte in path.display().to_string().into_bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::xsd::{ComplexType, Sequence, SequenceElement, XmlSchema};
    use crate::parser::QName;

    fn schema_with_two_types() -> XmlSchema {
        let mut schema = XmlSchema {
            target_namespace: Some("urn:tns".to_string()),
            ..Default::default()
        };
        schema.complex_types.insert(
            "Zebra".to_string(),
            ComplexType {
                name: "Zebra".to_string(),
                sequence: Some(Sequence {
                    elements: vec![SequenceElement {
                        name: "stripes".to_string(),
                        type_: QName("xs:int".to_string()),
                        min_occurs: 1,
                        max_occurs: None,
                        nillable: false,
                        compositor: Default::default(),
                    }],
                }),
                extension_base: None,
            },
        );
        schema.complex_types.insert(
            "Apple".to_string(),
            ComplexType {
                name: "Apple".to_string(),
                sequence: None,
                extension_base: None,
            },
        );
        schema
    }

    #[test]
    fn data_types_are_sorted_by_qualified_name() {
        let schema = schema_with_two_types();
        let mut diagnostics = Vec::new();
        let registry = SchemaRegistry::build(
            Some((Path::new("main.wsdl"), &schema)),
            &[],
            &mut diagnostics,
        );
        let mut cache = ResolutionCache::new(10);
        let data_types =
            expand_all_complex_types(&registry, &mut cache, &mut diagnostics, 8, 5);

        assert_eq!(data_types.len(), 2);
        assert!(data_types[0].qualified_name < data_types[1].qualified_name);
        assert_eq!(data_types[0].expansion.name, "Apple");
        assert_eq!(data_types[1].expansion.name, "Zebra");
    }

    #[test]
    fn hash_path_is_stable_across_calls() {
        let a = hash_path(Path::new("/tmp/service.wsdl"));
        let b = hash_path(Path::new("/tmp/service.wsdl"));
        assert_eq!(a, b);
        let c = hash_path(Path::new("/tmp/other.wsdl"));
        assert_ne!(a, c);
    }
}
