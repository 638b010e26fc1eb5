//! # soap-schema-core
//!
//! Ingests a WSDL 1.1 document (plus its transitive `xsd:import` closure)
//! and normalizes it into a single, language-neutral `CommonAPISpec` JSON
//! document: every `complexType` flattened to its leaf attributes, every
//! `portType` operation resolved to a request/response shape, with
//! inheritance, inline types, and cross-file references all followed
//! ahead of time so a downstream consumer never has to re-parse XML.
//!
//! ## Usage
//!
//! ```ignore
//! use soap_schema_core::ConversionRun;
//!
//! let spec = ConversionRun::builder()
//!     .wsdl_path("service.wsdl")
//!     .build()?
//!     .convert()?;
//!
//! println!("{}", serde_json::to_string_pretty(&spec)?);
//! ```
//!
//! ## Pipeline
//!
//! 1. [`document::DocumentLoader`] reads the main WSDL and follows its
//!    `xsd:import` closure (plus any explicitly supplied auxiliary files).
//! 2. [`registry::SchemaRegistry`] indexes every global `complexType`,
//!    `simpleType`, and `element` across all loaded documents.
//! 3. [`operation::OperationExtractor`] walks each `portType` operation,
//!    resolving its messages through [`expander::TypeExpander`].
//! 4. [`emitter`] assembles the result into a [`model::CommonApiSpec`].
//!
//! Non-fatal conditions encountered along the way (an unresolved type
//! reference, a cycle, a skipped import) are collected as
//! [`diagnostic::Diagnostic`] values on `processing_metadata` rather than
//! aborting the run; only I/O failures and malformed root documents
//! surface as [`error::IngestError`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::broken_intra_doc_links)]
// Note: missing_docs is intentionally not enabled to avoid noise from internal parser structures

pub mod cache;
pub mod context;
pub mod diagnostic;
pub mod document;
pub mod emitter;
pub mod error;
pub mod expander;
pub mod model;
pub mod operation;
pub mod parser;
pub mod qname;
pub mod registry;

use std::path::PathBuf;

pub use error::{IngestError, Result};
pub use model::CommonApiSpec;

use cache::ResolutionCache;
use document::DocumentLoader;
use operation::OperationExtractor;
use registry::SchemaRegistry;

#[cfg(feature = "tracing")]
use tracing::info;

/// Tunables that bound the resolution engine's recursion depth, cycle
/// tolerance, and cache size. The defaults are generous enough for any
/// schema graph seen in practice while still guaranteeing termination on
/// a pathological or malicious one.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionOptions {
    pub max_depth: usize,
    pub max_cycles: usize,
    pub cache_capacity: usize,
}

impl Default for ResolutionOptions {
    fn default() -> Self {
        Self {
            max_depth: 8,
            max_cycles: 5,
            cache_capacity: 1000,
        }
    }
}

impl ResolutionOptions {
    pub fn builder() -> ResolutionOptionsBuilder {
        ResolutionOptionsBuilder::default()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ResolutionOptionsBuilder {
    max_depth: usize,
    max_cycles: usize,
    cache_capacity: usize,
}

impl Default for ResolutionOptionsBuilder {
    fn default() -> Self {
        let defaults = ResolutionOptions::default();
        Self {
            max_depth: defaults.max_depth,
            max_cycles: defaults.max_cycles,
            cache_capacity: defaults.cache_capacity,
        }
    }
}

impl ResolutionOptionsBuilder {
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_cycles(mut self, max_cycles: usize) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    pub fn cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    pub fn build(self) -> ResolutionOptions {
        ResolutionOptions {
            max_depth: self.max_depth,
            max_cycles: self.max_cycles,
            cache_capacity: self.cache_capacity,
        }
    }
}

/// One ingestion run over a main WSDL document (plus optional explicit
/// auxiliary XSD files, for schemas not reachable through `xsd:import`).
#[derive(Debug)]
pub struct ConversionRun {
    wsdl_path: PathBuf,
    aux_xsd_paths: Vec<PathBuf>,
    options: ResolutionOptions,
}

impl ConversionRun {
    pub fn builder() -> ConversionRunBuilder {
        ConversionRunBuilder::new()
    }

    /// Run the full pipeline and produce a [`CommonApiSpec`].
    pub fn convert(&self) -> Result<CommonApiSpec> {
        let mut diagnostics = Vec::new();

        let loader = DocumentLoader::new(self.options.max_depth);
        let (model, documents) =
            loader.load(&self.wsdl_path, &self.aux_xsd_paths, &mut diagnostics)?;

        #[cfg(feature = "tracing")]
        info!(
            path = %self.wsdl_path.display(),
            auxiliary_documents = documents.len(),
            "loaded document closure"
        );

        let registry = SchemaRegistry::build(
            model.schema().map(|schema| (self.wsdl_path.as_path(), schema)),
            &documents,
            &mut diagnostics,
        );

        let mut cache = ResolutionCache::new(self.options.cache_capacity);

        let mut extractor = OperationExtractor::new(
            &model,
            &registry,
            &mut cache,
            &mut diagnostics,
            self.options.max_depth,
            self.options.max_cycles,
        );
        let endpoints = extractor.extract_all();
        let synthetic_soap_actions = extractor.synthetic_soap_actions().to_vec();

        #[cfg(feature = "tracing")]
        info!(endpoints = endpoints.len(), "extracted operations");

        let spec = emitter::emit(
            &self.wsdl_path,
            &model,
            &registry,
            &mut cache,
            &mut diagnostics,
            endpoints,
            &documents,
            self.options.max_depth,
            self.options.max_cycles,
            chrono::Utc::now().to_rfc3339(),
            synthetic_soap_actions,
        );

        Ok(spec)
    }
}

/// Builder for a [`ConversionRun`]. Mirrors the WSDL path required of a
/// code generator's builder, minus the output-directory concern this
/// engine has no use for — the result is a value, not a file.
pub struct ConversionRunBuilder {
    wsdl_path: Option<PathBuf>,
    aux_xsd_paths: Vec<PathBuf>,
    options: ResolutionOptions,
}

impl ConversionRunBuilder {
    fn new() -> Self {
        Self {
            wsdl_path: None,
            aux_xsd_paths: Vec::new(),
            options: ResolutionOptions::default(),
        }
    }

    pub fn wsdl_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.wsdl_path = Some(path.into());
        self
    }

    /// Add one auxiliary XSD file to load alongside whatever the WSDL's
    /// own `xsd:import` closure reaches.
    pub fn aux_xsd_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.aux_xsd_paths.push(path.into());
        self
    }

    pub fn options(mut self, options: ResolutionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Result<ConversionRun> {
        let wsdl_path = self.wsdl_path.ok_or_else(|| IngestError::MissingConfiguration {
            field: "wsdl_path".to_string(),
        })?;

        Ok(ConversionRun {
            wsdl_path,
            aux_xsd_paths: self.aux_xsd_paths,
            options: self.options,
        })
    }

    /// Build and immediately convert, for the common case where no
    /// intermediate inspection of the built [`ConversionRun`] is needed.
    pub fn convert(self) -> Result<CommonApiSpec> {
        self.build()?.convert()
    }
}

impl Default for ConversionRunBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_wsdl_path() {
        let result = ConversionRunBuilder::new().build();
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            IngestError::MissingConfiguration { .. }
        ));
    }

    #[test]
    fn resolution_options_defaults_are_sane() {
        let options = ResolutionOptions::default();
        assert_eq!(options.max_depth, 8);
        assert_eq!(options.max_cycles, 5);
        assert!(options.cache_capacity > 0);
    }

    #[test]
    fn resolution_options_builder_overrides_defaults() {
        let options = ResolutionOptions::builder().max_depth(3).max_cycles(1).build();
        assert_eq!(options.max_depth, 3);
        assert_eq!(options.max_cycles, 1);
        assert_eq!(options.cache_capacity, ResolutionOptions::default().cache_capacity);
    }

    #[test]
    fn convert_end_to_end_over_a_minimal_wsdl() {
        let dir = tempfile::tempdir().unwrap();
        let wsdl_path = dir.path().join("service.wsdl");
        std::fs::write(
            &wsdl_path,
            r#"<?xml version="1.0"?>
<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
             xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
             xmlns:tns="urn:tempuri"
             targetNamespace="urn:tempuri"
             name="GreeterService">
  <types>
    <schema xmlns="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:tempuri">
      <element name="Greet">
        <complexType><sequence><element name="name" type="string"/></sequence></complexType>
      </element>
      <element name="GreetResponse">
        <complexType><sequence><element name="message" type="string"/></sequence></complexType>
      </element>
    </schema>
  </types>
  <message name="GreetSoapIn"><part name="parameters" element="tns:Greet"/></message>
  <message name="GreetSoapOut"><part name="parameters" element="tns:GreetResponse"/></message>
  <portType name="GreeterSoap">
    <operation name="Greet">
      <input message="tns:GreetSoapIn"/>
      <output message="tns:GreetSoapOut"/>
    </operation>
  </portType>
  <binding name="GreeterSoap" type="tns:GreeterSoap">
    <soap:binding transport="http://schemas.xmlsoap.org/soap/http"/>
    <operation name="Greet">
      <soap:operation soapAction="urn:tempuri/Greet"/>
      <input><soap:body use="literal"/></input>
      <output><soap:body use="literal"/></output>
    </operation>
  </binding>
  <service name="GreeterService">
    <port name="GreeterSoapPort" binding="tns:GreeterSoap">
      <soap:address location="http://example.com/greeter"/>
    </port>
  </service>
</definitions>"#,
        )
        .unwrap();

        let spec = ConversionRun::builder()
            .wsdl_path(&wsdl_path)
            .convert()
            .unwrap();

        assert_eq!(spec.api_name, "GreeterService");
        assert_eq!(spec.endpoints.len(), 1);
        let endpoint = &spec.endpoints[0];
        assert_eq!(endpoint.operation_name, "Greet");
        assert_eq!(endpoint.soap_action, "urn:tempuri/Greet");
        assert_eq!(endpoint.request.all_attributes.len(), 1);
        assert_eq!(endpoint.request.all_attributes[0].name, "name");
        assert!(spec.processing_metadata.diagnostics.is_empty());
    }
}
