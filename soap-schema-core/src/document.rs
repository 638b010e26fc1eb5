//! Document loading: the main WSDL plus transitive `xsd:import`/`xsd:include`
//! dependencies.
//!
//! Grounded on the import-resolver pattern of recursively walking a schema's
//! import list with a depth limit and a visited set keyed by canonical file
//! path so the same file is never loaded twice in one run. Unlike that
//! reference (which merges imported definitions directly into one
//! in-memory schema), this loader keeps each document separate — merging
//! happens later, in [`crate::registry::SchemaRegistry`], which needs to
//! remember which document each definition came from for cross-namespace
//! inheritance (Property 6 of the full spec).

use crate::diagnostic::Diagnostic;
use crate::error::{IngestError, Result};
use crate::parser::{parse_schema, parse_wsdl, WsdlModel, XmlSchema};
use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

/// An XSD document loaded as part of a conversion run's import closure.
pub struct LoadedDocument {
    pub path: PathBuf,
    pub schema: XmlSchema,
}

pub struct DocumentLoader {
    max_depth: usize,
}

impl DocumentLoader {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Load the main WSDL and recursively resolve its schema import
    /// closure, plus any explicitly supplied auxiliary XSD paths (which are
    /// always attempted regardless of whether an `xsd:import` names them —
    /// this is how the engine's `(main_wsdl_path, [xsd_paths], ...)`
    /// callable surfaces files the caller already knows about).
    pub fn load(
        &self,
        main_wsdl_path: &Path,
        explicit_aux_paths: &[PathBuf],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(WsdlModel, Vec<LoadedDocument>)> {
        let wsdl_xml = fs::read_to_string(main_wsdl_path).map_err(|e| IngestError::FileRead {
            path: main_wsdl_path.to_path_buf(),
            source: e,
        })?;

        #[cfg(feature = "tracing")]
        debug!(path = %main_wsdl_path.display(), "loading main WSDL document");

        let model = parse_wsdl(&wsdl_xml)
            .map_err(|e| IngestError::WsdlParse(e.to_string()))
            .map_err(|e| e.with_context(format!("parsing {}", main_wsdl_path.display())))?;

        let base_dir = main_wsdl_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut visited: HashSet<PathBuf> = HashSet::new();
        visited.insert(canonical(main_wsdl_path));

        let mut queue: VecDeque<(PathBuf, usize)> = VecDeque::new();
        if let Some(schema) = model.schema() {
            queue_imports(schema, &base_dir, &mut queue, 1);
        }
        for aux in explicit_aux_paths {
            queue.push_back((aux.clone(), 1));
        }

        let mut documents = Vec::new();
        while let Some((path, depth)) = queue.pop_front() {
            let canon = canonical(&path);
            if visited.contains(&canon) {
                continue;
            }
            if depth > self.max_depth {
                diagnostics.push(Diagnostic::MaxDepthExceeded {
                    path: path.display().to_string(),
                    depth,
                });
                continue;
            }
            visited.insert(canon);

            match fs::read_to_string(&path) {
                Ok(xml) => match parse_schema(&xml) {
                    Ok(schema) => {
                        #[cfg(feature = "tracing")]
                        debug!(path = %path.display(), depth, "loaded imported schema");
                        let next_base = path
                            .parent()
                            .map(Path::to_path_buf)
                            .unwrap_or_else(|| base_dir.clone());
                        queue_imports(&schema, &next_base, &mut queue, depth + 1);
                        documents.push(LoadedDocument { path, schema });
                    }
                    Err(e) => {
                        #[cfg(feature = "tracing")]
                        warn!(path = %path.display(), error = %e, "failed to parse imported schema");
                        diagnostics.push(Diagnostic::FileSkipped {
                            path: path.display().to_string(),
                            reason: e.to_string(),
                        });
                    }
                },
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    warn!(path = %path.display(), error = %e, "failed to read imported schema");
                    diagnostics.push(Diagnostic::FileSkipped {
                        path: path.display().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok((model, documents))
    }
}

fn queue_imports(
    schema: &XmlSchema,
    base_dir: &Path,
    queue: &mut VecDeque<(PathBuf, usize)>,
    depth: usize,
) {
    for import in &schema.imports {
        if let Some(location) = &import.schema_location {
            queue.push_back((base_dir.join(location), depth));
        }
    }
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn loads_main_wsdl_with_no_imports() {
        let dir = tempdir().unwrap();
        let wsdl_path = dir.path().join("service.wsdl");
        fs::write(
            &wsdl_path,
            r#"<?xml version="1.0"?>
<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
             targetNamespace="urn:tns" name="Svc">
  <message name="M"><part name="p" type="xs:string"/></message>
</definitions>"#,
        )
        .unwrap();

        let loader = DocumentLoader::new(8);
        let mut diagnostics = Vec::new();
        let (model, docs) = loader.load(&wsdl_path, &[], &mut diagnostics).unwrap();
        assert_eq!(model.target_namespace(), Some("urn:tns"));
        assert!(docs.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn follows_import_schema_location_relative_to_wsdl_dir() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("types.xsd"),
            r#"<schema xmlns="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:types">
  <complexType name="Order"><sequence><element name="id" type="xs:string"/></sequence></complexType>
</schema>"#,
        )
        .unwrap();

        let wsdl_path = dir.path().join("service.wsdl");
        fs::write(
            &wsdl_path,
            r#"<?xml version="1.0"?>
<definitions xmlns="http://schemas.xmlsoap.org/wsdl/" targetNamespace="urn:tns" name="Svc">
  <types>
    <schema xmlns="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:tns">
      <import namespace="urn:types" schemaLocation="types.xsd"/>
    </schema>
  </types>
</definitions>"#,
        )
        .unwrap();

        let loader = DocumentLoader::new(8);
        let mut diagnostics = Vec::new();
        let (_model, docs) = loader.load(&wsdl_path, &[], &mut diagnostics).unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].schema.complex_types.contains_key("Order"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn missing_import_is_skipped_not_fatal() {
        let dir = tempdir().unwrap();
        let wsdl_path = dir.path().join("service.wsdl");
        fs::write(
            &wsdl_path,
            r#"<?xml version="1.0"?>
<definitions xmlns="http://schemas.xmlsoap.org/wsdl/" targetNamespace="urn:tns" name="Svc">
  <types>
    <schema xmlns="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:tns">
      <import namespace="urn:types" schemaLocation="missing.xsd"/>
    </schema>
  </types>
</definitions>"#,
        )
        .unwrap();

        let loader = DocumentLoader::new(8);
        let mut diagnostics = Vec::new();
        let (_model, docs) = loader.load(&wsdl_path, &[], &mut diagnostics).unwrap();
        assert!(docs.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(diagnostics[0], Diagnostic::FileSkipped { .. }));
    }
}
