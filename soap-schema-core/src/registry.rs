//! The schema registry: a flat, namespace-resolved index of every global
//! `complexType`, `simpleType`, and `element` definition seen across the
//! main WSDL's embedded schema and every loaded auxiliary document.
//!
//! Built once per conversion run and then queried by the type expander via
//! [`crate::cache::ResolutionCache`]. Entries remember which document they
//! came from, since a `complexContent/extension` base frequently lives in a
//! different document (and therefore a different namespace table) than the
//! type that extends it.

use crate::diagnostic::Diagnostic;
use crate::document::LoadedDocument;
use crate::parser::xsd::{ComplexType, SchemaElement, SimpleType, XmlSchema};
use crate::qname::{resolve_qname, QualifiedName};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryKind {
    ComplexType,
    SimpleType,
    Element,
}

/// One registered definition plus the declaring document's own namespace
/// table, needed to resolve further references (an element's `type_`, a
/// complex type's `extension_base`) found inside it.
pub struct SchemaRegistryEntry {
    pub kind: RegistryKind,
    pub source_file: PathBuf,
    pub namespaces: HashMap<String, String>,
    pub target_namespace: Option<String>,
    pub complex_type: Option<ComplexType>,
    pub simple_type: Option<SimpleType>,
    pub element: Option<SchemaElement>,
}

pub struct SchemaRegistry {
    entries: HashMap<QualifiedName, Arc<SchemaRegistryEntry>>,
}

impl SchemaRegistry {
    /// Index the main WSDL's embedded schema (if any) and every loaded
    /// auxiliary document, in load order. The first document to declare a
    /// given qualified name wins; later collisions are recorded as
    /// [`Diagnostic::DuplicateDefinition`] rather than aborting the run.
    pub fn build(
        main_schema: Option<(&Path, &XmlSchema)>,
        documents: &[LoadedDocument],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Self {
        let mut entries = HashMap::new();

        if let Some((path, schema)) = main_schema {
            index_schema(path, schema, &mut entries, diagnostics);
        }
        for doc in documents {
            index_schema(&doc.path, &doc.schema, &mut entries, diagnostics);
        }

        Self { entries }
    }

    pub fn get(&self, qname: &QualifiedName) -> Option<Arc<SchemaRegistryEntry>> {
        self.entries.get(qname).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QualifiedName, &Arc<SchemaRegistryEntry>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn index_schema(
    path: &Path,
    schema: &XmlSchema,
    entries: &mut HashMap<QualifiedName, Arc<SchemaRegistryEntry>>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let ns = &schema.namespaces;
    let tns = schema.target_namespace.as_deref();

    for (name, complex_type) in &schema.complex_types {
        let qname = resolve_qname(&name.as_str().into(), ns, tns);
        insert_entry(
            entries,
            diagnostics,
            qname,
            path,
            SchemaRegistryEntry {
                kind: RegistryKind::ComplexType,
                source_file: path.to_path_buf(),
                namespaces: ns.clone(),
                target_namespace: schema.target_namespace.clone(),
                complex_type: Some(complex_type.clone()),
                simple_type: None,
                element: None,
            },
        );
    }

    for (name, simple_type) in &schema.simple_types {
        let qname = resolve_qname(&name.as_str().into(), ns, tns);
        insert_entry(
            entries,
            diagnostics,
            qname,
            path,
            SchemaRegistryEntry {
                kind: RegistryKind::SimpleType,
                source_file: path.to_path_buf(),
                namespaces: ns.clone(),
                target_namespace: schema.target_namespace.clone(),
                complex_type: None,
                simple_type: Some(simple_type.clone()),
                element: None,
            },
        );
    }

    for (name, element) in &schema.elements {
        let qname = resolve_qname(&name.as_str().into(), ns, tns);
        insert_entry(
            entries,
            diagnostics,
            qname,
            path,
            SchemaRegistryEntry {
                kind: RegistryKind::Element,
                source_file: path.to_path_buf(),
                namespaces: ns.clone(),
                target_namespace: schema.target_namespace.clone(),
                complex_type: None,
                simple_type: None,
                element: Some(element.clone()),
            },
        );
    }
}

fn insert_entry(
    entries: &mut HashMap<QualifiedName, Arc<SchemaRegistryEntry>>,
    diagnostics: &mut Vec<Diagnostic>,
    qname: QualifiedName,
    path: &Path,
    entry: SchemaRegistryEntry,
) {
    if entries.contains_key(&qname) {
        diagnostics.push(Diagnostic::DuplicateDefinition {
            qname: qname.to_string(),
            source_file: path.display().to_string(),
        });
        return;
    }
    entries.insert(qname, Arc::new(entry));
}
