//! The operation extractor: turns each `wsdl:portType/wsdl:operation` into
//! a flattened [`Endpoint`], resolving its message's parts through the
//! type expander exactly as a nested element reference would be.
//!
//! SOAP operations carry neither a path nor an HTTP method, so both are
//! synthesized (`"/" + operation_name`, always `POST`) — the same
//! REST-shaping the emitter applies to the rest of the document.

use crate::cache::ResolutionCache;
use crate::context::ResolutionContext;
use crate::diagnostic::Diagnostic;
use crate::expander::{AttributeDescriptor, TypeExpander};
use crate::model::{Endpoint, MessageShape};
use crate::parser::wsdl::{Message, PortTypeOperation, WsdlModel};
use crate::parser::QName;
use crate::qname::{resolve_qname, QualifiedName};
use crate::registry::{RegistryKind, SchemaRegistry};

pub struct OperationExtractor<'a> {
    model: &'a WsdlModel,
    registry: &'a SchemaRegistry,
    cache: &'a mut ResolutionCache,
    diagnostics: &'a mut Vec<Diagnostic>,
    max_depth: usize,
    max_cycles: usize,
    synthetic_soap_actions: Vec<String>,
}

impl<'a> OperationExtractor<'a> {
    pub fn new(
        model: &'a WsdlModel,
        registry: &'a SchemaRegistry,
        cache: &'a mut ResolutionCache,
        diagnostics: &'a mut Vec<Diagnostic>,
        max_depth: usize,
        max_cycles: usize,
    ) -> Self {
        Self {
            model,
            registry,
            cache,
            diagnostics,
            max_depth,
            max_cycles,
            synthetic_soap_actions: Vec::new(),
        }
    }

    /// Operation names whose `soap_action` had to be synthesized because no
    /// binding declared a `soapAction` for them.
    pub fn synthetic_soap_actions(&self) -> &[String] {
        &self.synthetic_soap_actions
    }

    /// Extract every operation from every `wsdl:portType`, in document order.
    pub fn extract_all(&mut self) -> Vec<Endpoint> {
        let port_types: Vec<&PortTypeOperation> = self
            .model
            .port_types()
            .iter()
            .flat_map(|pt| pt.operations.iter())
            .collect();

        port_types
            .into_iter()
            .map(|op| self.extract_one(op))
            .collect()
    }

    fn extract_one(&mut self, operation: &PortTypeOperation) -> Endpoint {
        let request = operation
            .input
            .as_ref()
            .map(|q| self.resolve_message(q, &format!("operation '{}' input", operation.name)))
            .unwrap_or_default();
        let response = operation
            .output
            .as_ref()
            .map(|q| self.resolve_message(q, &format!("operation '{}' output", operation.name)))
            .unwrap_or_default();
        let soap_action = self.resolve_soap_action(&operation.name);

        let description = operation
            .documentation
            .clone()
            .unwrap_or_else(|| format!("SOAP operation: {}", operation.name));
        let summary = operation
            .documentation
            .as_deref()
            .map(first_sentence)
            .unwrap_or_else(|| description.clone());

        Endpoint {
            path: format!("/{}", operation.name),
            method: "POST".to_string(),
            operation_name: operation.name.clone(),
            soap_action,
            summary,
            description,
            request,
            response,
            faults: operation
                .faults
                .iter()
                .map(|f| f.message.to_string())
                .collect(),
        }
    }

    /// Try SOAP 1.1 bindings before SOAP 1.2, so a binding pair that both
    /// declare the operation with a tie on quality resolves to 1.1 — the
    /// more conservative choice when one has to be picked.
    fn resolve_soap_action(&mut self, operation_name: &str) -> String {
        for version in ["1.1", "1.2"] {
            for binding in self.model.bindings() {
                if binding.soap_version != version {
                    continue;
                }
                for op in &binding.operations {
                    if op.name == operation_name {
                        if let Some(action) = &op.soap_action {
                            return action.clone();
                        }
                    }
                }
            }
        }
        self.synthetic_soap_actions.push(operation_name.to_string());
        format!("urn:{operation_name}")
    }

    fn resolve_message(&mut self, message_ref: &QName, context: &str) -> MessageShape {
        match self.model.find_message(message_ref) {
            Some(message) => self.expand_message(message),
            None => {
                self.diagnostics.push(Diagnostic::UnresolvedReference {
                    qname: message_ref.to_string(),
                    context: context.to_string(),
                });
                MessageShape {
                    message_name: message_ref.to_string(),
                    all_attributes: Vec::new(),
                }
            }
        }
    }

    fn expand_message(&mut self, message: &Message) -> MessageShape {
        let mut all_attributes = Vec::new();

        for part in &message.parts {
            if let Some(element) = &part.element {
                let element_qname =
                    resolve_qname(element, self.model.namespaces(), self.model.target_namespace());
                all_attributes.extend(self.expand_element_part(&element_qname, &part.name));
            } else if let Some(type_) = &part.type_ {
                let type_qname =
                    resolve_qname(type_, self.model.namespaces(), self.model.target_namespace());
                all_attributes.extend(expand_type_ref(
                    self.registry,
                    self.cache,
                    self.diagnostics,
                    self.max_depth,
                    self.max_cycles,
                    &type_qname,
                    &part.name,
                ));
            }
        }

        MessageShape {
            message_name: message.name.clone(),
            all_attributes,
        }
    }

    /// A part bound by `@element` resolves one indirection deeper than a
    /// part bound by `@type`: the registry entry it names is either a
    /// `complexType` (a global `<element><complexType>...` wrapper, which
    /// this engine indexes directly under its element name) or an
    /// `Element` entry whose own `type_` must be followed.
    fn expand_element_part(
        &mut self,
        element_qname: &QualifiedName,
        part_name: &str,
    ) -> Vec<AttributeDescriptor> {
        if element_qname.is_builtin_xsd() {
            return vec![scalar_attribute(part_name, &element_qname.to_string())];
        }

        match self.cache.resolve(element_qname, self.registry) {
            None => {
                self.diagnostics.push(Diagnostic::UnresolvedReference {
                    qname: element_qname.to_string(),
                    context: format!("message part '{part_name}'"),
                });
                vec![scalar_attribute(part_name, &element_qname.to_string())]
            }
            Some(entry) => match entry.kind {
                RegistryKind::ComplexType => {
                    let ctx = ResolutionContext::new(self.max_depth, self.max_cycles);
                    let mut expander = TypeExpander::new(self.registry, self.cache, self.diagnostics);
                    let expansion = expander.expand(element_qname, &element_qname.local_name, ctx);
                    TypeExpander::flatten_leaves(&expansion)
                }
                RegistryKind::Element => match &entry.element {
                    Some(el) => {
                        let inner =
                            resolve_qname(&el.type_, &entry.namespaces, entry.target_namespace.as_deref());
                        expand_type_ref(
                            self.registry,
                            self.cache,
                            self.diagnostics,
                            self.max_depth,
                            self.max_cycles,
                            &inner,
                            part_name,
                        )
                    }
                    None => Vec::new(),
                },
                RegistryKind::SimpleType => {
                    vec![scalar_attribute(part_name, &element_qname.to_string())]
                }
            },
        }
    }
}

/// Resolve a plain type reference (`@type`, or an `Element`'s own
/// `type_`) to its leaf attributes — free function rather than a method so
/// it can recurse through the `Element` indirection without holding two
/// overlapping `&mut self` borrows.
fn expand_type_ref(
    registry: &SchemaRegistry,
    cache: &mut ResolutionCache,
    diagnostics: &mut Vec<Diagnostic>,
    max_depth: usize,
    max_cycles: usize,
    qname: &QualifiedName,
    root_name: &str,
) -> Vec<AttributeDescriptor> {
    if qname.is_builtin_xsd() {
        return vec![scalar_attribute(root_name, &qname.to_string())];
    }

    match cache.resolve(qname, registry) {
        None => {
            diagnostics.push(Diagnostic::UnresolvedReference {
                qname: qname.to_string(),
                context: root_name.to_string(),
            });
            vec![scalar_attribute(root_name, &qname.to_string())]
        }
        Some(entry) => match entry.kind {
            RegistryKind::ComplexType => {
                let ctx = ResolutionContext::new(max_depth, max_cycles);
                let mut expander = TypeExpander::new(registry, cache, diagnostics);
                let expansion = expander.expand(qname, root_name, ctx);
                TypeExpander::flatten_leaves(&expansion)
            }
            RegistryKind::Element => match &entry.element {
                Some(el) => {
                    let inner =
                        resolve_qname(&el.type_, &entry.namespaces, entry.target_namespace.as_deref());
                    expand_type_ref(
                        registry,
                        cache,
                        diagnostics,
                        max_depth,
                        max_cycles,
                        &inner,
                        root_name,
                    )
                }
                None => Vec::new(),
            },
            RegistryKind::SimpleType => vec![scalar_attribute(root_name, &qname.to_string())],
        },
    }
}

fn scalar_attribute(name: &str, type_: &str) -> AttributeDescriptor {
    AttributeDescriptor {
        name: name.to_string(),
        type_: type_.to_string(),
        min_occurs: 1,
        ..Default::default()
    }
}

fn first_sentence(text: &str) -> String {
    text.split(['.', '\n'])
        .next()
        .unwrap_or(text)
        .trim()
        .to_string()
}
