//! The type expander: walks a `complexType` definition — including
//! `complexContent/extension` inheritance — into a flattened
//! [`TypeExpansion`], recursing into nested element references while the
//! [`ResolutionContext`] bounds depth and detects cycles.
//!
//! `is_complex` on [`AttributeDescriptor`] is bookkeeping private to this
//! module: it marks which direct attributes were themselves recursively
//! expanded, so a `MessageShape` can be flattened to leaves without
//! re-deriving that fact from the type string. It is never serialized.

use crate::cache::ResolutionCache;
use crate::context::ResolutionContext;
use crate::diagnostic::Diagnostic;
use crate::parser::xsd::{Compositor, SequenceElement};
use crate::qname::{resolve_qname, QualifiedName};
use crate::registry::{RegistryKind, SchemaRegistry, SchemaRegistryEntry};
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone, Debug, Default, Serialize)]
pub struct AttributeDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub min_occurs: u32,
    pub max_occurs: Option<String>,
    pub nillable: bool,
    pub description: Option<String>,
    pub parent_path: Option<String>,
    pub is_nested: bool,
    pub choice_group: bool,
    pub all_group: bool,
    #[serde(skip)]
    pub(crate) is_complex: bool,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct TypeExpansion {
    pub name: String,
    pub qualified_name: String,
    pub attributes: Vec<AttributeDescriptor>,
    pub inherited_attributes: Vec<AttributeDescriptor>,
    pub nested_attributes: Vec<AttributeDescriptor>,
    pub sequences: Vec<Vec<AttributeDescriptor>>,
    pub circular_reference: bool,
    pub max_depth_reached: bool,
}

pub struct TypeExpander<'a> {
    registry: &'a SchemaRegistry,
    cache: &'a mut ResolutionCache,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'a> TypeExpander<'a> {
    pub fn new(
        registry: &'a SchemaRegistry,
        cache: &'a mut ResolutionCache,
        diagnostics: &'a mut Vec<Diagnostic>,
    ) -> Self {
        Self {
            registry,
            cache,
            diagnostics,
        }
    }

    /// Expand a complex type found at `qname`. `parent_path` is the full
    /// dotted path from the top-level [`TypeExpansion`]'s own name down to
    /// (and including) this type's position — for a root call this is just
    /// the type's own name.
    pub fn expand(
        &mut self,
        qname: &QualifiedName,
        parent_path: &str,
        ctx: ResolutionContext,
    ) -> TypeExpansion {
        let mut ctx = ctx;
        let key = format!("{parent_path}:{qname}");

        if ctx.depth_exceeded() {
            self.diagnostics.push(Diagnostic::MaxDepthExceeded {
                path: key,
                depth: ctx.depth(),
            });
            return TypeExpansion {
                name: qname.local_name.clone(),
                qualified_name: qname.to_string(),
                max_depth_reached: true,
                ..Default::default()
            };
        }
        if ctx.cycles_exhausted() {
            self.diagnostics
                .push(Diagnostic::CircularReference { path: key.clone() });
            return TypeExpansion {
                name: qname.local_name.clone(),
                qualified_name: qname.to_string(),
                circular_reference: true,
                ..Default::default()
            };
        }
        if !ctx.enter(key.clone()) {
            self.diagnostics
                .push(Diagnostic::CircularReference { path: key.clone() });
            return TypeExpansion {
                name: qname.local_name.clone(),
                qualified_name: qname.to_string(),
                circular_reference: true,
                ..Default::default()
            };
        }

        let Some(entry) = self.cache.resolve(qname, self.registry) else {
            self.diagnostics.push(Diagnostic::UnresolvedReference {
                qname: qname.to_string(),
                context: parent_path.to_string(),
            });
            return TypeExpansion {
                name: qname.local_name.clone(),
                qualified_name: qname.to_string(),
                ..Default::default()
            };
        };
        if entry.kind != RegistryKind::ComplexType {
            self.diagnostics.push(Diagnostic::MalformedSchema {
                reason: format!("{qname} is not a complexType"),
                source_file: entry.source_file.display().to_string(),
            });
            return TypeExpansion {
                name: qname.local_name.clone(),
                qualified_name: qname.to_string(),
                ..Default::default()
            };
        }

        let mut expansion = TypeExpansion {
            name: qname.local_name.clone(),
            qualified_name: qname.to_string(),
            ..Default::default()
        };

        self.merge_inheritance(&entry, qname, parent_path, &ctx, &mut expansion);
        self.walk_compositor(&entry, parent_path, &ctx, &mut expansion);

        expansion
    }

    fn merge_inheritance(
        &mut self,
        entry: &Arc<SchemaRegistryEntry>,
        qname: &QualifiedName,
        parent_path: &str,
        ctx: &ResolutionContext,
        expansion: &mut TypeExpansion,
    ) {
        let Some(complex_type) = &entry.complex_type else {
            return;
        };
        let Some(base_raw) = &complex_type.extension_base else {
            return;
        };

        let base_qname = resolve_qname(base_raw, &entry.namespaces, entry.target_namespace.as_deref());
        if base_qname == *qname {
            self.diagnostics.push(Diagnostic::CircularReference {
                path: format!("{qname} -> {base_qname}"),
            });
            return;
        }

        let fresh_ctx = ctx.fresh_for_inheritance();
        let base_expansion = self.expand(&base_qname, parent_path, fresh_ctx);

        expansion
            .inherited_attributes
            .extend(base_expansion.attributes.clone());
        expansion.attributes.extend(base_expansion.attributes);
        expansion
            .nested_attributes
            .extend(base_expansion.nested_attributes);
    }

    fn walk_compositor(
        &mut self,
        entry: &Arc<SchemaRegistryEntry>,
        parent_path: &str,
        ctx: &ResolutionContext,
        expansion: &mut TypeExpansion,
    ) {
        let Some(complex_type) = &entry.complex_type else {
            return;
        };
        let Some(sequence) = &complex_type.sequence else {
            return;
        };

        let mut group = Vec::new();
        for element in &sequence.elements {
            let attribute = self.resolve_element(entry, element, parent_path, ctx, expansion);
            group.push(attribute.clone());
            expansion.attributes.push(attribute);
        }
        if !group.is_empty() {
            expansion.sequences.push(group);
        }
    }

    fn resolve_element(
        &mut self,
        entry: &Arc<SchemaRegistryEntry>,
        element: &SequenceElement,
        parent_path: &str,
        ctx: &ResolutionContext,
        expansion: &mut TypeExpansion,
    ) -> AttributeDescriptor {
        let resolved_type = resolve_qname(
            &element.type_,
            &entry.namespaces,
            entry.target_namespace.as_deref(),
        );
        let (choice_group, all_group) = match element.compositor {
            Compositor::Choice => (true, false),
            Compositor::All => (false, true),
            Compositor::Sequence => (false, false),
        };

        if resolved_type.is_builtin_xsd() {
            return AttributeDescriptor {
                name: element.name.clone(),
                type_: resolved_type.to_string(),
                min_occurs: element.min_occurs,
                max_occurs: element.max_occurs.clone(),
                nillable: element.nillable,
                description: None,
                parent_path: None,
                is_nested: false,
                choice_group,
                all_group,
                is_complex: false,
            };
        }

        let Some(sub_entry) = self.cache.resolve(&resolved_type, self.registry) else {
            self.diagnostics.push(Diagnostic::UnresolvedReference {
                qname: resolved_type.to_string(),
                context: format!("{parent_path}.{}", element.name),
            });
            return AttributeDescriptor {
                name: element.name.clone(),
                type_: resolved_type.to_string(),
                min_occurs: element.min_occurs,
                max_occurs: element.max_occurs.clone(),
                nillable: element.nillable,
                description: None,
                parent_path: None,
                is_nested: false,
                choice_group,
                all_group,
                is_complex: false,
            };
        };

        if sub_entry.kind != RegistryKind::ComplexType {
            return AttributeDescriptor {
                name: element.name.clone(),
                type_: resolved_type.to_string(),
                min_occurs: element.min_occurs,
                max_occurs: element.max_occurs.clone(),
                nillable: element.nillable,
                description: None,
                parent_path: None,
                is_nested: false,
                choice_group,
                all_group,
                is_complex: false,
            };
        }

        let child_path = format!("{parent_path}.{}", element.name);
        let child_ctx = ctx.descend();
        let sub_expansion = self.expand(&resolved_type, &child_path, child_ctx);

        for leaf in sub_expansion.attributes.iter().filter(|a| !a.is_complex) {
            expansion.nested_attributes.push(AttributeDescriptor {
                parent_path: Some(child_path.clone()),
                is_nested: true,
                ..leaf.clone()
            });
        }
        expansion
            .nested_attributes
            .extend(sub_expansion.nested_attributes.clone());

        AttributeDescriptor {
            name: element.name.clone(),
            type_: resolved_type.to_string(),
            min_occurs: element.min_occurs,
            max_occurs: element.max_occurs.clone(),
            nillable: element.nillable,
            description: None,
            parent_path: None,
            is_nested: false,
            choice_group,
            all_group,
            is_complex: true,
        }
    }

    /// Flatten a [`TypeExpansion`] to its leaves: direct scalar attributes
    /// plus every recursively discovered nested attribute. Used to build
    /// `MessageShape.all_attributes`, which always flattens regardless of
    /// nesting depth.
    pub fn flatten_leaves(expansion: &TypeExpansion) -> Vec<AttributeDescriptor> {
        let mut leaves: Vec<AttributeDescriptor> = expansion
            .attributes
            .iter()
            .filter(|a| !a.is_complex)
            .cloned()
            .collect();
        leaves.extend(expansion.nested_attributes.iter().cloned());
        leaves
    }
}
