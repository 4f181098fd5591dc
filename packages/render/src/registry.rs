//! # Component Registry
//!
//! Static catalog of renderable component types and their contracts.
//! Constructed once from a [`CatalogSource`] and immutable for the process
//! lifetime. The registry is an explicit value passed into the pipeline and
//! the editor - never a process-wide singleton - so independent editor
//! instances (and tests) cannot share mutable catalog state.

use crate::{RenderNode, SettingsSchema};
use blockwork_document::{EntryId, Settings, ThemeDocument};
use std::collections::BTreeMap;
use thiserror::Error;

/// Everything a renderer capability gets to see: merged settings, the
/// effective variant and the global theme. Renderers receive validated
/// data only.
pub struct RenderContext<'a> {
    pub settings: &'a Settings,
    pub variant: &'a str,
    pub theme: &'a ThemeDocument,
    pub entry_id: &'a EntryId,
}

/// Renderer capability of one component type.
pub trait BlockRenderer: Send + Sync {
    fn render(&self, ctx: &RenderContext<'_>) -> RenderNode;
}

/// One variant of a component type. Variants may differ in settings
/// *shape*, not just defaults (a video-background hero needs a video URL an
/// image hero has no use for), so each carries its own schema.
pub struct VariantSpec {
    pub name: String,
    pub schema: SettingsSchema,
    pub defaults: Settings,
}

impl VariantSpec {
    pub fn new(name: impl Into<String>, schema: SettingsSchema, defaults: Settings) -> Self {
        Self {
            name: name.into(),
            schema,
            defaults,
        }
    }
}

/// Contract of one component type: renderer, variants, palette category.
pub struct ComponentSpec {
    pub type_id: String,
    /// Palette grouping label ("Content", "Media", ...).
    pub category: String,
    /// Non-empty; enforced at registry construction.
    pub variants: Vec<VariantSpec>,
    pub default_variant: String,
    pub renderer: Box<dyn BlockRenderer>,
}

impl std::fmt::Debug for ComponentSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentSpec")
            .field("type_id", &self.type_id)
            .field("category", &self.category)
            .field(
                "variants",
                &self.variants.iter().map(|v| &v.name).collect::<Vec<_>>(),
            )
            .field("default_variant", &self.default_variant)
            .finish()
    }
}

impl ComponentSpec {
    pub fn variant(&self, name: &str) -> Option<&VariantSpec> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// Resolve the variant to actually render: the requested one when the
    /// type offers it, the declared default otherwise. A stale variant in a
    /// saved document is a soft, reversible condition - never an error.
    ///
    /// Returns `None` only for a spec that bypassed registry validation
    /// (empty variant list or foreign default).
    pub fn effective_variant(&self, requested: &str) -> Option<&VariantSpec> {
        self.variant(requested)
            .or_else(|| self.variant(&self.default_variant))
            .or_else(|| self.variants.first())
    }
}

/// Supplies the component catalog the registry is built from, loaded once
/// before the registry is usable.
pub trait CatalogSource {
    fn list_types(&self) -> Vec<ComponentSpec>;
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Duplicate component type: {0}")]
    DuplicateType(String),

    #[error("Component type {0} declares no variants")]
    NoVariants(String),

    #[error("Component type {type_id} declares default variant {variant} it does not offer")]
    UnknownDefaultVariant { type_id: String, variant: String },
}

/// Immutable type → contract mapping.
pub struct Registry {
    specs: BTreeMap<String, ComponentSpec>,
}

impl Registry {
    /// Build and validate the registry from a catalog source.
    pub fn from_source(source: &dyn CatalogSource) -> Result<Self, RegistryError> {
        let mut specs = BTreeMap::new();

        for spec in source.list_types() {
            if spec.variants.is_empty() {
                return Err(RegistryError::NoVariants(spec.type_id));
            }
            if spec.variant(&spec.default_variant).is_none() {
                return Err(RegistryError::UnknownDefaultVariant {
                    type_id: spec.type_id,
                    variant: spec.default_variant,
                });
            }
            if specs.contains_key(&spec.type_id) {
                return Err(RegistryError::DuplicateType(spec.type_id));
            }
            specs.insert(spec.type_id.clone(), spec);
        }

        Ok(Self { specs })
    }

    /// Look up a component type. `None` is the normal, typed "unknown type"
    /// branch - the pipeline turns it into a placeholder, never a panic.
    pub fn resolve(&self, type_id: &str) -> Option<&ComponentSpec> {
        self.specs.get(type_id)
    }

    pub fn specs(&self) -> impl Iterator<Item = &ComponentSpec> {
        self.specs.values()
    }

    /// Palette view: category → specs, both levels in stable order.
    pub fn palette(&self) -> BTreeMap<&str, Vec<&ComponentSpec>> {
        let mut groups: BTreeMap<&str, Vec<&ComponentSpec>> = BTreeMap::new();
        for spec in self.specs.values() {
            groups.entry(spec.category.as_str()).or_default().push(spec);
        }
        groups
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.specs.keys().collect::<Vec<_>>())
            .finish()
    }
}
