//! # Rendering Pipeline
//!
//! Document + Registry + Theme → render tree, one root node per entry.
//!
//! Each entry is rendered independently; failures degrade to placeholders
//! and never abort sibling rendering. This containment is the single most
//! important correctness property of the pipeline: one broken block must
//! never blank the whole page.

use crate::{PlaceholderKind, Registry, RenderContext, RenderNode, RenderTree};
use blockwork_document::{ComponentEntry, LayoutDocument, Settings, ThemeDocument};
use tracing::warn;

/// The rendering pipeline. Cheap to construct; borrows the registry so
/// every host shares the same immutable catalog value.
pub struct Renderer<'a> {
    registry: &'a Registry,
    dev_mode: bool,
}

impl<'a> Renderer<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            dev_mode: false,
        }
    }

    /// Dev mode surfaces raw validation text inside InvalidSettings
    /// placeholders. Off in production: diagnostics are for authors, not
    /// visitors.
    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    /// Render a whole document in order. Never fails as a whole.
    pub fn render_document(&self, doc: &LayoutDocument, theme: &ThemeDocument) -> RenderTree {
        RenderTree {
            nodes: doc
                .entries()
                .iter()
                .map(|entry| self.render_entry(entry, theme))
                .collect(),
        }
    }

    /// Render one entry: resolve → effective variant → merge → validate →
    /// invoke the renderer capability.
    pub fn render_entry(&self, entry: &ComponentEntry, theme: &ThemeDocument) -> RenderNode {
        let Some(spec) = self.registry.resolve(&entry.type_id) else {
            warn!(type_id = %entry.type_id, entry = %entry.id, "unknown component type");
            return RenderNode::placeholder(
                PlaceholderKind::UnknownType {
                    type_id: entry.type_id.clone(),
                },
                entry.id.as_str(),
            );
        };

        let Some(variant) = spec.effective_variant(&entry.variant) else {
            // Unreachable for registry-validated specs.
            return RenderNode::placeholder(
                PlaceholderKind::UnknownType {
                    type_id: entry.type_id.clone(),
                },
                entry.id.as_str(),
            );
        };

        let merged = merge_settings(&variant.defaults, &entry.settings);

        if let Err(violations) = variant.schema.validate(&merged) {
            warn!(
                entry = %entry.id,
                type_id = %entry.type_id,
                count = violations.len(),
                "settings failed schema validation"
            );
            let fields = violations.iter().map(|v| v.field.clone()).collect();
            let detail = self.dev_mode.then(|| {
                violations
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ")
            });
            return RenderNode::placeholder(
                PlaceholderKind::InvalidSettings { fields, detail },
                entry.id.as_str(),
            );
        }

        let ctx = RenderContext {
            settings: &merged,
            variant: &variant.name,
            theme,
            entry_id: &entry.id,
        };
        spec.renderer.render(&ctx)
    }
}

/// Shallow merge: start from the variant's defaults, overlay every key the
/// entry carries (entry values win). Guarantees every declared-optional
/// field has a defined value even in documents saved before the field
/// existed.
fn merge_settings(defaults: &Settings, overrides: &Settings) -> Settings {
    let mut merged = defaults.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
