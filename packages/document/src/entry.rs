//! Component Entry: one block instance within a Layout Document.

use serde::{Deserialize, Serialize};

/// Settings payload of an entry: an arbitrary key → JSON value map whose
/// shape is component-type specific. Validated against the type's schema at
/// render time, never trusted here.
pub type Settings = serde_json::Map<String, serde_json::Value>;

/// Opaque stable identifier of a Component Entry.
///
/// Unique within a document, immutable once created, and never reused after
/// deletion within the same editing session (the editor's id allocator
/// guarantees the latter).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One block instance: `{id, type, variant, settings}` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentEntry {
    pub id: EntryId,

    /// Key into the component registry.
    #[serde(rename = "type")]
    pub type_id: String,

    /// One of the type's allowed variants. A stale or unknown value is not
    /// an error: rendering substitutes the type's default variant.
    pub variant: String,

    #[serde(default)]
    pub settings: Settings,
}

impl ComponentEntry {
    pub fn new(id: EntryId, type_id: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            id,
            type_id: type_id.into(),
            variant: variant.into(),
            settings: Settings::new(),
        }
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.settings.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entry_wire_format_uses_external_names() {
        let entry = ComponentEntry::new(EntryId::new("blk-1"), "hero", "plain")
            .with_setting("headline", json!("Welcome"));

        let wire = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            wire,
            json!({
                "id": "blk-1",
                "type": "hero",
                "variant": "plain",
                "settings": { "headline": "Welcome" }
            })
        );
    }

    #[test]
    fn missing_settings_defaults_to_empty() {
        let entry: ComponentEntry = serde_json::from_value(serde_json::json!({
            "id": "blk-2",
            "type": "footer",
            "variant": "simple"
        }))
        .unwrap();
        assert!(entry.settings.is_empty());
    }
}
