//! Render-tree nodes produced by the pipeline and consumed by every host
//! (editor canvas, public renderer, HTML compiler).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One node of the render tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RenderNode {
    /// HTML-like element.
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        styles: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<RenderNode>,
        /// Entry that produced this node (root element of each block only);
        /// lets the editor map canvas geometry back to document entries.
        #[serde(skip_serializing_if = "Option::is_none")]
        entry_id: Option<String>,
    },

    /// Text node.
    Text { content: String },

    /// Degraded output for an entry the pipeline refused to render.
    /// Shown inline instead of crashing the page.
    Placeholder {
        kind: PlaceholderKind,
        entry_id: String,
    },
}

/// The three user-legible failure states of the pipeline, kept distinct so
/// the editor can tell the author specifically what to fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "error", rename_all = "kebab-case")]
pub enum PlaceholderKind {
    /// The document references a type the catalog no longer (or never)
    /// offered.
    UnknownType { type_id: String },

    /// Merged settings failed the variant's schema. `detail` carries the
    /// raw validation text and is only populated in dev mode.
    InvalidSettings {
        fields: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
}

impl PlaceholderKind {
    /// Short human-readable summary for the placeholder body.
    pub fn message(&self) -> String {
        match self {
            PlaceholderKind::UnknownType { type_id } => {
                format!("Unknown component type \"{type_id}\"")
            }
            PlaceholderKind::InvalidSettings { fields, .. } => {
                format!("Invalid configuration: {}", fields.join(", "))
            }
        }
    }
}

impl RenderNode {
    pub fn element(tag: impl Into<String>) -> Self {
        RenderNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
            entry_id: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        RenderNode::Text {
            content: content.into(),
        }
    }

    pub fn placeholder(kind: PlaceholderKind, entry_id: impl Into<String>) -> Self {
        RenderNode::Placeholder {
            kind,
            entry_id: entry_id.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let RenderNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let RenderNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: RenderNode) -> Self {
        if let RenderNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<RenderNode>) -> Self {
        if let RenderNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn with_entry_id(mut self, id: impl Into<String>) -> Self {
        if let RenderNode::Element {
            ref mut entry_id, ..
        } = self
        {
            *entry_id = Some(id.into());
        }
        self
    }

    /// True when this node is degraded output rather than real content.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, RenderNode::Placeholder { .. })
    }
}

/// Render output for a whole document: one root node per Component Entry,
/// in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderTree {
    pub nodes: Vec<RenderNode>,
}

impl RenderTree {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_compose() {
        let node = RenderNode::element("section")
            .with_attr("class", "bw-hero")
            .with_style("text-align", "center")
            .with_child(RenderNode::text("hello"))
            .with_entry_id("blk-1");

        match node {
            RenderNode::Element {
                tag,
                attributes,
                styles,
                children,
                entry_id,
            } => {
                assert_eq!(tag, "section");
                assert_eq!(attributes["class"], "bw-hero");
                assert_eq!(styles["text-align"], "center");
                assert_eq!(children, vec![RenderNode::text("hello")]);
                assert_eq!(entry_id.as_deref(), Some("blk-1"));
            }
            _ => panic!("expected element"),
        }
    }

    #[test]
    fn placeholder_is_tagged_on_the_wire() {
        let node = RenderNode::placeholder(
            PlaceholderKind::UnknownType {
                type_id: "legacy-widget".into(),
            },
            "blk-9",
        );
        let wire = serde_json::to_value(&node).unwrap();
        assert_eq!(wire["type"], "placeholder");
        assert_eq!(wire["kind"]["error"], "unknown-type");
        assert_eq!(wire["kind"]["type_id"], "legacy-widget");
    }
}
