//! # Settings Schemas
//!
//! Data-level description of a component type's settings contract,
//! interpreted by one generic validator. Adding a component type means
//! adding a data entry, not new control flow.

use blockwork_document::Settings;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The kind of value a setting field accepts, plus per-kind constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SettingKind {
    /// Plain single-line text.
    Text,
    /// Multi-paragraph text (rendered with line breaks preserved).
    RichText,
    /// Absolute http(s) URL or site-relative path.
    Url,
    /// Hex color (`#rgb`, `#rrggbb` or `#rrggbbaa`).
    Color,
    /// Boolean switch.
    Toggle,
    /// Number with optional inclusive bounds.
    Number {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// One of a fixed set of string options.
    Select { options: Vec<String> },
    /// Ordered list of strings (image URLs, link labels...).
    StringList,
}

impl SettingKind {
    fn expected(&self) -> &'static str {
        match self {
            SettingKind::Text | SettingKind::RichText => "string",
            SettingKind::Url => "URL string",
            SettingKind::Color => "hex color string",
            SettingKind::Toggle => "boolean",
            SettingKind::Number { .. } => "number",
            SettingKind::Select { .. } => "option string",
            SettingKind::StringList => "list of strings",
        }
    }
}

/// One field of a settings schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub kind: SettingKind,
    pub required: bool,
}

impl FieldSpec {
    pub fn required(kind: SettingKind) -> Self {
        Self {
            kind,
            required: true,
        }
    }

    pub fn optional(kind: SettingKind) -> Self {
        Self {
            kind,
            required: false,
        }
    }
}

/// Why a settings object was rejected, per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub reason: ViolationReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum ViolationReason {
    MissingRequired,
    WrongType { expected: String },
    OutOfRange { min: Option<f64>, max: Option<f64> },
    UnknownOption { options: Vec<String> },
    MalformedColor,
    MalformedUrl,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            ViolationReason::MissingRequired => {
                write!(f, "{}: required field is missing", self.field)
            }
            ViolationReason::WrongType { expected } => {
                write!(f, "{}: expected {expected}", self.field)
            }
            ViolationReason::OutOfRange { min, max } => {
                write!(f, "{}: number out of range", self.field)?;
                if let Some(min) = min {
                    write!(f, ", min {min}")?;
                }
                if let Some(max) = max {
                    write!(f, ", max {max}")?;
                }
                Ok(())
            }
            ViolationReason::UnknownOption { options } => {
                write!(f, "{}: must be one of {}", self.field, options.join(", "))
            }
            ViolationReason::MalformedColor => {
                write!(f, "{}: not a valid hex color", self.field)
            }
            ViolationReason::MalformedUrl => write!(f, "{}: not a valid URL", self.field),
        }
    }
}

/// Field name → contract map for one component variant.
///
/// Keys unknown to the schema are ignored during validation: documents saved
/// against an older catalog may carry stale fields, and stale data is a
/// soft condition, not an authoring error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsSchema {
    fields: BTreeMap<String, FieldSpec>,
}

impl SettingsSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.insert(name.into(), spec);
        self
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Validate a (merged) settings object. Collects every violation rather
    /// than stopping at the first, so the editor can flag all bad fields at
    /// once.
    pub fn validate(&self, settings: &Settings) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();

        for (name, spec) in &self.fields {
            match settings.get(name) {
                None | Some(Value::Null) => {
                    if spec.required {
                        violations.push(Violation {
                            field: name.clone(),
                            reason: ViolationReason::MissingRequired,
                        });
                    }
                }
                Some(value) => {
                    if let Some(reason) = check_value(&spec.kind, value) {
                        violations.push(Violation {
                            field: name.clone(),
                            reason,
                        });
                    }
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

fn check_value(kind: &SettingKind, value: &Value) -> Option<ViolationReason> {
    match kind {
        SettingKind::Text | SettingKind::RichText => match value {
            Value::String(_) => None,
            _ => Some(wrong_type(kind)),
        },
        SettingKind::Url => match value {
            Value::String(s) if is_valid_url(s) => None,
            Value::String(_) => Some(ViolationReason::MalformedUrl),
            _ => Some(wrong_type(kind)),
        },
        SettingKind::Color => match value {
            Value::String(s) if is_valid_color(s) => None,
            Value::String(_) => Some(ViolationReason::MalformedColor),
            _ => Some(wrong_type(kind)),
        },
        SettingKind::Toggle => match value {
            Value::Bool(_) => None,
            _ => Some(wrong_type(kind)),
        },
        SettingKind::Number { min, max } => match value.as_f64() {
            Some(n) => {
                let below = min.map(|m| n < m).unwrap_or(false);
                let above = max.map(|m| n > m).unwrap_or(false);
                if below || above {
                    Some(ViolationReason::OutOfRange {
                        min: *min,
                        max: *max,
                    })
                } else {
                    None
                }
            }
            None => Some(wrong_type(kind)),
        },
        SettingKind::Select { options } => match value {
            Value::String(s) if options.iter().any(|o| o == s) => None,
            Value::String(_) => Some(ViolationReason::UnknownOption {
                options: options.clone(),
            }),
            _ => Some(wrong_type(kind)),
        },
        SettingKind::StringList => match value {
            Value::Array(items) if items.iter().all(Value::is_string) => None,
            _ => Some(wrong_type(kind)),
        },
    }
}

fn wrong_type(kind: &SettingKind) -> ViolationReason {
    ViolationReason::WrongType {
        expected: kind.expected().to_string(),
    }
}

fn is_valid_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://") || s.starts_with('/')
}

fn is_valid_color(s: &str) -> bool {
    let Some(hex) = s.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
}
