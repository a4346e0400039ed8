//! Schema type classification
//!
//! Collapses the "what shape is this node" question into one closed tag set
//! so every downstream consumer switches on `Kind` instead of re-probing
//! the raw mapping. Callers must resolve `$ref` before classifying; the
//! classification of an unresolved reference node is not defined.

use serde_json::Value;

/// Effective kind of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
    OneOf,
    AnyOf,
    AllOf,
    Unknown,
}

impl Kind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::OneOf => "oneOf",
            Self::AnyOf => "anyOf",
            Self::AllOf => "allOf",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a schema node.
///
/// Priority when multiple keys could apply: an explicit `type` wins; then
/// `oneOf` > `anyOf` > `allOf` (a fixed, arbitrary but stable tie-break);
/// then structure (`properties` implies object, `items` implies array;
/// composition sub-schemas routinely omit `type`); otherwise `Unknown`.
///
/// `Unknown` is a valid classification, not an error: synthesis renders it
/// as a null placeholder.
#[must_use]
pub fn classify(node: &Value) -> Kind {
    let Some(obj) = node.as_object() else {
        return Kind::Unknown;
    };

    if let Some(ty) = obj.get("type").and_then(|v| v.as_str()) {
        return match ty {
            "object" => Kind::Object,
            "array" => Kind::Array,
            "string" => Kind::String,
            "integer" => Kind::Integer,
            "number" => Kind::Number,
            "boolean" => Kind::Boolean,
            _ => Kind::Unknown,
        };
    }

    if obj.contains_key("oneOf") {
        Kind::OneOf
    } else if obj.contains_key("anyOf") {
        Kind::AnyOf
    } else if obj.contains_key("allOf") {
        Kind::AllOf
    } else if obj.contains_key("properties") {
        Kind::Object
    } else if obj.contains_key("items") {
        Kind::Array
    } else {
        Kind::Unknown
    }
}
