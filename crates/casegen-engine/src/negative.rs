//! Negative variant derivation
//!
//! Takes a synthesized valid payload plus the schema's required-field list
//! and per-field kind map, and produces deliberately invalid variants.
//! Every variant owns a deep structural copy of the payload: mutating one
//! never affects another or the base.

use std::collections::HashSet;

use serde_json::{Value, json};

use casegen_core::case::{NegativeCase, NegativeKind};

use crate::classify::Kind;

/// Expected response status for invalid payloads.
pub const NEGATIVE_EXPECTED_STATUS: u16 = 400;

/// Field name injected by the extra-field variant.
pub const EXTRA_FIELD_NAME: &str = "unexpected_field";

const EXTRA_FIELD_VALUE: &str = "junk";

/// The fixed wrong-typed replacement for a declared kind.
///
/// Returns `None` for composite and unknown kinds, which get no wrong-type
/// variant.
#[must_use]
pub fn wrong_type_value(kind: Kind) -> Option<Value> {
    match kind {
        Kind::String => Some(json!(123)),
        Kind::Integer => Some(json!("wrong_integer")),
        Kind::Number => Some(json!("wrong_number")),
        Kind::Boolean => Some(json!("not_boolean")),
        Kind::Array => Some(json!({})),
        Kind::Object => Some(json!("not_an_object")),
        Kind::OneOf | Kind::AnyOf | Kind::AllOf | Kind::Unknown => None,
    }
}

/// Derive missing-required and wrong-type variants from a valid payload.
///
/// Iteration follows the declared order of `required` and `property_types`,
/// so repeated calls on the same inputs yield structurally identical
/// sequences.
#[must_use]
pub fn derive_negatives(
    base: &Value,
    required: &[String],
    property_types: &[(String, Kind)],
) -> Vec<NegativeCase> {
    let mut variants = Vec::new();

    for field in required {
        let mut payload = base.clone();
        remove_at_path(&mut payload, field);
        variants.push(NegativeCase {
            kind: NegativeKind::MissingRequiredField,
            target_field: field.clone(),
            expected_status: NEGATIVE_EXPECTED_STATUS,
            payload,
        });
    }

    for (field, kind) in property_types {
        let Some(wrong) = wrong_type_value(*kind) else {
            continue;
        };
        let mut payload = base.clone();
        if let Some(obj) = payload.as_object_mut() {
            obj.insert(field.clone(), wrong);
        }
        variants.push(NegativeCase {
            kind: NegativeKind::WrongDataType,
            target_field: field.clone(),
            expected_status: NEGATIVE_EXPECTED_STATUS,
            payload,
        });
    }

    variants
}

/// Build the extra-field variant: one undeclared key with a junk value.
#[must_use]
pub fn extra_field_variant(base: &Value) -> NegativeCase {
    let mut payload = base.clone();
    if let Some(obj) = payload.as_object_mut() {
        obj.insert(EXTRA_FIELD_NAME.to_string(), json!(EXTRA_FIELD_VALUE));
    }
    NegativeCase {
        kind: NegativeKind::ExtraField,
        target_field: EXTRA_FIELD_NAME.to_string(),
        expected_status: NEGATIVE_EXPECTED_STATUS,
        payload,
    }
}

/// Remove the field at a dot-separated path.
///
/// Traverses all but the last segment; when an intermediate segment is
/// absent the field is already missing, so the removal is skipped silently.
fn remove_at_path(payload: &mut Value, path: &str) {
    let mut segments: Vec<&str> = path.split('.').collect();
    let Some(last) = segments.pop() else {
        return;
    };

    let mut node = payload;
    for segment in segments {
        match node.get_mut(segment) {
            Some(next) => node = next,
            None => return,
        }
    }

    if let Some(obj) = node.as_object_mut() {
        obj.remove(last);
    }
}

/// Deduplicating deriver for one generation run.
///
/// Tracks seen `(method, path)` keys so the same operation processed twice
/// does not emit duplicate variant sets.
#[derive(Debug, Default)]
pub struct NegativeDeriver {
    seen: HashSet<(String, String)>,
    include_extra_field: bool,
}

impl NegativeDeriver {
    #[must_use]
    pub fn new(include_extra_field: bool) -> Self {
        Self {
            seen: HashSet::new(),
            include_extra_field,
        }
    }

    /// Derive variants for one operation, or `None` on a repeated
    /// `(method, path)` pair.
    pub fn derive(
        &mut self,
        method: &str,
        path: &str,
        base: &Value,
        required: &[String],
        property_types: &[(String, Kind)],
    ) -> Option<Vec<NegativeCase>> {
        if !self.seen.insert((method.to_string(), path.to_string())) {
            return None;
        }

        let mut variants = derive_negatives(base, required, property_types);
        if self.include_extra_field && base.is_object() {
            variants.push(extra_field_variant(base));
        }
        Some(variants)
    }
}
