//! JSON Schema → representative `serde_json::Value` synthesis
//!
//! Handles the OpenAPI 3.x / Swagger 2.0 schema subset:
//! string, integer, number, boolean, array, object, `$ref`, oneOf, anyOf, allOf.
//!
//! Synthesis is fully deterministic: every primitive renders as the same
//! fixed representative value on every call, so generated suites are
//! reproducible. Reference failures and cycles degrade to a null placeholder
//! and a recorded warning; one malformed schema never aborts the run.

use serde_json::{Map, Value, json};

use casegen_core::config::PropertyPolicy;

use crate::classify::{Kind, classify};
use crate::loader::SpecDocument;
use crate::resolver::{ResolveError, resolve};

/// Representative value for `string` schemas.
pub const SAMPLE_STRING: &str = "string_value";
/// Representative value for `integer` schemas.
pub const SAMPLE_INTEGER: i64 = 123;
/// Representative value for `number` schemas.
pub const SAMPLE_NUMBER: f64 = 12.34;
/// Representative value for `boolean` schemas.
pub const SAMPLE_BOOLEAN: bool = true;

/// Maximum recursion depth before a branch degrades to null.
/// Guards against self-referential schemas that cycle through `properties`
/// or `items` rather than through a direct `$ref` chain.
const MAX_DEPTH: u32 = 32;

/// Synthesize a representative payload for a schema node.
///
/// Includes all declared object properties and discards warnings; see
/// [`synthesize_with`] for the policy and warning-collecting variant.
#[must_use]
pub fn synthesize(schema: &Value, doc: &SpecDocument) -> Value {
    let mut warnings = Vec::new();
    synthesize_with(schema, doc, PropertyPolicy::All, &mut warnings)
}

/// Synthesize a representative payload, with property policy and warnings.
///
/// Warnings record every branch that degraded to a null placeholder
/// (unresolvable or cyclic references, recursion depth exceeded).
pub fn synthesize_with(
    schema: &Value,
    doc: &SpecDocument,
    policy: PropertyPolicy,
    warnings: &mut Vec<String>,
) -> Value {
    let mut active_refs = Vec::new();
    synth_inner(schema, doc.root(), policy, 0, &mut active_refs, warnings)
}

fn synth_inner(
    schema: &Value,
    root: &Value,
    policy: PropertyPolicy,
    depth: u32,
    active_refs: &mut Vec<String>,
    warnings: &mut Vec<String>,
) -> Value {
    if depth > MAX_DEPTH {
        warnings.push(format!(
            "recursion depth limit ({MAX_DEPTH}) exceeded, substituting null"
        ));
        return Value::Null;
    }

    // $ref: resolve, guarding against re-entering a reference that is
    // already being expanded (an object whose property refs itself)
    if let Some(reference) = schema.get("$ref").and_then(|v| v.as_str()) {
        if active_refs.iter().any(|r| r == reference) {
            warnings.push(ResolveError::Cyclic(reference.to_string()).to_string());
            return Value::Null;
        }
        return match resolve(reference, root) {
            Ok(resolved) => {
                active_refs.push(reference.to_string());
                let value = synth_inner(resolved, root, policy, depth + 1, active_refs, warnings);
                active_refs.pop();
                value
            }
            Err(e) => {
                warnings.push(e.to_string());
                Value::Null
            }
        };
    }

    match classify(schema) {
        Kind::Object => {
            let required: Vec<&str> = schema
                .get("required")
                .and_then(|v| v.as_array())
                .map(|arr| arr.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();

            let mut obj = Map::new();
            if let Some(props) = schema.get("properties").and_then(|v| v.as_object()) {
                for (name, prop) in props {
                    if policy == PropertyPolicy::RequiredOnly
                        && !required.contains(&name.as_str())
                    {
                        continue;
                    }
                    obj.insert(
                        name.clone(),
                        synth_inner(prop, root, policy, depth + 1, active_refs, warnings),
                    );
                }
            }
            Value::Object(obj)
        }
        // Always a one-element sequence; empty arrays hide list handling bugs
        Kind::Array => {
            let item = schema.get("items").map_or(Value::Null, |items| {
                synth_inner(items, root, policy, depth + 1, active_refs, warnings)
            });
            Value::Array(vec![item])
        }
        Kind::String => json!(SAMPLE_STRING),
        Kind::Integer => json!(SAMPLE_INTEGER),
        Kind::Number => json!(SAMPLE_NUMBER),
        Kind::Boolean => json!(SAMPLE_BOOLEAN),
        // First listed branch only, a fixed deterministic tie-break
        Kind::OneOf => first_branch(schema, "oneOf", root, policy, depth, active_refs, warnings),
        Kind::AnyOf => first_branch(schema, "anyOf", root, policy, depth, active_refs, warnings),
        Kind::AllOf => {
            let mut merged = Map::new();
            if let Some(subs) = schema.get("allOf").and_then(|v| v.as_array()) {
                for sub in subs {
                    // Later sub-schemas overwrite earlier ones on key collision
                    if let Value::Object(fields) =
                        synth_inner(sub, root, policy, depth + 1, active_refs, warnings)
                    {
                        merged.extend(fields);
                    }
                }
            }
            Value::Object(merged)
        }
        Kind::Unknown => Value::Null,
    }
}

fn first_branch(
    schema: &Value,
    key: &str,
    root: &Value,
    policy: PropertyPolicy,
    depth: u32,
    active_refs: &mut Vec<String>,
    warnings: &mut Vec<String>,
) -> Value {
    schema
        .get(key)
        .and_then(|v| v.as_array())
        .and_then(|branches| branches.first())
        .map_or(Value::Null, |sub| {
            synth_inner(sub, root, policy, depth + 1, active_refs, warnings)
        })
}
