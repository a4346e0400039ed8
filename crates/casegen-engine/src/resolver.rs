//! `$ref` resolution over a loaded spec document
//!
//! Resolution is a pure lookup: pointers are walked segment by segment over
//! the immutable document, and chained references are followed with a
//! visited set so cycles surface as errors instead of unbounded recursion.

use std::collections::HashSet;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The reference is not a `#/...` local pointer
    #[error("unsupported reference format: {0}")]
    UnsupportedFormat(String),
    /// The pointer path does not exist in the document
    #[error("unresolvable reference: {0}")]
    Unresolvable(String),
    /// The reference chain revisits a pointer
    #[error("cyclic reference: {0}")]
    Cyclic(String),
}

/// Resolve a `$ref` pointer to its target schema node.
///
/// Follows chained references (a target that is itself a `$ref`) until a
/// concrete node is reached.
///
/// # Errors
///
/// Returns `UnsupportedFormat` for non-local pointers, `Unresolvable` when
/// a path segment is missing, and `Cyclic` when the chain revisits itself.
pub fn resolve<'a>(reference: &str, doc: &'a Value) -> Result<&'a Value, ResolveError> {
    let mut visited = HashSet::new();
    resolve_inner(reference, doc, &mut visited)
}

fn resolve_inner<'a>(
    reference: &str,
    doc: &'a Value,
    visited: &mut HashSet<String>,
) -> Result<&'a Value, ResolveError> {
    let Some(pointer) = reference.strip_prefix("#/") else {
        return Err(ResolveError::UnsupportedFormat(reference.to_string()));
    };

    if !visited.insert(reference.to_string()) {
        return Err(ResolveError::Cyclic(reference.to_string()));
    }

    let mut node = doc;
    for segment in pointer.split('/') {
        node = node
            .get(segment)
            .ok_or_else(|| ResolveError::Unresolvable(reference.to_string()))?;
    }

    if let Some(next) = node.get("$ref").and_then(|v| v.as_str()) {
        return resolve_inner(next, doc, visited);
    }

    Ok(node)
}
