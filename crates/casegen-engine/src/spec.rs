//! Operation extraction - normalize paths, parameters, and request schemas
//!
//! Swagger 2.0 (body-typed parameter) and OpenAPI 3.x (`requestBody`) both
//! normalize to a single effective request schema here, so the rest of the
//! engine never cares which dialect loaded the document.

use serde::Serialize;
use serde_json::{Value, json};

use casegen_core::case::ParamLocation;

use crate::loader::SpecDocument;

const METHODS: [&str; 5] = ["get", "post", "put", "delete", "patch"];

/// Extracted API operation.
#[derive(Debug, Clone, Serialize)]
pub struct Operation {
    /// HTTP method, uppercase
    pub method: String,
    /// Path template
    pub path: String,
    /// Spec-provided summary, when present
    pub summary: Option<String>,
    /// Path-level plus operation-level parameters
    pub parameters: Vec<Parameter>,
    /// Normalized request schema (OpenAPI 3 requestBody or Swagger 2 body parameter)
    pub request_schema: Option<Value>,
    /// Declared response status codes, in declaration order
    pub expected_statuses: Vec<u16>,
}

impl Operation {
    /// Operation label, e.g. "POST /api/users".
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Declared request parameter with its schema.
#[derive(Debug, Clone, Serialize)]
pub struct Parameter {
    pub name: String,
    pub location: ParamLocation,
    pub required: bool,
    pub schema: Value,
}

/// Extract every operation from the spec, in declaration order.
#[must_use]
pub fn extract_operations(doc: &SpecDocument) -> Vec<Operation> {
    let mut ops = Vec::new();

    let Some(paths) = doc.root().get("paths").and_then(|p| p.as_object()) else {
        return ops;
    };

    for (path, path_item) in paths {
        for method in METHODS {
            let Some(operation) = path_item.get(method) else {
                continue;
            };

            let mut parameters = Vec::new();
            let mut body_schema = None;

            // Collect parameters from path-level + operation-level
            for source in [path_item.get("parameters"), operation.get("parameters")]
                .iter()
                .flatten()
            {
                if let Some(params) = source.as_array() {
                    for param in params {
                        let Some(parsed) = parse_parameter(param) else {
                            continue;
                        };
                        // Swagger 2 carries the request schema as a body parameter
                        if parsed.location == ParamLocation::Body && body_schema.is_none() {
                            body_schema = Some(parsed.schema.clone());
                        }
                        parameters.push(parsed);
                    }
                }
            }

            // OpenAPI 3 request body wins over a Swagger 2 body parameter
            let request_schema = operation
                .get("requestBody")
                .and_then(|rb| rb.get("content"))
                .and_then(|c| c.get("application/json"))
                .and_then(|ct| ct.get("schema"))
                .cloned()
                .or(body_schema);

            let expected_statuses: Vec<u16> = operation
                .get("responses")
                .and_then(|r| r.as_object())
                .map(|r| r.keys().filter_map(|k| k.parse().ok()).collect())
                .unwrap_or_default();

            let summary = operation
                .get("summary")
                .and_then(|s| s.as_str())
                .map(String::from);

            ops.push(Operation {
                method: method.to_uppercase(),
                path: path.clone(),
                summary,
                parameters,
                request_schema,
                expected_statuses,
            });
        }
    }

    ops
}

fn parse_parameter(param: &Value) -> Option<Parameter> {
    let name = param.get("name")?.as_str()?.to_string();
    let location = match param.get("in")?.as_str()? {
        "query" => ParamLocation::Query,
        "path" => ParamLocation::Path,
        "header" => ParamLocation::Header,
        "body" => ParamLocation::Body,
        _ => return None,
    };
    // Swagger 2 non-body parameters declare their type inline
    let schema = param
        .get("schema")
        .cloned()
        .or_else(|| param.get("type").map(|t| json!({"type": t})))
        .unwrap_or_else(|| json!({"type": "string"}));
    let required = param
        .get("required")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    Some(Parameter {
        name,
        location,
        required,
        schema,
    })
}
