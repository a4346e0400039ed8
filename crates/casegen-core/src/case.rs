//! Generated test case types: the output vocabulary of the generator
//!
//! A `TestSuite` is what the assembler produces and what every exporter
//! consumes. Negative variants are carried inline on the test case they were
//! derived from; each variant owns an independent copy of its payload.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Complete output of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TestSuite {
    /// Number of operations found in the spec
    pub operations: u64,
    /// Total negative variants across all cases
    pub negative_count: u64,
    /// Total per-operation warnings (degraded `$ref` resolutions etc.)
    pub warning_count: u64,
    /// One entry per operation, in spec declaration order
    pub cases: Vec<TestCase>,
}

impl TestSuite {
    /// Build a suite from assembled cases, computing the summary counts.
    #[must_use]
    pub fn from_cases(cases: Vec<TestCase>) -> Self {
        let negative_count = cases.iter().map(|c| c.negatives.len() as u64).sum();
        let warning_count = cases.iter().map(|c| c.warnings.len() as u64).sum();
        Self {
            operations: cases.len() as u64,
            negative_count,
            warning_count,
            cases,
        }
    }
}

/// One generated test case for a single operation (path + method).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TestCase {
    /// Path template, e.g. "/api/users/{id}"
    pub path: String,
    /// HTTP method, uppercase
    pub method: String,
    /// Human-readable description of what the case verifies
    pub summary: String,
    /// Declared parameters (query, path, header, body)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterInfo>,
    /// Sample values for non-body parameters, keyed by parameter name
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub parameter_values: Value,
    /// Synthesized request payload (empty mapping when the operation has no body)
    pub payload: Value,
    /// Expected response status for the valid payload
    pub expected_status: u16,
    /// Assertions the exported case should check
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assertions: Vec<Assertion>,
    /// Deliberately invalid payload variants
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub negatives: Vec<NegativeCase>,
    /// Per-operation generation warnings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Declared request parameter, stripped to what exporters need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ParameterInfo {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParamLocation,
    #[serde(default)]
    pub required: bool,
}

/// Where a parameter lives in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Query,
    Path,
    Header,
    Body,
}

impl ParamLocation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Path => "path",
            Self::Header => "header",
            Self::Body => "body",
        }
    }
}

impl std::fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deliberately invalid payload variant derived from a valid one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NegativeCase {
    /// What was broken
    pub kind: NegativeKind,
    /// The field this variant targets ("unexpected_field" for extra-field)
    pub target_field: String,
    /// Expected response status for the invalid payload
    pub expected_status: u16,
    /// The mutated payload, structurally independent of the base payload
    pub payload: Value,
}

/// Classification of a negative variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NegativeKind {
    /// A required field was removed
    MissingRequiredField,
    /// A field's value was replaced with one of the wrong type
    WrongDataType,
    /// An undeclared field was injected
    ExtraField,
}

impl NegativeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingRequiredField => "missing_required_field",
            Self::WrongDataType => "wrong_data_type",
            Self::ExtraField => "extra_field",
        }
    }
}

impl std::fmt::Display for NegativeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A check the exported test case should perform against the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Response status must equal `expected`
    StatusCode { expected: u16 },
    /// Response must arrive within `millis` milliseconds
    ResponseTimeBelow { millis: u64 },
}

impl Assertion {
    /// Short label used in CSV export.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::StatusCode { .. } => "status_code",
            Self::ResponseTimeBelow { .. } => "response_time_below",
        }
    }
}

/// Generate JSON Schema for the exported suite format.
#[must_use]
pub fn generate_schema() -> String {
    let schema = schemars::schema_for!(TestSuite);
    serde_json::to_string_pretty(&schema).expect("schema serialization should not fail")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_case() -> TestCase {
        TestCase {
            path: "/api/users".to_string(),
            method: "POST".to_string(),
            summary: "Create a user".to_string(),
            parameters: vec![ParameterInfo {
                name: "verbose".to_string(),
                location: ParamLocation::Query,
                required: false,
            }],
            parameter_values: json!({"verbose": true}),
            payload: json!({"name": "string_value"}),
            expected_status: 201,
            assertions: vec![Assertion::StatusCode { expected: 201 }],
            negatives: vec![NegativeCase {
                kind: NegativeKind::MissingRequiredField,
                target_field: "name".to_string(),
                expected_status: 400,
                payload: json!({}),
            }],
            warnings: vec![],
        }
    }

    #[test]
    fn suite_counts_from_cases() {
        let suite = TestSuite::from_cases(vec![sample_case(), sample_case()]);
        assert_eq!(suite.operations, 2);
        assert_eq!(suite.negative_count, 2);
        assert_eq!(suite.warning_count, 0);
    }

    #[test]
    fn case_serialization_roundtrip() {
        let case = sample_case();
        let json = serde_json::to_string(&case).unwrap();
        let parsed: TestCase = serde_json::from_str(&json).unwrap();
        assert_eq!(case, parsed);
    }

    #[test]
    fn negative_kind_serializes_snake_case() {
        let json = serde_json::to_string(&NegativeKind::MissingRequiredField).unwrap();
        assert_eq!(json, "\"missing_required_field\"");

        let parsed: NegativeKind = serde_json::from_str("\"wrong_data_type\"").unwrap();
        assert_eq!(parsed, NegativeKind::WrongDataType);
    }

    #[test]
    fn negative_kind_display() {
        insta::assert_snapshot!(NegativeKind::WrongDataType.to_string(), @"wrong_data_type");
        insta::assert_snapshot!(NegativeKind::ExtraField.to_string(), @"extra_field");
    }

    #[test]
    fn assertion_tagged_serialization() {
        let a = Assertion::StatusCode { expected: 200 };
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json, json!({"type": "status_code", "expected": 200}));
    }

    #[test]
    fn param_location_rename() {
        let p = ParameterInfo {
            name: "id".into(),
            location: ParamLocation::Path,
            required: true,
        };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json, json!({"name": "id", "in": "path", "required": true}));
    }

    #[test]
    fn empty_collections_skipped_in_output() {
        let mut case = sample_case();
        case.negatives.clear();
        case.warnings.clear();
        let json = serde_json::to_value(&case).unwrap();
        assert!(json.get("negatives").is_none());
        assert!(json.get("warnings").is_none());
    }

    #[test]
    fn schema_generation_produces_valid_json() {
        let schema = generate_schema();
        let parsed: serde_json::Value = serde_json::from_str(&schema).unwrap();
        assert!(parsed.get("$schema").is_some() || parsed.get("type").is_some());
        assert_eq!(
            parsed.get("title").and_then(|v| v.as_str()),
            Some("TestSuite")
        );
    }
}
