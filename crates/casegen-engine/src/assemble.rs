//! Test case assembly - pair operations with payloads, negatives, and assertions

use serde_json::{Map, Value, json};

use casegen_core::case::{Assertion, ParamLocation, ParameterInfo, TestCase, TestSuite};
use casegen_core::config::Config;
use casegen_core::plan::{GenerationPlan, NegativeCounts, OperationPlan, validate_config};
use casegen_core::summary;

use crate::classify::{Kind, classify};
use crate::loader::SpecDocument;
use crate::negative::{NegativeDeriver, wrong_type_value};
use crate::resolver::resolve;
use crate::spec::{Operation, extract_operations};
use crate::synth::synthesize_with;

/// Expected status when the spec declares no responses.
pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

/// Response-time bound attached to every positive case, in milliseconds.
pub const RESPONSE_TIME_LIMIT_MS: u64 = 2000;

/// Required fields and per-property kinds of a request schema.
pub struct SchemaProfile {
    pub required: Vec<String>,
    pub property_kinds: Vec<(String, Kind)>,
    pub warnings: Vec<String>,
}

/// Profile a request schema: resolve its top-level `$ref` and per-property
/// refs, then read the required list and classify each property.
///
/// Resolution failures degrade to an empty profile (or a skipped property)
/// plus a warning, so one malformed schema never aborts the run.
#[must_use]
pub fn schema_profile(schema: &Value, doc: &SpecDocument) -> SchemaProfile {
    let mut warnings = Vec::new();

    let resolved = if let Some(reference) = schema.get("$ref").and_then(|v| v.as_str()) {
        match resolve(reference, doc.root()) {
            Ok(node) => node,
            Err(e) => {
                warnings.push(e.to_string());
                return SchemaProfile {
                    required: Vec::new(),
                    property_kinds: Vec::new(),
                    warnings,
                };
            }
        }
    } else {
        schema
    };

    let required: Vec<String> = resolved
        .get("required")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    let mut property_kinds = Vec::new();
    if let Some(props) = resolved.get("properties").and_then(|v| v.as_object()) {
        for (name, prop) in props {
            let prop_resolved = if let Some(reference) = prop.get("$ref").and_then(|v| v.as_str())
            {
                match resolve(reference, doc.root()) {
                    Ok(node) => node,
                    Err(e) => {
                        warnings.push(format!("property {name}: {e}"));
                        continue;
                    }
                }
            } else {
                prop
            };
            property_kinds.push((name.clone(), classify(prop_resolved)));
        }
    }

    SchemaProfile {
        required,
        property_kinds,
        warnings,
    }
}

/// Builds the exported test suite from a loaded spec document.
pub struct Assembler<'a> {
    doc: &'a SpecDocument,
    config: &'a Config,
}

impl<'a> Assembler<'a> {
    #[must_use]
    pub fn new(doc: &'a SpecDocument, config: &'a Config) -> Self {
        Self { doc, config }
    }

    /// Generate the full suite: one test case per operation, negatives
    /// attached.
    #[must_use]
    pub fn assemble(&self) -> TestSuite {
        let mut deriver = NegativeDeriver::new(self.config.extra_field);
        let cases = extract_operations(self.doc)
            .iter()
            .map(|op| self.build_case(op, &mut deriver))
            .collect();
        TestSuite::from_cases(cases)
    }

    /// Describe what `assemble` would produce, plus config validations.
    #[must_use]
    pub fn plan(&self) -> GenerationPlan {
        let operations: Vec<OperationPlan> = extract_operations(self.doc)
            .iter()
            .map(|op| self.plan_operation(op))
            .collect();
        let total_cases = operations
            .iter()
            .map(|op| 1 + u64::from(op.negatives.total()))
            .sum();

        GenerationPlan {
            operations,
            total_cases,
            validations: validate_config(self.config),
        }
    }

    fn build_case(&self, op: &Operation, deriver: &mut NegativeDeriver) -> TestCase {
        let mut warnings = Vec::new();

        // An operation without a request schema gets an empty payload
        let payload = op.request_schema.as_ref().map_or_else(
            || json!({}),
            |schema| {
                synthesize_with(schema, self.doc, self.config.property_policy, &mut warnings)
            },
        );

        // Sample values for non-body parameters
        let mut parameter_values = Map::new();
        for param in &op.parameters {
            if param.location == ParamLocation::Body {
                continue;
            }
            parameter_values.insert(
                param.name.clone(),
                synthesize_with(
                    &param.schema,
                    self.doc,
                    self.config.property_policy,
                    &mut warnings,
                ),
            );
        }

        let negatives = op.request_schema.as_ref().map_or_else(Vec::new, |schema| {
            let profile = schema_profile(schema, self.doc);
            warnings.extend(profile.warnings);
            deriver
                .derive(
                    &op.method,
                    &op.path,
                    &payload,
                    &profile.required,
                    &profile.property_kinds,
                )
                .unwrap_or_default()
        });

        let expected_status = op
            .expected_statuses
            .first()
            .copied()
            .unwrap_or(DEFAULT_EXPECTED_STATUS);

        TestCase {
            path: op.path.clone(),
            method: op.method.clone(),
            summary: summary::summarize(
                self.config.engine,
                &op.method,
                &op.path,
                op.summary.as_deref(),
            ),
            parameters: op
                .parameters
                .iter()
                .map(|p| ParameterInfo {
                    name: p.name.clone(),
                    location: p.location,
                    required: p.required,
                })
                .collect(),
            parameter_values: if parameter_values.is_empty() {
                Value::Null
            } else {
                Value::Object(parameter_values)
            },
            payload,
            expected_status,
            assertions: vec![
                Assertion::StatusCode {
                    expected: expected_status,
                },
                Assertion::ResponseTimeBelow {
                    millis: RESPONSE_TIME_LIMIT_MS,
                },
            ],
            negatives,
            warnings,
        }
    }

    fn plan_operation(&self, op: &Operation) -> OperationPlan {
        let (negatives, body_properties) = op.request_schema.as_ref().map_or_else(
            || (NegativeCounts::default(), Vec::new()),
            |schema| {
                let profile = schema_profile(schema, self.doc);
                let wrong_type = profile
                    .property_kinds
                    .iter()
                    .filter(|(_, kind)| wrong_type_value(*kind).is_some())
                    .count() as u32;
                let counts = NegativeCounts {
                    missing_required: profile.required.len() as u32,
                    wrong_type,
                    extra_field: u32::from(self.config.extra_field),
                };
                let names = profile
                    .property_kinds
                    .iter()
                    .map(|(name, _)| name.clone())
                    .collect();
                (counts, names)
            },
        );

        OperationPlan {
            operation: op.label(),
            method: op.method.clone(),
            path: op.path.clone(),
            negatives,
            parameters: op
                .parameters
                .iter()
                .filter(|p| p.location != ParamLocation::Body)
                .map(|p| p.name.clone())
                .collect(),
            body_properties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casegen_core::case::NegativeKind;

    fn petstore() -> SpecDocument {
        SpecDocument::from_value(json!({
            "openapi": "3.0.0",
            "servers": [{"url": "http://petstore.local"}],
            "paths": {
                "/pets": {
                    "get": {
                        "summary": "List pets",
                        "parameters": [{
                            "name": "limit",
                            "in": "query",
                            "schema": {"type": "integer"}
                        }],
                        "responses": {"200": {"description": "ok"}}
                    },
                    "post": {
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/Pet"}
                                }
                            }
                        },
                        "responses": {"201": {"description": "created"}, "400": {"description": "bad"}}
                    }
                }
            },
            "components": {
                "schemas": {
                    "Pet": {
                        "type": "object",
                        "required": ["name"],
                        "properties": {
                            "name": {"type": "string"},
                            "age": {"type": "integer"},
                            "tags": {"type": "array", "items": {"type": "string"}}
                        }
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn assemble_full_suite() {
        let doc = petstore();
        let config = Config::default();
        let suite = Assembler::new(&doc, &config).assemble();

        assert_eq!(suite.operations, 2);
        assert_eq!(suite.cases[0].method, "GET");
        assert_eq!(suite.cases[1].method, "POST");
    }

    #[test]
    fn get_case_has_empty_payload_and_param_values() {
        let doc = petstore();
        let config = Config::default();
        let suite = Assembler::new(&doc, &config).assemble();

        let get = &suite.cases[0];
        assert_eq!(get.payload, json!({}));
        assert_eq!(get.parameter_values, json!({"limit": 123}));
        assert_eq!(get.expected_status, 200);
        assert_eq!(get.summary, "List pets");
        assert!(get.negatives.is_empty());
    }

    #[test]
    fn post_case_payload_and_negatives() {
        let doc = petstore();
        let config = Config::default();
        let suite = Assembler::new(&doc, &config).assemble();

        let post = &suite.cases[1];
        assert_eq!(
            post.payload,
            json!({"name": "string_value", "age": 123, "tags": ["string_value"]})
        );
        assert_eq!(post.expected_status, 201);

        // 1 missing-required + 3 wrong-type
        assert_eq!(post.negatives.len(), 4);
        let missing = &post.negatives[0];
        assert_eq!(missing.kind, NegativeKind::MissingRequiredField);
        assert_eq!(missing.target_field, "name");
        assert!(missing.payload.get("name").is_none());
        assert_eq!(missing.payload["age"], json!(123));
    }

    #[test]
    fn assertions_cover_status_and_time() {
        let doc = petstore();
        let config = Config::default();
        let suite = Assembler::new(&doc, &config).assemble();

        assert_eq!(
            suite.cases[1].assertions,
            vec![
                Assertion::StatusCode { expected: 201 },
                Assertion::ResponseTimeBelow { millis: 2000 },
            ]
        );
    }

    #[test]
    fn extra_field_config_adds_variant() {
        let doc = petstore();
        let config = Config {
            extra_field: true,
            ..Config::default()
        };
        let suite = Assembler::new(&doc, &config).assemble();

        let post = &suite.cases[1];
        assert_eq!(post.negatives.len(), 5);
        let extra = post.negatives.last().unwrap();
        assert_eq!(extra.kind, NegativeKind::ExtraField);
        assert_eq!(extra.payload["unexpected_field"], json!("junk"));
    }

    #[test]
    fn bad_ref_degrades_with_warning() {
        let doc = SpecDocument::from_value(json!({
            "openapi": "3.0.0",
            "paths": {
                "/broken": {
                    "post": {
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/Nope"}
                                }
                            }
                        },
                        "responses": {"201": {"description": "created"}}
                    }
                }
            }
        }))
        .unwrap();
        let config = Config::default();
        let suite = Assembler::new(&doc, &config).assemble();

        let case = &suite.cases[0];
        assert_eq!(case.payload, Value::Null);
        assert!(case.negatives.is_empty());
        assert!(!case.warnings.is_empty());
        assert!(suite.warning_count >= 2); // synthesis + profile both warn
    }

    #[test]
    fn plan_counts_match_assembly() {
        let doc = petstore();
        let config = Config::default();
        let assembler = Assembler::new(&doc, &config);

        let plan = assembler.plan();
        let suite = assembler.assemble();

        assert_eq!(plan.operations.len(), 2);
        let planned: u64 = plan.total_cases;
        let actual = suite.operations + suite.negative_count;
        assert_eq!(planned, actual);

        let post_plan = &plan.operations[1];
        assert_eq!(post_plan.operation, "POST /pets");
        assert_eq!(post_plan.negatives.missing_required, 1);
        assert_eq!(post_plan.negatives.wrong_type, 3);
        assert_eq!(post_plan.negatives.extra_field, 0);
        assert_eq!(post_plan.body_properties, ["name", "age", "tags"]);
    }

    #[test]
    fn swagger2_operation_assembles() {
        let doc = SpecDocument::from_value(json!({
            "swagger": "2.0",
            "paths": {
                "/orders": {
                    "post": {
                        "parameters": [{
                            "name": "order",
                            "in": "body",
                            "required": true,
                            "schema": {
                                "type": "object",
                                "required": ["quantity"],
                                "properties": {"quantity": {"type": "integer"}}
                            }
                        }],
                        "responses": {"200": {"description": "ok"}}
                    }
                }
            }
        }))
        .unwrap();
        let config = Config::default();
        let suite = Assembler::new(&doc, &config).assemble();

        let case = &suite.cases[0];
        assert_eq!(case.payload, json!({"quantity": 123}));
        assert_eq!(case.negatives.len(), 2); // missing quantity + wrong type
    }
}
