//! Generation plan and config validation
//!
//! Describes what the generator *would* produce without writing any files.
//! Used for pre-flight validation and CI previews.

use serde::{Deserialize, Serialize};

use crate::Config;

// ── Plan types ──

/// Complete generation plan: operations, case counts, and config warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationPlan {
    /// Per-operation plan
    pub operations: Vec<OperationPlan>,
    /// Total test cases (positive + negative) that would be generated
    pub total_cases: u64,
    /// Config validation results
    pub validations: Vec<Validation>,
}

/// Plan for a single operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationPlan {
    /// Operation label, e.g. "POST /api/users"
    pub operation: String,
    /// HTTP method
    pub method: String,
    /// Path template
    pub path: String,
    /// Negative variant counts by kind
    pub negatives: NegativeCounts,
    /// Parameter names (path, query, header)
    pub parameters: Vec<String>,
    /// Request body property names
    pub body_properties: Vec<String>,
}

/// Negative variant counts by kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NegativeCounts {
    pub missing_required: u32,
    pub wrong_type: u32,
    pub extra_field: u32,
}

impl NegativeCounts {
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.missing_required + self.wrong_type + self.extra_field
    }
}

/// A validation check result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Validation {
    pub check: String,
    pub status: ValidationStatus,
    pub message: String,
}

/// Status of a validation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Ok,
    Warning,
    Error,
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

// ── Config validation ──

/// Validate config and produce validation results.
#[must_use]
pub fn validate_config(config: &Config) -> Vec<Validation> {
    let mut checks = Vec::new();

    // Spec source: URL or local file
    if config.spec.is_empty() {
        checks.push(Validation {
            check: "spec".into(),
            status: ValidationStatus::Error,
            message: "spec: not configured".into(),
        });
    } else if config.spec.starts_with("http://") || config.spec.starts_with("https://") {
        checks.push(Validation {
            check: "spec".into(),
            status: ValidationStatus::Ok,
            message: format!("spec: {} (remote)", config.spec),
        });
    } else if std::path::Path::new(&config.spec).exists() {
        checks.push(Validation {
            check: "spec".into(),
            status: ValidationStatus::Ok,
            message: format!("spec: {} (exists)", config.spec),
        });
    } else {
        checks.push(Validation {
            check: "spec".into(),
            status: ValidationStatus::Error,
            message: format!("spec: {} (not found)", config.spec),
        });
    }

    // Base URL override
    match &config.base_url {
        None => checks.push(Validation {
            check: "base_url".into(),
            status: ValidationStatus::Ok,
            message: "base_url: derived from spec".into(),
        }),
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            checks.push(Validation {
                check: "base_url".into(),
                status: ValidationStatus::Ok,
                message: format!("base_url: {url}"),
            });
        }
        Some(url) => checks.push(Validation {
            check: "base_url".into(),
            status: ValidationStatus::Warning,
            message: format!("base_url: {url} (missing http:// or https:// prefix)"),
        }),
    }

    // Export formats
    if config.formats.is_empty() {
        checks.push(Validation {
            check: "formats".into(),
            status: ValidationStatus::Warning,
            message: "formats: none configured, nothing will be exported".into(),
        });
    } else {
        let names: Vec<&str> = config.formats.iter().map(|f| f.as_str()).collect();
        checks.push(Validation {
            check: "formats".into(),
            status: ValidationStatus::Ok,
            message: format!("formats: {}", names.join(", ")),
        });
    }

    checks
}

// ── Display helpers ──

impl GenerationPlan {
    /// Format as human-readable terminal output.
    #[must_use]
    pub fn to_terminal(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "Plan: {} operations, {} cases\n",
            self.operations.len(),
            self.total_cases,
        ));

        for op in &self.operations {
            lines.push(format!(
                "{} (1 positive, {} negative):",
                op.operation,
                op.negatives.total(),
            ));
            lines.push(format!(
                "  Negatives: {} missing_required, {} wrong_type, {} extra_field",
                op.negatives.missing_required, op.negatives.wrong_type, op.negatives.extra_field,
            ));

            if !op.parameters.is_empty() {
                lines.push(format!("  Parameters: {}", op.parameters.join(", ")));
            }
            if !op.body_properties.is_empty() {
                lines.push(format!(
                    "  Body properties: {}",
                    op.body_properties.join(", ")
                ));
            }
            lines.push(String::new());
        }

        // Validations
        lines.push("Config validation:".into());
        for v in &self.validations {
            lines.push(format!("  [{}] {}", v.status, v.message));
        }

        lines.join("\n")
    }

    /// Returns true if any validation has Error status.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.validations
            .iter()
            .any(|v| v.status == ValidationStatus::Error)
    }

    /// Returns true if any validation has Warning status.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.validations
            .iter()
            .any(|v| v.status == ValidationStatus::Warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportFormat;

    #[test]
    fn validate_default_config_spec_missing() {
        // Default config points at openapi.json which does not exist here
        let checks = validate_config(&Config::default());
        let spec_check = checks.iter().find(|c| c.check == "spec").unwrap();
        assert_eq!(spec_check.status, ValidationStatus::Error);
    }

    #[test]
    fn validate_remote_spec_ok() {
        let cfg = Config {
            spec: "https://example.com/openapi.json".into(),
            ..Config::default()
        };
        let checks = validate_config(&cfg);
        let spec_check = checks.iter().find(|c| c.check == "spec").unwrap();
        assert_eq!(spec_check.status, ValidationStatus::Ok);
        assert!(spec_check.message.contains("remote"));
    }

    #[test]
    fn validate_bad_base_url() {
        let cfg = Config {
            base_url: Some("localhost:8080".into()),
            ..Config::default()
        };
        let checks = validate_config(&cfg);
        let url_check = checks.iter().find(|c| c.check == "base_url").unwrap();
        assert_eq!(url_check.status, ValidationStatus::Warning);
    }

    #[test]
    fn validate_empty_formats_warns() {
        let cfg = Config {
            formats: vec![],
            ..Config::default()
        };
        let checks = validate_config(&cfg);
        let fmt_check = checks.iter().find(|c| c.check == "formats").unwrap();
        assert_eq!(fmt_check.status, ValidationStatus::Warning);
    }

    #[test]
    fn validate_formats_listed() {
        let cfg = Config {
            formats: vec![ExportFormat::Json, ExportFormat::Postman],
            ..Config::default()
        };
        let checks = validate_config(&cfg);
        let fmt_check = checks.iter().find(|c| c.check == "formats").unwrap();
        assert_eq!(fmt_check.message, "formats: json, postman");
    }

    #[test]
    fn plan_terminal_output() {
        let plan = GenerationPlan {
            operations: vec![OperationPlan {
                operation: "POST /users".into(),
                method: "POST".into(),
                path: "/users".into(),
                negatives: NegativeCounts {
                    missing_required: 2,
                    wrong_type: 3,
                    extra_field: 1,
                },
                parameters: vec!["verbose".into()],
                body_properties: vec!["name".into(), "email".into()],
            }],
            total_cases: 7,
            validations: vec![Validation {
                check: "spec".into(),
                status: ValidationStatus::Ok,
                message: "spec: openapi.json (exists)".into(),
            }],
        };

        let text = plan.to_terminal();
        assert!(text.contains("1 operations, 7 cases"));
        assert!(text.contains("POST /users (1 positive, 6 negative)"));
        assert!(text.contains("2 missing_required, 3 wrong_type, 1 extra_field"));
        assert!(text.contains("Parameters: verbose"));
        assert!(text.contains("Body properties: name, email"));
        assert!(text.contains("[OK] spec: openapi.json (exists)"));
    }

    #[test]
    fn plan_has_errors() {
        let plan = GenerationPlan {
            operations: vec![],
            total_cases: 0,
            validations: vec![Validation {
                check: "spec".into(),
                status: ValidationStatus::Error,
                message: "not found".into(),
            }],
        };
        assert!(plan.has_errors());
        assert!(!plan.has_warnings());
    }
}
