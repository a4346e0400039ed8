//! Project configuration for test case generation

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::export::ExportFormat;

/// Project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Spec source: local file path (JSON or YAML) or http(s) URL
    pub spec: String,

    /// Base URL for the Postman collection; derived from the spec when unset
    #[serde(default)]
    pub base_url: Option<String>,

    /// Directory for exported files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Export formats to write
    #[serde(default = "default_formats")]
    pub formats: Vec<ExportFormat>,

    /// Which object properties the synthesizer includes
    #[serde(default)]
    pub property_policy: PropertyPolicy,

    /// Add an extra-field negative variant per operation
    #[serde(default)]
    pub extra_field: bool,

    /// Summary rendering engine
    #[serde(default)]
    pub engine: SummaryEngine,
}

/// Which object properties end up in synthesized payloads.
///
/// `All` is the default: maximal payloads surface unused-field handling in
/// the API under test. `RequiredOnly` restricts to the schema's `required`
/// list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyPolicy {
    #[default]
    All,
    RequiredOnly,
}

/// Summary rendering engine.
///
/// Only `basic` renders locally; the NLP engines are selectable so configs
/// carrying them keep parsing, but both fall back to the basic template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryEngine {
    #[default]
    Basic,
    LocalNlp,
    ExternalApi,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("test_cases")
}

fn default_formats() -> Vec<ExportFormat> {
    vec![ExportFormat::Json]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spec: "openapi.json".to_string(),
            base_url: None,
            output_dir: default_output_dir(),
            formats: default_formats(),
            property_policy: PropertyPolicy::All,
            extra_field: false,
            engine: SummaryEngine::Basic,
        }
    }
}

impl Config {
    /// Load config from file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e.to_string()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
        }
    }

    /// Load from default location (.casegen.toml)
    pub fn load_default() -> Result<Self, ConfigError> {
        let candidates = [".casegen.toml", ".casegen.json", "casegen.toml"];

        for name in candidates {
            let path = Path::new(name);
            if path.exists() {
                return Self::load(path);
            }
        }

        // No config file, return default
        Ok(Self::default())
    }

    /// Create example config file
    pub fn example() -> &'static str {
        r#"# casegen configuration

# Spec source: local file path (JSON or YAML) or http(s) URL
spec = "openapi.json"

# Base URL for the Postman collection (derived from the spec when unset)
# base_url = "http://localhost:8080"

# Directory for exported files
output_dir = "test_cases"

# Export formats: "json", "csv", "postman"
formats = ["json"]

# Object properties to synthesize: "all" or "required-only"
property_policy = "all"

# Add an extra-field negative variant per operation (default: false)
# extra_field = true

# Summary engine: "basic", "local-nlp", "external-api"
# (only "basic" renders locally; the others fall back to it)
engine = "basic"
"#
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read {0}: {1}")]
    Io(PathBuf, String),
    #[error("Parse error: {0}")]
    Parse(String),
}
