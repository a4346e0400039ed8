//! Suite exporters: JSON file, CSV file, Postman collection
//!
//! Exporters only serialize the assembler's output; they never re-derive
//! payloads or touch the spec document.

mod csv;
mod postman;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::case::TestSuite;

pub use csv::to_csv;
pub use postman::to_collection;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Postman,
}

impl ExportFormat {
    /// File name written inside the output directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Json => "test_cases.json",
            Self::Csv => "test_cases.csv",
            Self::Postman => "postman_collection.json",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Postman => "postman",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write the suite to `dir` in every requested format.
///
/// Returns the paths written, in format order.
///
/// # Errors
///
/// Returns error if the directory cannot be created or a file cannot be
/// written or serialized.
pub fn write_suite(
    suite: &TestSuite,
    dir: &Path,
    formats: &[ExportFormat],
    base_url: &str,
) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| ExportError::Io(format!("create {}: {e}", dir.display())))?;

    let mut written = Vec::new();
    for format in formats {
        let content = render(suite, *format, base_url)?;
        let path = dir.join(format.file_name());
        std::fs::write(&path, content)
            .map_err(|e| ExportError::Io(format!("write {}: {e}", path.display())))?;
        written.push(path);
    }
    Ok(written)
}

/// Render the suite in one format without touching the filesystem.
pub fn render(
    suite: &TestSuite,
    format: ExportFormat,
    base_url: &str,
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => {
            serde_json::to_string_pretty(suite).map_err(|e| ExportError::Serialize(e.to_string()))
        }
        ExportFormat::Csv => Ok(csv::to_csv(suite)),
        ExportFormat::Postman => serde_json::to_string_pretty(&postman::to_collection(
            suite, base_url,
        ))
        .map_err(|e| ExportError::Serialize(e.to_string())),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::{Assertion, TestCase};
    use serde_json::json;

    fn sample_suite() -> TestSuite {
        TestSuite::from_cases(vec![TestCase {
            path: "/users".to_string(),
            method: "POST".to_string(),
            summary: "Create a user".to_string(),
            parameters: vec![],
            parameter_values: serde_json::Value::Null,
            payload: json!({"name": "string_value"}),
            expected_status: 201,
            assertions: vec![Assertion::StatusCode { expected: 201 }],
            negatives: vec![],
            warnings: vec![],
        }])
    }

    #[test]
    fn write_suite_all_formats() {
        let dir = tempfile::tempdir().unwrap();
        let suite = sample_suite();
        let formats = [ExportFormat::Json, ExportFormat::Csv, ExportFormat::Postman];

        let written = write_suite(&suite, dir.path(), &formats, "http://localhost").unwrap();

        assert_eq!(written.len(), 3);
        assert!(dir.path().join("test_cases.json").exists());
        assert!(dir.path().join("test_cases.csv").exists());
        assert!(dir.path().join("postman_collection.json").exists());
    }

    #[test]
    fn json_export_roundtrips() {
        let suite = sample_suite();
        let content = render(&suite, ExportFormat::Json, "http://localhost").unwrap();
        let parsed: TestSuite = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, suite);
    }

    #[test]
    fn write_suite_empty_formats_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_suite(&sample_suite(), dir.path(), &[], "http://localhost").unwrap();
        assert!(written.is_empty());
    }

    #[test]
    fn format_serialization() {
        let json = serde_json::to_string(&ExportFormat::Postman).unwrap();
        assert_eq!(json, "\"postman\"");

        let parsed: ExportFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(parsed, ExportFormat::Csv);
    }
}
