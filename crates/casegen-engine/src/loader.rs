//! Spec document loading and version normalization
//!
//! Accepts Swagger 2.0 and OpenAPI 3.x documents from a local file (JSON or
//! YAML), an http(s) URL, or an in-memory value. The rest of the engine
//! never looks at the version flag directly; the two conventions are
//! normalized during operation extraction.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

/// Detected spec dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecVersion {
    /// `swagger` key, `definitions` section, body-in-parameters
    Swagger2,
    /// `openapi` key, `components/schemas`, `requestBody`
    OpenApi3,
}

/// A loaded, parsed spec document.
#[derive(Debug, Clone)]
pub struct SpecDocument {
    root: Value,
    version: SpecVersion,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Cannot read {0}: {1}")]
    Io(PathBuf, String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Fetch error: {0}")]
    Fetch(String),
}

impl SpecDocument {
    /// Wrap an already-parsed document.
    ///
    /// # Errors
    ///
    /// Returns error if the root is not a JSON object.
    pub fn from_value(root: Value) -> Result<Self, LoadError> {
        if !root.is_object() {
            return Err(LoadError::Parse("spec document must be an object".into()));
        }
        let version = if root.get("openapi").is_some() {
            SpecVersion::OpenApi3
        } else {
            SpecVersion::Swagger2
        };
        Ok(Self { root, version })
    }

    /// Load from a local file. `.json` parses as JSON, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoadError::Io(path.to_path_buf(), e.to_string()))?;

        let root: Value = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| LoadError::Parse(e.to_string()))?
        } else {
            serde_yml::from_str(&content).map_err(|e| LoadError::Parse(e.to_string()))?
        };

        Self::from_value(root)
    }

    /// Fetch and parse from an http(s) URL.
    ///
    /// # Errors
    ///
    /// Returns error on network failure, non-success status, or bad JSON.
    pub fn from_url(url: &str) -> Result<Self, LoadError> {
        let response = reqwest::blocking::get(url)
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| LoadError::Fetch(e.to_string()))?;
        let root: Value = response.json().map_err(|e| LoadError::Fetch(e.to_string()))?;
        Self::from_value(root)
    }

    /// Load from a source string: URL when it has an http(s) prefix,
    /// local path otherwise.
    ///
    /// # Errors
    ///
    /// See [`Self::from_url`] and [`Self::from_path`].
    pub fn load(source: &str) -> Result<Self, LoadError> {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::from_url(source)
        } else {
            Self::from_path(Path::new(source))
        }
    }

    #[must_use]
    pub const fn root(&self) -> &Value {
        &self.root
    }

    #[must_use]
    pub const fn version(&self) -> SpecVersion {
        self.version
    }

    /// Derive the API's base URL from the spec.
    ///
    /// OpenAPI 3: first entry of `servers`. Swagger 2: `schemes`/`host`/
    /// `basePath` with http/localhost defaults.
    #[must_use]
    pub fn base_url(&self) -> String {
        match self.version {
            SpecVersion::OpenApi3 => self
                .root
                .get("servers")
                .and_then(|s| s.as_array())
                .and_then(|s| s.first())
                .and_then(|s| s.get("url"))
                .and_then(|u| u.as_str())
                .unwrap_or("http://localhost")
                .to_string(),
            SpecVersion::Swagger2 => {
                let scheme = self
                    .root
                    .get("schemes")
                    .and_then(|s| s.as_array())
                    .and_then(|s| s.first())
                    .and_then(|s| s.as_str())
                    .unwrap_or("http");
                let host = self
                    .root
                    .get("host")
                    .and_then(|h| h.as_str())
                    .unwrap_or("localhost");
                let base_path = self
                    .root
                    .get("basePath")
                    .and_then(|b| b.as_str())
                    .unwrap_or("");
                format!("{scheme}://{host}{base_path}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detect_openapi3() {
        let doc = SpecDocument::from_value(json!({"openapi": "3.0.0", "paths": {}})).unwrap();
        assert_eq!(doc.version(), SpecVersion::OpenApi3);
    }

    #[test]
    fn detect_swagger2() {
        let doc = SpecDocument::from_value(json!({"swagger": "2.0", "paths": {}})).unwrap();
        assert_eq!(doc.version(), SpecVersion::Swagger2);
    }

    #[test]
    fn non_object_root_rejected() {
        let err = SpecDocument::from_value(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn base_url_openapi3_servers() {
        let doc = SpecDocument::from_value(json!({
            "openapi": "3.0.0",
            "servers": [{"url": "https://api.example.com/v2"}],
            "paths": {}
        }))
        .unwrap();
        assert_eq!(doc.base_url(), "https://api.example.com/v2");
    }

    #[test]
    fn base_url_openapi3_default() {
        let doc = SpecDocument::from_value(json!({"openapi": "3.0.0", "paths": {}})).unwrap();
        assert_eq!(doc.base_url(), "http://localhost");
    }

    #[test]
    fn base_url_swagger2() {
        let doc = SpecDocument::from_value(json!({
            "swagger": "2.0",
            "schemes": ["https"],
            "host": "petstore.example.com",
            "basePath": "/v1",
            "paths": {}
        }))
        .unwrap();
        assert_eq!(doc.base_url(), "https://petstore.example.com/v1");
    }

    #[test]
    fn base_url_swagger2_defaults() {
        let doc = SpecDocument::from_value(json!({"swagger": "2.0", "paths": {}})).unwrap();
        assert_eq!(doc.base_url(), "http://localhost");
    }

    #[test]
    fn from_path_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spec.json");
        std::fs::write(&path, r#"{"openapi": "3.0.0", "paths": {}}"#).unwrap();

        let doc = SpecDocument::from_path(&path).unwrap();
        assert_eq!(doc.version(), SpecVersion::OpenApi3);
    }

    #[test]
    fn from_path_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spec.yaml");
        std::fs::write(&path, "swagger: \"2.0\"\npaths: {}\n").unwrap();

        let doc = SpecDocument::from_path(&path).unwrap();
        assert_eq!(doc.version(), SpecVersion::Swagger2);
        assert!(doc.root().get("paths").is_some());
    }

    #[test]
    fn from_path_missing_file() {
        let err = SpecDocument::from_path(Path::new("no-such-spec.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_, _)));
    }
}
