//! casegen-core: Core types and exporters for API test case generation
//!
//! This crate provides the fundamental types for representing generated API
//! test cases, negative variants, assertions, project configuration, and the
//! exporters that serialize a generated suite to JSON, CSV, or a Postman
//! collection.

pub mod case;
pub mod config;
pub mod export;
pub mod plan;
pub mod summary;

pub use case::{
    Assertion, NegativeCase, NegativeKind, ParamLocation, ParameterInfo, TestCase, TestSuite,
    generate_schema,
};
pub use config::{Config, ConfigError, PropertyPolicy, SummaryEngine};
pub use export::{ExportError, ExportFormat, write_suite};
pub use plan::{GenerationPlan, Validation, ValidationStatus, validate_config};
