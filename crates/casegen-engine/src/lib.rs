//! casegen-engine: spec loading, schema analysis, and test case assembly
//!
//! Loads an OpenAPI 3.x or Swagger 2.0 document, extracts its operations,
//! synthesizes a representative payload per request schema, and derives
//! deliberately invalid payload variants for negative testing.

pub mod assemble;
pub mod classify;
pub mod loader;
pub mod negative;
pub mod resolver;
pub mod spec;
pub mod synth;

pub use assemble::Assembler;
pub use classify::{Kind, classify};
pub use loader::{LoadError, SpecDocument, SpecVersion};
pub use negative::{NegativeDeriver, derive_negatives};
pub use resolver::{ResolveError, resolve};
pub use spec::{Operation, Parameter, extract_operations};
pub use synth::{synthesize, synthesize_with};
