//! Immutable value-class conformance testing.
//!
//! Verifies that a candidate type follows the immutable value-class
//! convention: construction from plain data, serialization back to plain
//! data, textual coercion, and type-aware value equality. A single call
//! inside a test suite replaces the pile of hand-written assertions such a
//! type would otherwise accumulate.
//!
//! # Checks
//!
//! | Phase | What is verified |
//! |-------|------------------|
//! | Preconditions | non-empty samples, usable class name |
//! | Surface | reference instance constructs and renders text |
//! | Descriptors | property metadata is a sequence of recognized mappings |
//! | Per sample | non-mutation, fixed point, anti-duck-typing equality, value-form and JSON round trips |
//! | Pairwise | instances equal exactly when their sample indices match |
//!
//! Checks run fail-fast: the first violation is raised as a
//! [`ConformanceViolation`] and nothing is aggregated or retried.
//!
//! # Quick Start
//!
//! ```rust
//! use std::fmt;
//!
//! use immutable_conformance::{check_immutable_conformance, CheckConfig, ImmutableClass};
//! use serde::Serialize;
//! use serde_json::{json, Value};
//!
//! #[derive(Debug, PartialEq, Serialize)]
//! struct Animal {
//!     name: String,
//! }
//!
//! impl fmt::Display for Animal {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "{}", self.name)
//!     }
//! }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("expected a text name")]
//! struct NotText;
//!
//! impl ImmutableClass for Animal {
//!     type ValueForm = String;
//!     type Error = NotText;
//!
//!     fn from_plain(plain: &Value, _context: Option<&Value>) -> Result<Self, NotText> {
//!         let name = plain.as_str().ok_or(NotText)?;
//!         Ok(Self { name: name.to_string() })
//!     }
//!
//!     fn from_value_form(name: String) -> Result<Self, NotText> {
//!         Ok(Self { name })
//!     }
//!
//!     fn value_form(&self) -> String {
//!         self.name.clone()
//!     }
//!
//!     fn to_plain(&self) -> Value {
//!         Value::String(self.name.clone())
//!     }
//! }
//!
//! let samples = vec![json!("Koala"), json!("Snake"), json!("Dog"), json!("Cat")];
//! check_immutable_conformance::<Animal>(&samples, &CheckConfig::default()).unwrap();
//! ```

pub mod checker;
pub mod class;
pub mod error;
pub mod types;

// Re-export the public surface at the crate root.
pub use checker::check_immutable_conformance;
pub use class::ImmutableClass;
pub use error::{ConformanceResult, ConformanceViolation, FactoryError};
pub use types::{CheckConfig, RECOGNIZED_DESCRIPTOR_KEYS};
