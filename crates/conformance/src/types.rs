//! Configuration and naming helpers for conformance checks.

use serde_json::Value;

/// Keys a property descriptor may carry, in canonical order.
///
/// Descriptors are plain-data metadata about a class's fields; any key
/// outside this set is a conformance violation.
pub const RECOGNIZED_DESCRIPTOR_KEYS: &[&str] = &[
    "name",
    "defaultValue",
    "possibleValues",
    "validate",
    "immutableClass",
    "immutableClassArray",
    "immutableClassLookup",
    "equal",
    "toJS",
    "type",
    "contextTransform",
    "preserveUndefined",
    "emptyArrayIsOk",
];

/// Configuration for a conformance check.
#[derive(Debug, Clone, Default)]
pub struct CheckConfig {
    /// Direct construction from a value form is expected to fail.
    pub new_throws: bool,
    /// Opaque reference data forwarded to every `from_plain` call, for
    /// classes that resolve samples against external lookup data.
    pub context: Option<Value>,
}

impl CheckConfig {
    /// Default configuration: direct construction succeeds, no context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration carrying context data.
    pub fn with_context(context: Value) -> Self {
        Self {
            context: Some(context),
            ..Self::default()
        }
    }
}

/// Lower-camel instance label derived from a class name, used in
/// per-instance violation messages ("Animal" becomes "animal").
pub(crate) fn instance_label(class: &str) -> String {
    let mut chars = class.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
