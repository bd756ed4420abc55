//! Violation errors raised by the conformance checker.

use serde_json::Value;
use thiserror::Error;

/// Boxed error surfaced from a candidate class's own factory.
pub type FactoryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A violated rule of the immutable value-class convention.
///
/// The checker raises the first violation it encounters and never
/// aggregates. Per-sample variants tag their message with `[in object i]`
/// so a failure can be traced back to the sample that produced it.
#[derive(Debug, Error)]
pub enum ConformanceViolation {
    /// The sample sequence was empty.
    #[error("at least one plain-data sample is required")]
    NoSamples,

    /// The candidate class reported an empty name.
    #[error("candidate class has an empty name")]
    AnonymousClass,

    /// `property_descriptors` returned something other than a sequence.
    #[error("{class} property descriptors should be a sequence")]
    DescriptorsNotSequence { class: String },

    /// A property descriptor was not a plain mapping.
    #[error("{class} property descriptor {index} should be a mapping")]
    DescriptorNotMapping { class: String, index: usize },

    /// A property descriptor carried a key outside the recognized set.
    #[error("{class} property descriptor {index} has unrecognized key '{key}'")]
    UnrecognizedDescriptorKey {
        class: String,
        index: usize,
        key: String,
    },

    /// A property descriptor's `name` was missing or not text.
    #[error("{class} property descriptor {index} should have a textual name")]
    DescriptorNameNotText { class: String, index: usize },

    /// Plain data could not be encoded or decoded.
    #[error("{instance} plain-data codec failure [in object {index}]: {source}")]
    Codec {
        instance: String,
        index: usize,
        source: serde_json::Error,
    },

    /// The class's own factory failed where success was expected.
    #[error("{instance} from_plain failed [in object {index}]: {source}")]
    Factory {
        instance: String,
        index: usize,
        source: FactoryError,
    },

    /// The factory mutated the plain data it was given.
    #[error("{instance} from_plain mutated its input [in object {index}]")]
    MutatedInput { instance: String, index: usize },

    /// The instance rendered no text.
    #[error("{instance} rendered no text [in object {index}]")]
    BlankDisplay { instance: String, index: usize },

    /// `equals` accepted a comparand that is not an instance.
    #[error("{instance} equals accepted {comparand} [in object {index}]")]
    FalsePositiveEquals {
        instance: String,
        index: usize,
        comparand: &'static str,
    },

    /// `to_plain` did not reproduce the sample the instance was built from.
    #[error(
        "{instance} to_plain is not a fixed point [in object {index}]: \
         expected {expected}, got {actual}"
    )]
    FixedPoint {
        instance: String,
        index: usize,
        expected: Value,
        actual: Value,
    },

    /// Direct construction succeeded although the class is expected to
    /// reject value forms.
    #[error("{instance} direct construction should have failed [in object {index}]")]
    DirectConstructionSucceeded { instance: String, index: usize },

    /// Direct construction from a value form failed.
    #[error(
        "{instance} direct construction from its value form failed \
         [in object {index}]: {source}"
    )]
    DirectConstructionFailed {
        instance: String,
        index: usize,
        source: FactoryError,
    },

    /// A rebuilt instance did not compare equal to the original.
    #[error("{instance} rebuilt via {channel} is not equal to the original [in object {index}]")]
    RoundTripUnequal {
        instance: String,
        index: usize,
        channel: &'static str,
    },

    /// A rebuilt instance changed its plain form.
    #[error(
        "{instance} rebuilt via {channel} changed its plain form \
         [in object {index}]: expected {expected}, got {actual}"
    )]
    RoundTripPlainMismatch {
        instance: String,
        index: usize,
        channel: &'static str,
        expected: Value,
        actual: Value,
    },

    /// Two instances built from the same sample did not compare equal.
    #[error("{instance} instances built twice from sample {index} are not equal")]
    EqualityFalseNegative { instance: String, index: usize },

    /// Instances built from distinct samples compared equal.
    #[error("{instance} instances from samples {left} and {right} compare equal")]
    EqualityFalsePositive {
        instance: String,
        left: usize,
        right: usize,
    },
}

/// Result type for conformance operations.
pub type ConformanceResult<T> = Result<T, ConformanceViolation>;
