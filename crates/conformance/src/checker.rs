//! The conformance check pipeline.
//!
//! A linear battery of structural and behavioral assertions over a
//! candidate class and the instances it constructs from plain-data
//! samples. Checks run in a fixed order and the first violation wins;
//! there is no aggregation and no retry.

use std::any::Any;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::class::ImmutableClass;
use crate::error::{ConformanceResult, ConformanceViolation};
use crate::types::{instance_label, CheckConfig, RECOGNIZED_DESCRIPTOR_KEYS};

/// Round-trip channel names used in violation messages.
const VALUE_FORM_CHANNEL: &str = "its value form";
const JSON_CHANNEL: &str = "JSON";

/// Verify that `T` follows the immutable value-class convention for every
/// sample in `samples`.
///
/// Returns nothing on success and the first violated rule otherwise. One
/// call replaces the assertions a test suite would otherwise hand-write
/// for construction, serialization, coercion, and equality:
///
/// 1. samples are non-empty and the class has a usable name;
/// 2. a reference instance can be built from `samples[0]` and renders text;
/// 3. property descriptors, when present, are well-formed;
/// 4. per sample: the factory leaves its input untouched, the instance
///    renders text, rejects null/empty/look-alike comparands, reproduces
///    the sample from `to_plain`, and survives the value-form and JSON
///    round trips (under `new_throws`, direct construction must fail
///    instead);
/// 5. instances from samples `j` and `k` compare equal exactly when
///    `j == k`.
///
/// The last rule makes samples with equal plain data an invalid fixture:
/// a genuine duplicate pair compares equal at distinct indices and is
/// reported as an equality false positive.
pub fn check_immutable_conformance<T: ImmutableClass>(
    samples: &[Value],
    config: &CheckConfig,
) -> ConformanceResult<()> {
    if samples.is_empty() {
        return Err(ConformanceViolation::NoSamples);
    }
    let class = T::class_name();
    if class.is_empty() {
        return Err(ConformanceViolation::AnonymousClass);
    }
    let label = instance_label(class);
    let context = config.context.as_ref();

    debug!(
        class,
        samples = samples.len(),
        new_throws = config.new_throws,
        "conformance check started"
    );

    let reference = construct::<T>(&label, 0, &samples[0], context)?;
    ensure_renders_text(&label, 0, &reference)?;

    check_property_descriptors::<T>(class)?;

    for (index, sample) in samples.iter().enumerate() {
        check_sample::<T>(&label, index, sample, context, config.new_throws)?;
    }

    check_pairwise_equality::<T>(&label, samples, context)?;

    debug!(class, "conformance check passed");
    Ok(())
}

/// Build an instance through the class's plain-data factory, surfacing the
/// factory's own error on failure.
fn construct<T: ImmutableClass>(
    label: &str,
    index: usize,
    plain: &Value,
    context: Option<&Value>,
) -> ConformanceResult<T> {
    T::from_plain(plain, context).map_err(|source| ConformanceViolation::Factory {
        instance: label.to_string(),
        index,
        source: Box::new(source),
    })
}

fn ensure_renders_text<T: ImmutableClass>(
    label: &str,
    index: usize,
    instance: &T,
) -> ConformanceResult<()> {
    if instance.to_string().trim().is_empty() {
        return Err(ConformanceViolation::BlankDisplay {
            instance: label.to_string(),
            index,
        });
    }
    Ok(())
}

/// Validate descriptor metadata when the class exposes it. Classes without
/// descriptors are the legacy/simple style and skip this entirely.
fn check_property_descriptors<T: ImmutableClass>(class: &str) -> ConformanceResult<()> {
    let Some(descriptors) = T::property_descriptors() else {
        return Ok(());
    };
    debug!(class, "checking property descriptors");

    let Some(entries) = descriptors.as_array() else {
        return Err(ConformanceViolation::DescriptorsNotSequence {
            class: class.to_string(),
        });
    };
    for (index, entry) in entries.iter().enumerate() {
        let Some(mapping) = entry.as_object() else {
            return Err(ConformanceViolation::DescriptorNotMapping {
                class: class.to_string(),
                index,
            });
        };
        for key in mapping.keys() {
            if !RECOGNIZED_DESCRIPTOR_KEYS.contains(&key.as_str()) {
                return Err(ConformanceViolation::UnrecognizedDescriptorKey {
                    class: class.to_string(),
                    index,
                    key: key.clone(),
                });
            }
        }
        if !mapping.get("name").is_some_and(Value::is_string) {
            return Err(ConformanceViolation::DescriptorNameNotText {
                class: class.to_string(),
                index,
            });
        }
    }
    Ok(())
}

/// The per-sample battery, in contract order.
fn check_sample<T: ImmutableClass>(
    label: &str,
    index: usize,
    sample: &Value,
    context: Option<&Value>,
    new_throws: bool,
) -> ConformanceResult<()> {
    trace!(index, "checking sample");

    // Two reference-distinct copies, made before the factory runs, so the
    // original fixture value can never mask mutation of the argument.
    let encoded = encode(label, index, sample)?;
    let probe = decode(label, index, &encoded)?;
    let witness = decode(label, index, &encoded)?;

    let instance = construct::<T>(label, index, &probe, context)?;
    if probe != witness {
        return Err(ConformanceViolation::MutatedInput {
            instance: label.to_string(),
            index,
        });
    }

    ensure_renders_text(label, index, &instance)?;

    if instance.equals(None) {
        return Err(false_positive(label, index, "null"));
    }
    let empty = Value::Array(Vec::new());
    if instance.equals(Some(&empty as &dyn Any)) {
        return Err(false_positive(label, index, "an empty sequence"));
    }

    let actual = instance.to_plain();
    if actual != *sample {
        return Err(ConformanceViolation::FixedPoint {
            instance: label.to_string(),
            index,
            expected: sample.clone(),
            actual,
        });
    }

    let value_form = instance.value_form();
    if instance.equals(Some(&value_form as &dyn Any)) {
        return Err(false_positive(label, index, "its own value form"));
    }

    let snapshot = snapshot(label, index, &instance)?;
    if instance.equals(Some(&snapshot as &dyn Any)) {
        return Err(false_positive(label, index, "a structural snapshot of itself"));
    }

    check_direct_construction(label, index, &instance, value_form, new_throws)?;
    check_json_round_trip(label, index, &instance, context)
}

fn false_positive(label: &str, index: usize, comparand: &'static str) -> ConformanceViolation {
    ConformanceViolation::FalsePositiveEquals {
        instance: label.to_string(),
        index,
        comparand,
    }
}

/// Direct construction from the value form: expected to fail under
/// `new_throws`, expected to reproduce an equal instance otherwise.
fn check_direct_construction<T: ImmutableClass>(
    label: &str,
    index: usize,
    instance: &T,
    value_form: T::ValueForm,
    new_throws: bool,
) -> ConformanceResult<()> {
    if new_throws {
        if T::from_value_form(value_form).is_ok() {
            return Err(ConformanceViolation::DirectConstructionSucceeded {
                instance: label.to_string(),
                index,
            });
        }
        return Ok(());
    }

    let twin = T::from_value_form(value_form).map_err(|source| {
        ConformanceViolation::DirectConstructionFailed {
            instance: label.to_string(),
            index,
            source: Box::new(source),
        }
    })?;
    ensure_equal_twin(label, index, instance, &twin, VALUE_FORM_CHANNEL)
}

/// Serialize the instance, parse it back, and rebuild through the factory.
fn check_json_round_trip<T: ImmutableClass>(
    label: &str,
    index: usize,
    instance: &T,
    context: Option<&Value>,
) -> ConformanceResult<()> {
    let wire = encode(label, index, &instance.to_json())?;
    let parsed = decode(label, index, &wire)?;
    let twin = construct::<T>(label, index, &parsed, context)?;
    ensure_equal_twin(label, index, instance, &twin, JSON_CHANNEL)
}

fn ensure_equal_twin<T: ImmutableClass>(
    label: &str,
    index: usize,
    original: &T,
    twin: &T,
    channel: &'static str,
) -> ConformanceResult<()> {
    if !original.equals(Some(twin as &dyn Any)) {
        return Err(ConformanceViolation::RoundTripUnequal {
            instance: label.to_string(),
            index,
            channel,
        });
    }
    let expected = original.to_plain();
    let actual = twin.to_plain();
    if expected != actual {
        return Err(ConformanceViolation::RoundTripPlainMismatch {
            instance: label.to_string(),
            index,
            channel,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Exhaustive pairwise equality over the sample sequence: equal exactly on
/// the diagonal. O(n^2) by design, sample sets are small.
fn check_pairwise_equality<T: ImmutableClass>(
    label: &str,
    samples: &[Value],
    context: Option<&Value>,
) -> ConformanceResult<()> {
    debug!(samples = samples.len(), "checking pairwise equality");
    for left in 0..samples.len() {
        for right in left..samples.len() {
            let a = construct::<T>(label, left, &samples[left], context)?;
            let b = construct::<T>(label, right, &samples[right], context)?;
            let equal = a.equals(Some(&b as &dyn Any));
            if left == right && !equal {
                return Err(ConformanceViolation::EqualityFalseNegative {
                    instance: label.to_string(),
                    index: left,
                });
            }
            if left != right && equal {
                return Err(ConformanceViolation::EqualityFalsePositive {
                    instance: label.to_string(),
                    left,
                    right,
                });
            }
        }
    }
    Ok(())
}

fn encode<V: Serialize>(label: &str, index: usize, value: &V) -> ConformanceResult<String> {
    serde_json::to_string(value).map_err(|source| ConformanceViolation::Codec {
        instance: label.to_string(),
        index,
        source,
    })
}

fn decode(label: &str, index: usize, text: &str) -> ConformanceResult<Value> {
    serde_json::from_str(text).map_err(|source| ConformanceViolation::Codec {
        instance: label.to_string(),
        index,
        source,
    })
}

/// The instance's own fields as a plain record, for the anti-duck-typing
/// probe.
fn snapshot<T: ImmutableClass>(label: &str, index: usize, instance: &T) -> ConformanceResult<Value> {
    serde_json::to_value(instance).map_err(|source| ConformanceViolation::Codec {
        instance: label.to_string(),
        index,
        source,
    })
}
