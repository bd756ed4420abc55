//! The capability surface of an immutable value class.

use std::any::Any;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Contract for immutable value classes: types that are built from plain
/// data, serialize back to plain data, and compare by logical value.
///
/// The checker in [`crate::checker`] verifies the behavioral half of this
/// contract; the structural half is carried by the trait itself. `Display`
/// stands in for textual coercion, `Serialize` exposes the instance's own
/// fields as a plain record for the anti-duck-typing probe, and
/// `PartialEq` backs the default [`equals`](ImmutableClass::equals).
///
/// Two forms of an instance exist besides the instance itself:
///
/// * the **plain form** ([`to_plain`](ImmutableClass::to_plain)), canonical
///   JSON-representable data that must round-trip through
///   [`from_plain`](ImmutableClass::from_plain) unchanged;
/// * the **value form** ([`value_form`](ImmutableClass::value_form)), a
///   primitive representation accepted by direct construction via
///   [`from_value_form`](ImmutableClass::from_value_form). An instance
///   never compares equal to its own value form.
pub trait ImmutableClass:
    fmt::Display + Serialize + PartialEq + Sized + 'static
{
    /// Primitive representation handed out by
    /// [`value_form`](ImmutableClass::value_form) and accepted back by
    /// direct construction.
    type ValueForm: Any;

    /// Error raised by the class's own factories.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build an instance from canonical plain data.
    ///
    /// `context` carries external reference data for classes whose samples
    /// cannot be resolved standalone. The factory must not mutate `plain`.
    fn from_plain(plain: &Value, context: Option<&Value>) -> Result<Self, Self::Error>;

    /// Build an instance directly from a value form.
    ///
    /// Classes that disallow direct construction return an error here and
    /// are checked with `new_throws` set.
    fn from_value_form(value: Self::ValueForm) -> Result<Self, Self::Error>;

    /// The value form of this instance.
    fn value_form(&self) -> Self::ValueForm;

    /// Canonical plain-data form. Must be a fixed point:
    /// `from_plain(sample)?.to_plain() == sample` for every valid sample.
    fn to_plain(&self) -> Value;

    /// Serialization form, normally identical in content to
    /// [`to_plain`](ImmutableClass::to_plain).
    fn to_json(&self) -> Value {
        self.to_plain()
    }

    /// Value equality against an arbitrary comparand, `None` modeling an
    /// absent value.
    ///
    /// Equality must be type-aware: anything that is not an instance of
    /// `Self` is rejected, including plain data that merely looks like one.
    /// The default downcasts and defers to `PartialEq`.
    fn equals(&self, other: Option<&dyn Any>) -> bool {
        other
            .and_then(|any| any.downcast_ref::<Self>())
            .is_some_and(|other| self == other)
    }

    /// Optional plain-data metadata describing the class's fields, a
    /// sequence of mappings keyed by
    /// [`RECOGNIZED_DESCRIPTOR_KEYS`](crate::types::RECOGNIZED_DESCRIPTOR_KEYS).
    ///
    /// `None` marks a legacy/simple class with no descriptor list; the
    /// descriptor check is skipped for those.
    fn property_descriptors() -> Option<Value> {
        None
    }

    /// Short class name used in violation messages.
    fn class_name() -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}
