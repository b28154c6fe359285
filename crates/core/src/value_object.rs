//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. They represent
/// concepts where identity doesn't matter - only the values matter. A score
/// breakdown is a value object; a bid is an entity (same values, different id,
/// different bid).
///
/// To "modify" a value object, create a new one with the new values. This keeps
/// them safe to share across threads and safe to recompute: two evaluations of
/// the same snapshot produce equal values.
///
/// The trait requires:
/// - **Clone**: value objects should be cheap to copy
/// - **PartialEq**: compared by their attribute values
/// - **Debug**: debuggable (helpful for logging, testing)
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
