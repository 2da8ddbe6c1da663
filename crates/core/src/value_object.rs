//! Value object trait: equality by value, not identity.
//!
//! Permission codes and role identifiers are value objects: two tokens with the
//! same text are the same capability, wherever they were constructed.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. The trait
/// requires `Eq + Hash` on top of the usual `Clone + Debug` because every value
/// object in this workspace ends up as a set member or a map key.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// struct Role(String);
///
/// impl ValueObject for Role {}
/// ```
pub trait ValueObject: Clone + Eq + core::hash::Hash + core::fmt::Debug {}
