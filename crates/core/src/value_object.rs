//! Value object trait: equality by value, not identity.
//!
//! An attribution is a value object: two attributions naming the same
//! salesperson with the same display data are interchangeable, whichever
//! line they sit on. Lines and salespersons are entities (see [`crate::Entity`]).

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new value and replace the old one wholesale.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct ImageRef(String);
///
/// impl ValueObject for ImageRef {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
