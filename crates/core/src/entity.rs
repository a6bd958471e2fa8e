//! Entity trait: things with a stable identity (order lines, salespersons).

/// Entity marker + minimal interface.
pub trait Entity {
    /// Identifier; its `Display` form is the lookup key used by outer layers.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether this entity is addressed by `key`.
    ///
    /// Identifiers arrive from the UI as strings or numbers, so matching is
    /// done on the rendered form: `7` and `"7"` address the same entity.
    fn is_addressed_by(&self, key: &str) -> bool {
        self.id().to_string() == key
    }
}
