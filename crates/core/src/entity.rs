//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Treasury records (suppliers, cheques, expenses, revenue entries) are entities:
/// a rescheduled cheque is still the same cheque.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
