//! Identifier generation port.

use crate::task::domain::TaskId;

/// Source of fresh task identifiers.
///
/// Implementations must not repeat values; the store still rejects an id it
/// has already seen and asks again.
pub trait IdGenerator {
    /// Returns the next identifier.
    fn next_id(&self) -> TaskId;
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn next_id(&self) -> TaskId {
        (**self).next_id()
    }
}
