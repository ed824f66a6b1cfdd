//! Task identifier generators.

use crate::task::{domain::TaskId, ports::IdGenerator};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Generates random version 4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> TaskId {
        TaskId::new()
    }
}

/// Generates `00000000-0000-0000-0000-000000000001`, `...0002`, and so on.
///
/// Deterministic ids for tests and fixtures.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Starts the sequence at 1.
    #[must_use]
    pub const fn new() -> Self {
        Self::starting_at(1)
    }

    /// Starts the sequence at `first`.
    #[must_use]
    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> TaskId {
        let value = self.next.fetch_add(1, Ordering::Relaxed);
        TaskId::from_uuid(Uuid::from_u128(u128::from(value)))
    }
}
