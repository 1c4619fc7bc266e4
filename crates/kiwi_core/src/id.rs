//! Task id generation strategies.
//!
//! # Invariants
//! - A generator never returns the same id twice within its lifetime.

use std::cell::Cell;
use uuid::Uuid;

/// Source of fresh task ids, injected into `TaskStore`.
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

/// Random UUID v4 ids; the default for real sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Monotonic counter ids (`1`, `2`, ...), deterministic for tests.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: Cell<u64>,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: Cell::new(first),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let id = self.next.get();
        self.next.set(id + 1);
        id.to_string()
    }
}
