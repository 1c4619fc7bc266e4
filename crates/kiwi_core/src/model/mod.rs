//! Domain model for the task list, mood journal and suggestion flows.
//!
//! # Responsibility
//! - Define canonical records persisted by the stores.
//! - Own range/emptiness validation for user-provided values.
//!
//! # Invariants
//! - Every task is identified by a stable, unique `TaskId`.
//! - Priorities and mood scores are always within `1..=5` once constructed.
//! - Deletion is a hard delete; there are no tombstones.

pub mod mood;
pub mod suggestion;
pub mod task;
pub mod theme;
pub mod validation;
