//! In-memory stores, session facade and view projection.
//!
//! # Responsibility
//! - Own the task and mood collections and their mutation contracts.
//! - Persist through the storage adapter after every successful mutation.
//! - Project store state into presentation-ready view models.
//!
//! # Invariants
//! - Validation happens before any mutation; rejected input is never persisted.
//! - Mutations on unknown ids are silent no-ops.

use crate::model::validation::ValidationError;
use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod mood_store;
pub mod projection;
pub mod task_store;
pub mod tracker;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store mutation failure.
#[derive(Debug)]
pub enum StoreError {
    /// Input rejected; nothing changed.
    Validation(ValidationError),
    /// In-memory state changed but the blob could not be written.
    Storage(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "failed to persist state: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}
