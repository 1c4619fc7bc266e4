//! Storage adapter: whole-collection JSON blobs in a key-value store.
//!
//! # Responsibility
//! - Define the `KvStore` get/set contract consumed by the stores.
//! - Provide SQLite-backed and in-memory implementations.
//! - Encode/decode collections, defaulting unreadable blobs to empty state.
//!
//! # Invariants
//! - A read failure never prevents startup; it yields an empty collection.
//! - A write failure is always reported to the caller.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod blob;
mod memory;
mod sqlite;

pub use blob::{load_collection, load_theme, save_collection, save_theme};
pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

/// Blob key holding the JSON array of tasks.
pub const TASKS_KEY: &str = "tasks";
/// Blob key holding the JSON array of mood log entries.
pub const MOOD_LOGS_KEY: &str = "moodLogs";
/// Key holding the raw theme name (`light` or `dark`).
pub const THEME_KEY: &str = "theme";

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage adapter failure.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Encode(serde_json::Error),
    /// Connection schema version does not match this binary.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode blob: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with open_db first"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::UninitializedConnection { .. } | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Key-value blob store contract.
pub trait KvStore {
    /// Returns the stored value, or `None` when the key was never set.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Replaces the stored value for `key`.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}
