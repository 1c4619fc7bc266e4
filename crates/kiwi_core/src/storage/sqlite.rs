//! SQLite implementation of the key-value blob store.

use super::{KvStore, StorageError, StorageResult};
use crate::db::migrations::{current_user_version, latest_version};
use rusqlite::{params, Connection, OptionalExtension};

const KV_TABLE: &str = "kv_store";

/// `kv_store` table adapter borrowing an opened connection.
///
/// Cheap to copy, so task and mood stores can share one connection.
#[derive(Debug, Clone, Copy)]
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` when `kv_store` is absent.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let actual_version = current_user_version(conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(StorageError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let exists: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [KV_TABLE],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(StorageError::MissingRequiredTable(KV_TABLE));
        }

        Ok(Self { conn })
    }
}

impl KvStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteKvStore;
    use crate::db::open_db_in_memory;
    use crate::storage::KvStore;

    #[test]
    fn set_overwrites_existing_value() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKvStore::try_new(&conn).unwrap();

        assert_eq!(store.get("theme").unwrap(), None);
        store.set("theme", "light").unwrap();
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
