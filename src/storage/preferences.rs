use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

use super::ensure_parent_dir;
use super::error::StorageError;

/// Key-value preference store backed by a single SQLite table.
///
/// Each value is one JSON blob for a whole entity or collection; callers pick
/// the key, `get`/`put` handle the (de)serialization.
pub struct Preferences {
    conn: Connection,
}

impl Preferences {
    /// Open (or create) a preference store at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        ensure_parent_dir(&path)?;
        let conn = Connection::open(path)?;
        let prefs = Self { conn };
        prefs.init_schema()?;
        Ok(prefs)
    }

    /// Open an in-memory store. Nothing survives the handle being dropped.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let prefs = Self { conn };
        prefs.init_schema()?;
        Ok(prefs)
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Read and deserialize the JSON blob stored under `key`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get_raw(key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Serialize `value` to JSON and store it under `key`, replacing any
    /// previous blob.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)?;
        self.put_raw(key, &json)
    }

    /// Raw string read, no deserialization.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Raw string write, no serialization.
    pub fn put_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO preferences (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Delete the blob stored under `key`.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM preferences WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_none() {
        let prefs = Preferences::in_memory().unwrap();
        let value: Option<Vec<String>> = prefs.get("nothing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn put_then_get_roundtrips() {
        let prefs = Preferences::in_memory().unwrap();
        let names = vec!["ada".to_string(), "grace".to_string()];
        prefs.put("names", &names).unwrap();

        let stored: Option<Vec<String>> = prefs.get("names").unwrap();
        assert_eq!(stored, Some(names));
    }

    #[test]
    fn put_replaces_previous_blob() {
        let prefs = Preferences::in_memory().unwrap();
        prefs.put("count", &1u32).unwrap();
        prefs.put("count", &2u32).unwrap();

        let stored: Option<u32> = prefs.get("count").unwrap();
        assert_eq!(stored, Some(2));
    }

    #[test]
    fn remove_deletes_the_blob() {
        let prefs = Preferences::in_memory().unwrap();
        prefs.put("gone", &"soon").unwrap();
        prefs.remove("gone").unwrap();

        let stored: Option<String> = prefs.get("gone").unwrap();
        assert!(stored.is_none());
    }

    #[test]
    fn corrupt_blob_is_a_serde_error() {
        let prefs = Preferences::in_memory().unwrap();
        prefs.put_raw("broken", "{not json").unwrap();

        let result: Result<Option<Vec<String>>, _> = prefs.get("broken");
        assert!(matches!(result, Err(StorageError::Serde(_))));
    }
}
