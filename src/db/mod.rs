//! Database module - key/value storage for persisted records

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

/// Generic key/value store the tracker persists its records through
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Remove several keys as one unit
    fn remove_all(&mut self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}

/// SQLite-backed store
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).with_context(|| format!("failed to open {path}"))?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let db = Self { conn: Connection::open_in_memory()? };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }
}

impl KvStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .with_context(|| format!("failed to write record {key}"))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn remove_all(&mut self, keys: &[&str]) -> Result<()> {
        let tx = self.conn.transaction()?;
        for key in keys {
            tx.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        }
        tx.commit().context("failed to clear records")?;
        Ok(())
    }
}

/// Volatile store, nothing survives the process
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn remove_all(&mut self, keys: &[&str]) -> Result<()> {
        (**self).remove_all(keys)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_set_get_overwrite() {
        let mut db = Database::open_in_memory().unwrap();
        assert_eq!(db.get("workoutLogs").unwrap(), None);

        db.set("workoutLogs", "{}").unwrap();
        db.set("workoutLogs", r#"{"bench":[]}"#).unwrap();
        assert_eq!(db.get("workoutLogs").unwrap().as_deref(), Some(r#"{"bench":[]}"#));
    }

    #[test]
    fn test_sqlite_remove_all() {
        let mut db = Database::open_in_memory().unwrap();
        db.set("workoutLogs", "{}").unwrap();
        db.set("dailyStats", "{}").unwrap();
        db.set("other", "1").unwrap();

        db.remove_all(&["workoutLogs", "dailyStats"]).unwrap();
        assert_eq!(db.get("workoutLogs").unwrap(), None);
        assert_eq!(db.get("dailyStats").unwrap(), None);
        assert_eq!(db.get("other").unwrap().as_deref(), Some("1"));

        // Removing absent keys is fine
        db.remove_all(&["workoutLogs"]).unwrap();
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
