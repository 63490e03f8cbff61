/// Local SQLite snapshot of the subscriptions list
///
/// One row per subscription, holding the JSON the API sent, plus a
/// single-row table recording when the snapshot was taken.
use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

use super::data::{Subscription, SubscriptionsList};
use crate::error::StoreError;

/// The Store keeps the last subscriptions list the API returned,
/// so the table has something to show before the first request finishes
/// (and at all when running offline).
pub struct Store {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl Store {
    /// Open (or create) the snapshot database at `path`
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        let store = Store { conn, db_path: Some(path.to_path_buf()) };
        store.init_schema()?;
        Ok(store)
    }

    /// Throwaway store, used when no data directory exists and in tests
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let store = Store { conn: Connection::open_in_memory()?, db_path: None };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        // One row per subscription, stored as the JSON the API sent
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS subscriptions (
                id              TEXT PRIMARY KEY,
                position        INTEGER NOT NULL,
                payload_json    TEXT NOT NULL
            )",
            [],
        )?;

        // Single-row table holding when the snapshot was taken
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS snapshot_meta (
                id              INTEGER PRIMARY KEY CHECK (id = 0),
                saved_at        INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.db_path.as_ref()
    }

    /// Replace the snapshot with `list`
    pub fn save_snapshot(&mut self, list: &SubscriptionsList, saved_at: DateTime<Utc>) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM subscriptions", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT OR REPLACE INTO subscriptions (id, position, payload_json) VALUES (?1, ?2, ?3)",
            )?;
            for (position, subscription) in list.subscriptions.iter().enumerate() {
                let payload = serde_json::to_string(subscription)?;
                insert.execute(params![&subscription.id, position as i64, payload])?;
            }
        }
        tx.execute(
            "INSERT OR REPLACE INTO snapshot_meta (id, saved_at) VALUES (0, ?1)",
            params![saved_at.timestamp()],
        )?;
        tx.commit()?;

        log::debug!("💾 Saved {} subscriptions to snapshot", list.subscriptions.len());
        Ok(())
    }

    /// Last saved snapshot and when it was taken, `None` if never saved
    pub fn load_snapshot(&self) -> Result<Option<(SubscriptionsList, DateTime<Utc>)>, StoreError> {
        let saved_at: Option<i64> = match self.conn.query_row(
            "SELECT saved_at FROM snapshot_meta WHERE id = 0",
            [],
            |row| row.get(0),
        ) {
            Ok(ts) => Some(ts),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(e.into()),
        };
        let Some(saved_at) = saved_at.and_then(|ts| Utc.timestamp_opt(ts, 0).single()) else {
            return Ok(None);
        };

        let mut stmt = self
            .conn
            .prepare("SELECT payload_json FROM subscriptions ORDER BY position ASC")?;
        let payloads = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut subscriptions = Vec::new();
        for payload in payloads {
            let subscription: Subscription = serde_json::from_str(&payload?)?;
            subscriptions.push(subscription);
        }

        Ok(Some((SubscriptionsList { subscriptions }, saved_at)))
    }

    /// Get a count of subscriptions in the snapshot
    pub fn subscription_count(&self) -> Result<i64, StoreError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM subscriptions", [], |row| row.get(0))?;
        Ok(count)
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str, label: &str) -> Subscription {
        Subscription {
            id: id.into(),
            address: format!("0x{}", id),
            color: "#00ff00".into(),
            label: label.into(),
            user_id: "u1".into(),
            subscription_type_id: "ethereum_txpool".into(),
            created_at: Utc.timestamp_opt(1_630_000_000, 0).single(),
        }
    }

    #[test]
    fn test_empty_store_has_no_snapshot() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.load_snapshot().unwrap().is_none());
        assert_eq!(store.subscription_count().unwrap(), 0);
    }

    #[test]
    fn test_snapshot_keeps_order_and_replaces_previous() {
        let mut store = Store::open_in_memory().unwrap();
        let saved_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

        let first = SubscriptionsList { subscriptions: vec![sample("b", "two"), sample("a", "one")] };
        store.save_snapshot(&first, saved_at).unwrap();
        let (loaded, at) = store.load_snapshot().unwrap().unwrap();
        assert_eq!(loaded, first);
        assert_eq!(at, saved_at);

        let second = SubscriptionsList { subscriptions: vec![sample("c", "three")] };
        store.save_snapshot(&second, saved_at).unwrap();
        assert_eq!(store.subscription_count().unwrap(), 1);
        assert_eq!(store.load_snapshot().unwrap().unwrap().0, second);
    }

    #[test]
    fn test_empty_list_is_still_a_snapshot() {
        let mut store = Store::open_in_memory().unwrap();
        store.save_snapshot(&SubscriptionsList::default(), Utc::now()).unwrap();
        let (loaded, _) = store.load_snapshot().unwrap().unwrap();
        assert!(loaded.subscriptions.is_empty());
    }
}
