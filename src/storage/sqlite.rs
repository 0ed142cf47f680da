use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::models::{PricePoint, ProductSnapshot, WatchlistEntry, WatchlistId};
use crate::storage::{ProductStore, WatchlistStore};

/// Single-connection SQLite store backing both collections.
///
/// The connection mutex makes every operation atomic with respect to
/// concurrent requests; a reader never observes a half-written row.
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).context("Failed to open SQLite database")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub async fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS product_snapshots (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url TEXT NOT NULL,
                current_price REAL,
                captured_at TEXT NOT NULL,
                data TEXT NOT NULL
            )",
            [],
        )?;

        // History lookups filter by url
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_snapshot_url ON product_snapshots(url)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS watchlist (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url TEXT NOT NULL,
                short_name TEXT NOT NULL,
                extra TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS email_configs (
                url TEXT PRIMARY KEY,
                email TEXT NOT NULL
            )",
            [],
        )?;

        info!("Database migration completed");
        Ok(())
    }
}

#[async_trait]
impl ProductStore for SqliteStorage {
    async fn insert_snapshot(&self, snapshot: &ProductSnapshot) -> Result<i64> {
        let data = serde_json::to_string(snapshot).context("Failed to serialize snapshot")?;
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT INTO product_snapshots (url, current_price, captured_at, data)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                &snapshot.url,
                snapshot.current_price,
                snapshot.captured_at.to_rfc3339(),
                data
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    async fn price_history(&self, url: &str) -> Result<Vec<PricePoint>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            "SELECT current_price, captured_at FROM product_snapshots
             WHERE url = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![url], |row| {
                Ok((row.get::<_, Option<f64>>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(current_price, captured_at)| {
                let captured_at = DateTime::parse_from_rfc3339(&captured_at)
                    .context("Invalid timestamp in snapshot row")?
                    .with_timezone(&Utc);
                Ok(PricePoint {
                    current_price,
                    captured_at,
                })
            })
            .collect()
    }

    async fn set_email_for_url(&self, url: &str, email: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT INTO email_configs (url, email) VALUES (?1, ?2)
             ON CONFLICT(url) DO UPDATE SET email = excluded.email",
            params![url, email],
        )?;

        Ok(())
    }
}

#[async_trait]
impl WatchlistStore for SqliteStorage {
    async fn insert(&self, entry: &WatchlistEntry) -> Result<WatchlistId> {
        let extra =
            serde_json::to_string(&entry.extra).context("Failed to serialize entry fields")?;
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT INTO watchlist (url, short_name, extra) VALUES (?1, ?2, ?3)",
            params![&entry.url, &entry.short_name, extra],
        )?;

        Ok(WatchlistId(conn.last_insert_rowid()))
    }

    async fn list_all(&self) -> Result<Vec<WatchlistEntry>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt =
            conn.prepare("SELECT url, short_name, extra FROM watchlist ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(url, short_name, extra)| {
                let extra =
                    serde_json::from_str(&extra).context("Invalid extra fields in watchlist row")?;
                Ok(WatchlistEntry {
                    url,
                    short_name,
                    extra,
                })
            })
            .collect()
    }

    async fn update_by_id(&self, id: WatchlistId, entry: &WatchlistEntry) -> Result<bool> {
        let extra =
            serde_json::to_string(&entry.extra).context("Failed to serialize entry fields")?;
        let conn = self.conn.lock().unwrap();

        let updated = conn.execute(
            "UPDATE watchlist SET url = ?1, short_name = ?2, extra = ?3 WHERE id = ?4",
            params![&entry.url, &entry.short_name, extra, id.0],
        )?;

        Ok(updated == 1)
    }

    async fn delete_by_id(&self, id: WatchlistId) -> Result<bool> {
        let conn = self.conn.lock().unwrap();

        let deleted = conn.execute("DELETE FROM watchlist WHERE id = ?1", params![id.0])?;

        Ok(deleted == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IMAGES_NOT_FOUND;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    async fn open_storage() -> SqliteStorage {
        let storage = SqliteStorage::new(":memory:").await.unwrap();
        storage.migrate().await.unwrap();
        storage
    }

    fn snapshot(url: &str, price: Option<f64>) -> ProductSnapshot {
        ProductSnapshot {
            url: url.to_string(),
            description: "Acme Widget".to_string(),
            display_price: "1,299".to_string(),
            customer_ratings: "1,234 ratings".to_string(),
            review_count: "out of 5 stars".to_string(),
            image_urls: vec![IMAGES_NOT_FOUND.to_string()],
            specifications: HashMap::new(),
            current_price: price,
            captured_at: Utc::now(),
        }
    }

    fn entry(short_name: &str) -> WatchlistEntry {
        WatchlistEntry {
            url: "https://shop.example/widget".to_string(),
            short_name: short_name.to_string(),
            extra: serde_json::from_str(r#"{"note": "gift idea"}"#).unwrap(),
        }
    }

    #[tokio::test]
    async fn price_history_keeps_insertion_order() {
        let storage = open_storage().await;

        storage
            .insert_snapshot(&snapshot("https://shop.example/a", Some(100.0)))
            .await
            .unwrap();
        storage
            .insert_snapshot(&snapshot("https://shop.example/a", None))
            .await
            .unwrap();
        storage
            .insert_snapshot(&snapshot("https://shop.example/a", Some(95.0)))
            .await
            .unwrap();
        storage
            .insert_snapshot(&snapshot("https://shop.example/other", Some(1.0)))
            .await
            .unwrap();

        let history = storage.price_history("https://shop.example/a").await.unwrap();
        let prices: Vec<_> = history.iter().map(|p| p.current_price).collect();
        assert_eq!(prices, vec![Some(100.0), None, Some(95.0)]);
    }

    #[tokio::test]
    async fn watchlist_round_trip_omits_id() {
        let storage = open_storage().await;

        storage.insert(&entry("widget")).await.unwrap();
        let listed = storage.list_all().await.unwrap();

        assert_eq!(listed, vec![entry("widget")]);
        assert_eq!(listed[0].extra["note"], "gift idea");
    }

    #[tokio::test]
    async fn update_of_unknown_id_reports_failure_without_mutating() {
        let storage = open_storage().await;

        let id = storage.insert(&entry("widget")).await.unwrap();
        let updated = storage
            .update_by_id(WatchlistId(id.0 + 100), &entry("changed"))
            .await
            .unwrap();

        assert!(!updated);
        assert_eq!(storage.list_all().await.unwrap(), vec![entry("widget")]);
    }

    #[tokio::test]
    async fn update_and_delete_by_valid_id() {
        let storage = open_storage().await;

        let id = storage.insert(&entry("widget")).await.unwrap();
        assert!(storage.update_by_id(id, &entry("renamed")).await.unwrap());
        assert_eq!(storage.list_all().await.unwrap()[0].short_name, "renamed");

        assert!(storage.delete_by_id(id).await.unwrap());
        assert!(!storage.delete_by_id(id).await.unwrap());
        assert!(storage.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn email_upsert_replaces_previous_address() {
        let storage = open_storage().await;

        storage
            .set_email_for_url("https://shop.example/a", "one@example.com")
            .await
            .unwrap();
        storage
            .set_email_for_url("https://shop.example/a", "two@example.com")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn concurrent_insert_and_list_never_sees_partial_entry() {
        let storage = Arc::new(open_storage().await);

        let mut tasks = Vec::new();
        for i in 0..8 {
            let storage = storage.clone();
            tasks.push(tokio::spawn(async move {
                storage.insert(&entry(&format!("item-{}", i))).await.unwrap();
                for listed in storage.list_all().await.unwrap() {
                    assert!(listed.is_valid());
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(storage.list_all().await.unwrap().len(), 8);
    }
}
