use anyhow::Result;
use async_trait::async_trait;

use crate::models::{PricePoint, ProductSnapshot, WatchlistEntry, WatchlistId};

mod sqlite;
pub use sqlite::SqliteStorage;

/// Gateway over the snapshot collection.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persist one assembled snapshot, returning its generated id.
    async fn insert_snapshot(&self, snapshot: &ProductSnapshot) -> Result<i64>;

    /// Price history for a URL, projected to two fields, in insertion order.
    async fn price_history(&self, url: &str) -> Result<Vec<PricePoint>>;

    /// Associate a notification email with a URL, replacing any previous one.
    async fn set_email_for_url(&self, url: &str, email: &str) -> Result<()>;
}

/// CRUD over the tracked-URL collection.
///
/// Update and delete return `Ok(false)` when the identifier matches no
/// stored entry; `Err` is reserved for hard storage failures.
#[async_trait]
pub trait WatchlistStore: Send + Sync {
    async fn insert(&self, entry: &WatchlistEntry) -> Result<WatchlistId>;
    async fn list_all(&self) -> Result<Vec<WatchlistEntry>>;
    async fn update_by_id(&self, id: WatchlistId, entry: &WatchlistEntry) -> Result<bool>;
    async fn delete_by_id(&self, id: WatchlistId) -> Result<bool>;
}
