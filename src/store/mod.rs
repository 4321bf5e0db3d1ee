//! Menu item storage.
//!
//! Two interchangeable backends sit behind [`ItemStore`]: an in-process list
//! ([`MemoryStore`]) and SQLite ([`crate::db::SqliteStore`]). The backend is
//! picked once at startup from configuration.

mod memory;
mod offer;
mod seed;

pub use memory::MemoryStore;
pub use offer::OfferBoard;
pub use seed::{seed_menu, starter_menu};

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::db::{init_database, SqliteStore};
use crate::errors::AppError;
use crate::models::{now_timestamp, MenuItem, MenuStats, NewMenuItem};
use crate::query::ItemFilter;

/// Which backend is serving menu items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    Memory,
    Database,
}

impl StoreMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreMode::Memory => "memory",
            StoreMode::Database => "database",
        }
    }
}

/// Persistence contract shared by both backends.
///
/// Listings are newest-first, except category listings which are sorted by
/// ascending price (ties newest-first). Only active items are ever listed.
#[async_trait]
pub trait ItemStore: Send + Sync {
    fn mode(&self) -> StoreMode;

    /// Store a candidate, assigning id and timestamps.
    async fn insert(&self, candidate: NewMenuItem) -> Result<MenuItem, AppError>;

    /// Active items visible through `filter`.
    async fn find_active(&self, filter: &ItemFilter) -> Result<Vec<MenuItem>, AppError>;

    /// Look up one item regardless of its active flag.
    async fn find_by_id(&self, id: &str) -> Result<Option<MenuItem>, AppError>;

    /// Mark an item inactive and refresh `updated_at`.
    async fn soft_delete(&self, id: &str) -> Result<MenuItem, AppError>;

    async fn aggregate_stats(&self) -> Result<MenuStats, AppError>;

    /// Number of stored records, inactive ones included.
    async fn count_all(&self) -> Result<i64, AppError>;

    /// Drop every record.
    async fn reset(&self) -> Result<(), AppError>;
}

/// Open the backend selected by `config`.
pub async fn open_store(config: &Config) -> Result<Arc<dyn ItemStore>, AppError> {
    match &config.database_url {
        Some(url) => {
            let pool = init_database(url).await?;
            Ok(Arc::new(SqliteStore::new(pool)))
        }
        None => Ok(Arc::new(MemoryStore::new())),
    }
}

/// Reject a candidate that breaks any stored-field bound.
pub(crate) fn check_schema(candidate: &NewMenuItem) -> Result<(), AppError> {
    let violations = candidate.schema_violations();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations))
    }
}

/// Aggregate already-filtered active items.
pub(crate) fn summarize<'a>(items: impl IntoIterator<Item = &'a MenuItem>) -> MenuStats {
    let mut total_items = 0i64;
    let mut price_sum = 0i64;
    let mut items_by_category = BTreeMap::new();

    for item in items {
        total_items += 1;
        price_sum += item.price;
        *items_by_category.entry(item.category).or_insert(0) += 1;
    }

    let average_price = if total_items > 0 {
        price_sum as f64 / total_items as f64
    } else {
        0.0
    };

    MenuStats {
        total_items,
        items_by_category,
        average_price,
        last_updated: now_timestamp(),
    }
}
