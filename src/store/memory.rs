//! In-process item store used when no database is configured.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{check_schema, summarize, ItemStore, StoreMode};
use crate::errors::AppError;
use crate::models::{now_timestamp, MenuItem, MenuStats, NewMenuItem};
use crate::query::ItemFilter;

/// Items kept in insertion order for the lifetime of the process.
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<Vec<MenuItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    fn mode(&self) -> StoreMode {
        StoreMode::Memory
    }

    async fn insert(&self, candidate: NewMenuItem) -> Result<MenuItem, AppError> {
        check_schema(&candidate)?;

        let item = candidate.into_menu_item(uuid::Uuid::new_v4().to_string(), now_timestamp());
        self.items.write().await.push(item.clone());
        Ok(item)
    }

    async fn find_active(&self, filter: &ItemFilter) -> Result<Vec<MenuItem>, AppError> {
        let items = self.items.read().await;
        let mut found: Vec<MenuItem> = items
            .iter()
            .rev()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();

        if let ItemFilter::Category(_) = filter {
            // Stable sort keeps newest-first among equal prices.
            found.sort_by_key(|item| item.price);
        }

        Ok(found)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<MenuItem>, AppError> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    async fn soft_delete(&self, id: &str) -> Result<MenuItem, AppError> {
        let mut items = self.items.write().await;
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Menu item {} not found", id)))?;

        item.is_active = false;
        item.updated_at = now_timestamp();
        Ok(item.clone())
    }

    async fn aggregate_stats(&self) -> Result<MenuStats, AppError> {
        let items = self.items.read().await;
        Ok(summarize(items.iter().filter(|item| item.is_active)))
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        Ok(self.items.read().await.len() as i64)
    }

    async fn reset(&self) -> Result<(), AppError> {
        self.items.write().await.clear();
        Ok(())
    }
}
