//! SQLite-backed item store.
//!
//! Uses prepared statements; filtering, ordering and aggregation happen in SQL
//! except for free-text search (see [`SqliteStore::find_active`]).

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{now_timestamp, Category, MenuItem, MenuStats, NewMenuItem};
use crate::query::ItemFilter;
use crate::store::{check_schema, ItemStore, StoreMode};

const ITEM_COLUMNS: &str = "id, name, description, price, category, discount, tags, rating, image, is_active, created_at, updated_at";

/// Database store for menu items.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_items(&self, sql: &str, bind: Option<&str>) -> Result<Vec<MenuItem>, AppError> {
        let mut query = sqlx::query(sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(item_from_row).collect()
    }
}

#[async_trait]
impl ItemStore for SqliteStore {
    fn mode(&self) -> StoreMode {
        StoreMode::Database
    }

    async fn insert(&self, candidate: NewMenuItem) -> Result<MenuItem, AppError> {
        check_schema(&candidate)?;

        let id = uuid::Uuid::new_v4().to_string();
        let now = now_timestamp();
        let tags_json = serde_json::to_string(&candidate.tags)?;

        sqlx::query(
            "INSERT INTO menu_items (id, name, description, price, category, discount, tags, rating, image, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?)"
        )
        .bind(&id)
        .bind(&candidate.name)
        .bind(&candidate.description)
        .bind(candidate.price)
        .bind(candidate.category.as_str())
        .bind(candidate.discount)
        .bind(&tags_json)
        .bind(candidate.rating)
        .bind(&candidate.image)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(candidate.into_menu_item(id, now))
    }

    async fn find_active(&self, filter: &ItemFilter) -> Result<Vec<MenuItem>, AppError> {
        match filter {
            ItemFilter::All => {
                let sql = format!(
                    "SELECT {ITEM_COLUMNS} FROM menu_items WHERE is_active = 1 ORDER BY seq DESC"
                );
                self.fetch_items(&sql, None).await
            }
            ItemFilter::Category(category) => {
                let sql = format!(
                    "SELECT {ITEM_COLUMNS} FROM menu_items WHERE is_active = 1 AND category = ? ORDER BY price ASC, seq DESC"
                );
                self.fetch_items(&sql, Some(category.as_str())).await
            }
            ItemFilter::Search(term) => {
                // SQLite's LIKE and lower() only fold ASCII, so the shared
                // predicate runs here to match the memory store exactly.
                let sql = format!(
                    "SELECT {ITEM_COLUMNS} FROM menu_items WHERE is_active = 1 ORDER BY seq DESC"
                );
                let items = self.fetch_items(&sql, None).await?;
                Ok(items.into_iter().filter(|item| term.matches(item)).collect())
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<MenuItem>, AppError> {
        let sql = format!("SELECT {ITEM_COLUMNS} FROM menu_items WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(item_from_row).transpose()
    }

    async fn soft_delete(&self, id: &str) -> Result<MenuItem, AppError> {
        let now = now_timestamp();
        let result = sqlx::query("UPDATE menu_items SET is_active = 0, updated_at = ? WHERE id = ?")
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Menu item {} not found", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Menu item {} not found", id)))
    }

    async fn aggregate_stats(&self) -> Result<MenuStats, AppError> {
        let totals = sqlx::query(
            "SELECT COUNT(*) AS total, COALESCE(AVG(price), 0.0) AS average FROM menu_items WHERE is_active = 1",
        )
        .fetch_one(&self.pool)
        .await?;

        let groups = sqlx::query(
            "SELECT category, COUNT(*) AS count FROM menu_items WHERE is_active = 1 GROUP BY category",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_category = std::collections::BTreeMap::new();
        for row in &groups {
            let raw: String = row.get("category");
            items_by_category.insert(parse_stored_category(&raw)?, row.get::<i64, _>("count"));
        }

        Ok(MenuStats {
            total_items: totals.get("total"),
            items_by_category,
            average_price: totals.get("average"),
            last_updated: now_timestamp(),
        })
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM menu_items")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("total"))
    }

    async fn reset(&self) -> Result<(), AppError> {
        sqlx::query("DELETE FROM menu_items")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// Helper functions for row conversion

fn item_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<MenuItem, AppError> {
    let category: String = row.get("category");
    let tags_str: String = row.get("tags");
    let is_active: i32 = row.get("is_active");

    Ok(MenuItem {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        price: row.get("price"),
        category: parse_stored_category(&category)?,
        discount: row.get("discount"),
        tags: parse_json_array(&tags_str)?,
        rating: row.get("rating"),
        image: row.get("image"),
        is_active: is_active != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn parse_stored_category(raw: &str) -> Result<Category, AppError> {
    Category::parse(raw).ok_or_else(|| AppError::Database(format!("Unknown stored category: {}", raw)))
}

fn parse_json_array(s: &str) -> Result<Vec<String>, AppError> {
    serde_json::from_str(s).map_err(|e| AppError::Database(format!("Corrupt stored tags {:?}: {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use crate::query::SearchTerm;
    use tempfile::TempDir;

    async fn store() -> (SqliteStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let url = format!("sqlite:{}", temp_dir.path().join("menu.sqlite").display());
        let pool = init_database(&url).await.expect("Failed to init DB");
        (SqliteStore::new(pool), temp_dir)
    }

    fn candidate(name: &str, category: Category, price: i64) -> NewMenuItem {
        NewMenuItem {
            name: name.to_string(),
            description: format!("{name} made to order"),
            price,
            category,
            discount: 0,
            tags: vec!["House".to_string()],
            rating: 4.5,
            image: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let (store, _dir) = store().await;
        let item = store
            .insert(candidate("Cold Brew", Category::ColdCoffee, 75_000))
            .await
            .unwrap();

        let found = store.find_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(found, item);
        assert_eq!(found.tags, vec!["House"]);
    }

    #[tokio::test]
    async fn test_ordering_matches_memory_contract() {
        let (store, _dir) = store().await;
        store.insert(candidate("Pricey", Category::Tea, 90_000)).await.unwrap();
        store.insert(candidate("Cheap", Category::Tea, 10_000)).await.unwrap();
        store.insert(candidate("Cake", Category::Dessert, 5_000)).await.unwrap();

        let all: Vec<_> = store
            .find_active(&ItemFilter::All)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(all, vec!["Cake", "Cheap", "Pricey"]);

        let tea: Vec<_> = store
            .find_active(&ItemFilter::Category(Category::Tea))
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(tea, vec!["Cheap", "Pricey"]);
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_case() {
        let (store, _dir) = store().await;
        store
            .insert(candidate("Émile's Latte", Category::HotCoffee, 65_000))
            .await
            .unwrap();

        let term = SearchTerm::parse(Some("émile")).unwrap();
        let found = store.find_active(&ItemFilter::Search(term)).await.unwrap();
        assert_eq!(found.len(), 1);

        let term = SearchTerm::parse(Some("house")).unwrap();
        let found = store.find_active(&ItemFilter::Search(term)).await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_soft_delete_and_stats() {
        let (store, _dir) = store().await;
        let a = store
            .insert(candidate("Latte", Category::HotCoffee, 60_000))
            .await
            .unwrap();
        store
            .insert(candidate("Masala", Category::Tea, 40_000))
            .await
            .unwrap();

        let stats = store.aggregate_stats().await.unwrap();
        assert_eq!(stats.total_items, 2);
        assert_eq!(stats.average_price, 50_000.0);

        let deleted = store.soft_delete(&a.id).await.unwrap();
        assert!(!deleted.is_active);

        let stats = store.aggregate_stats().await.unwrap();
        assert_eq!(stats.total_items, 1);
        assert_eq!(stats.average_price, 40_000.0);
        assert!(!stats.items_by_category.contains_key(&Category::HotCoffee));
        assert_eq!(store.count_all().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_empty_stats_average_is_zero() {
        let (store, _dir) = store().await;
        let stats = store.aggregate_stats().await.unwrap();
        assert_eq!(stats.total_items, 0);
        assert_eq!(stats.average_price, 0.0);
    }

    #[tokio::test]
    async fn test_soft_delete_unknown_id_is_not_found() {
        let (store, _dir) = store().await;
        let err = store.soft_delete("not-a-real-id").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_schema_violation_reports_all_fields() {
        let (store, _dir) = store().await;
        let mut bad = candidate("Latte", Category::HotCoffee, 60_000);
        bad.discount = 101;
        bad.rating = 0.5;

        let AppError::Validation(errors) = store.insert(bad).await.unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(store.count_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_check_constraints_translate_to_validation() {
        let (store, _dir) = store().await;
        let result = sqlx::query(
            "INSERT INTO menu_items (id, name, description, price, category, created_at, updated_at) VALUES ('x', 'Latte', 'Steamed milk latte', 5, 'tea', '', '')",
        )
        .execute(&store.pool)
        .await;

        let err: AppError = result.unwrap_err().into();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_corrupt_tags_surface_as_database_error() {
        let (store, _dir) = store().await;
        let item = store
            .insert(candidate("Mocha", Category::HotCoffee, 70_000))
            .await
            .unwrap();

        sqlx::query("UPDATE menu_items SET tags = 'not json' WHERE id = ?")
            .bind(&item.id)
            .execute(&store.pool)
            .await
            .unwrap();

        let err = store.find_by_id(&item.id).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert!(store.find_active(&ItemFilter::All).await.is_err());
    }
}
