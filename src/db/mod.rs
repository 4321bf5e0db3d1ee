//! Database module for SQLite persistence.
//!
//! Used when a database URL is configured; otherwise the memory store serves.

mod repository;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    // Ensure the parent directory exists
    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.ok();
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    // Run embedded migrations
    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // `seq` records insertion order; `id` is the public identity.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS menu_items (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL CHECK (length(name) BETWEEN 2 AND 100),
            description TEXT NOT NULL CHECK (length(description) BETWEEN 10 AND 500),
            price INTEGER NOT NULL CHECK (price BETWEEN 1000 AND 1000000),
            category TEXT NOT NULL
                CHECK (category IN ('hot-coffee', 'cold-coffee', 'tea', 'dessert', 'breakfast')),
            discount INTEGER NOT NULL DEFAULT 0 CHECK (discount BETWEEN 0 AND 100),
            tags TEXT NOT NULL DEFAULT '[]',
            rating REAL NOT NULL DEFAULT 4.5 CHECK (rating BETWEEN 1 AND 5),
            image TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes for common queries
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_menu_items_active ON menu_items(is_active);
        CREATE INDEX IF NOT EXISTS idx_menu_items_category ON menu_items(category);
        CREATE INDEX IF NOT EXISTS idx_menu_items_price ON menu_items(price);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
