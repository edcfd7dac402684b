use super::{seed, Database};
use anyhow::{Context, Result};
use sqlx::{Any, Pool};
use std::path::Path;

pub struct SqliteDatabase {
    pool: Pool<Any>,
}

impl SqliteDatabase {
    pub async fn connect(path: &str) -> Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .context("Failed to create database directory")?;
            }
        }

        let url = format!("sqlite:{}?mode=rwc", path);
        let pool = sqlx::any::AnyPoolOptions::new()
            .max_connections(1) // SQLite doesn't handle concurrent writes well
            .connect(&url)
            .await
            .context("Failed to connect to SQLite")?;

        Ok(Self { pool })
    }

    /// Seed demo content when the posts table is empty. Returns whether it did.
    pub async fn seed_if_empty(&self) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count posts")?;

        if count > 0 {
            return Ok(false);
        }

        tracing::info!("Database is empty, seeding with demo posts...");
        seed::seed_database(&self.pool).await?;
        Ok(true)
    }
}

#[async_trait::async_trait]
impl Database for SqliteDatabase {
    async fn pool(&self) -> &Pool<Any> {
        &self.pool
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run migrations")?;
        Ok(())
    }
}
