use anyhow::Result;
use sqlx::{Any, Pool};

pub mod postgres;
pub mod seed;
pub mod sqlite;

#[async_trait::async_trait]
pub trait Database: Send + Sync {
    async fn pool(&self) -> &Pool<Any>;

    async fn run_migrations(&self) -> Result<()>;
}

// Re-export implementations
pub use postgres::PostgresDatabase;
pub use sqlite::SqliteDatabase;
