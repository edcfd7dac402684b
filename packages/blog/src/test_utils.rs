use crate::db::sqlite::SqliteDatabase;
use crate::db::Database;
use sqlx::{Any, Pool};
use std::path::PathBuf;
use uuid::Uuid;

/// A migrated, throwaway SQLite database. The file is removed on drop.
pub struct TestContext {
    pub pool: Pool<Any>,
    pub db_path: PathBuf,
}

impl TestContext {
    pub async fn new() -> Self {
        // Install sqlx drivers for Any pool
        sqlx::any::install_default_drivers();

        let db_path = std::env::temp_dir().join(format!("blog-test-{}.db", Uuid::new_v4()));

        let database = SqliteDatabase::connect(&db_path.to_string_lossy())
            .await
            .expect("Failed to create test database");

        database
            .run_migrations()
            .await
            .expect("Failed to run migrations");

        let pool = database.pool().await.clone();

        Self { pool, db_path }
    }

    pub fn db_path_str(&self) -> String {
        self.db_path.to_string_lossy().to_string()
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
        for suffix in ["-wal", "-shm"] {
            let mut side = self.db_path.clone().into_os_string();
            side.push(suffix);
            let _ = std::fs::remove_file(side);
        }
    }
}
