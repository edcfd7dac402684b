use crate::config::{AppConfig, AppMode, DatabaseConfig};
use crate::db::{Database, PostgresDatabase, SqliteDatabase};
use crate::listener::LocaleActivationListener;
use crate::posts::PostRepository;
use crate::request::CurrentRequest;
use anyhow::Result;
use std::sync::Arc;

/// Services shared by every request handler.
pub struct AppState {
    pub posts: PostRepository,
    pub config: AppConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("posts", &self.posts)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create AppState from configuration
    ///
    /// Connects and migrates the database, seeds an empty local database, and
    /// registers the locale activation listener on the post repository.
    pub async fn from_config(config: AppConfig) -> Result<Self> {
        // Required for sqlx::Any pools; without this, AnyPoolOptions panics at runtime.
        sqlx::any::install_default_drivers();

        match config.mode {
            AppMode::Local => tracing::info!("App Mode: LOCAL"),
            AppMode::Production => tracing::info!("App Mode: PRODUCTION"),
        }
        tracing::info!(
            "   Locales: {} (default {})",
            config.locales.supported.join("|"),
            config.locales.default_locale
        );

        let db: Arc<dyn Database> = match &config.database {
            DatabaseConfig::PostgreSQL { url } => {
                tracing::info!("Connecting to PostgreSQL...");
                let postgres = PostgresDatabase::connect(url).await?;
                postgres.run_migrations().await?;
                tracing::info!("PostgreSQL connected and migrations applied");
                Arc::new(postgres)
            }
            DatabaseConfig::SQLite { path } => {
                tracing::info!("Connecting to SQLite: {}", path);
                let sqlite = SqliteDatabase::connect(path).await?;
                sqlite.run_migrations().await?;
                tracing::info!("SQLite connected and migrations applied");

                if config.mode == AppMode::Local && sqlite.seed_if_empty().await? {
                    tracing::info!("Database seeded with demo posts");
                }
                Arc::new(sqlite)
            }
        };

        let posts =
            PostRepository::new(db.pool().await.clone()).with_listener(LocaleActivationListener);

        Ok(Self { posts, config })
    }

    /// Request context for an incoming `Accept-Language` header.
    pub fn request_for(&self, accept_language: Option<&str>) -> CurrentRequest {
        CurrentRequest::negotiate(accept_language, &self.config.locales)
    }
}
