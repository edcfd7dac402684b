use crate::locale::DEFAULT_LOCALE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Local,
    Production,
}

impl AppMode {
    pub fn from_env() -> Self {
        match std::env::var("APP_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "local" => AppMode::Local,
            _ => AppMode::Production, // Default to production for safety
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    PostgreSQL { url: String },
    SQLite { path: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleConfigError {
    #[error("at least one supported locale is required")]
    NoLocales,

    #[error("default locale '{default_locale}' is not in the supported locales ({supported})")]
    UnsupportedDefault {
        default_locale: String,
        supported: String,
    },
}

/// Locales the site is translated into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    pub supported: Vec<String>,
    pub default_locale: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            supported: vec!["en".to_string(), "fr".to_string()],
            default_locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl LocaleConfig {
    /// Parse `"en|fr|de"`-style lists. Empty entries are dropped.
    pub fn parse(supported: &str, default_locale: &str) -> Result<Self, LocaleConfigError> {
        let supported: Vec<String> = supported
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if supported.is_empty() {
            return Err(LocaleConfigError::NoLocales);
        }
        let default_locale = default_locale.trim();
        if !supported.iter().any(|l| l == default_locale) {
            return Err(LocaleConfigError::UnsupportedDefault {
                default_locale: default_locale.to_string(),
                supported: supported.join("|"),
            });
        }

        Ok(Self {
            default_locale: default_locale.to_string(),
            supported,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub mode: AppMode,
    pub database: DatabaseConfig,
    pub locales: LocaleConfig,
}

#[cfg(feature = "server")]
impl AppConfig {
    /// Read configuration from the environment, loading `.env` if present.
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();

        let mode = AppMode::from_env();
        let database = match mode {
            AppMode::Local => DatabaseConfig::SQLite {
                path: std::env::var("DATABASE_PATH")
                    .unwrap_or_else(|_| ".dev/local.db".to_string()),
            },
            AppMode::Production => DatabaseConfig::PostgreSQL {
                url: std::env::var("DATABASE_URL").map_err(|_| {
                    anyhow::anyhow!("DATABASE_URL must be set in production mode")
                })?,
            },
        };

        let supported = std::env::var("APP_LOCALES").unwrap_or_else(|_| "en|fr".to_string());
        let default_locale =
            std::env::var("APP_DEFAULT_LOCALE").unwrap_or_else(|_| DEFAULT_LOCALE.to_string());
        let locales = LocaleConfig::parse(&supported, &default_locale)?;

        Ok(Self {
            mode,
            database,
            locales,
        })
    }
}
