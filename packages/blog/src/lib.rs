//! Blog posts whose title, summary and content are stored per locale, and the
//! post-load listener that activates the request's locale on every loaded post.
pub mod config;
pub mod listener;
pub mod locale;
pub mod request;
pub mod types;
pub mod validation;

#[cfg(feature = "server")]
pub mod db;

#[cfg(feature = "server")]
pub mod posts;

#[cfg(feature = "server")]
pub mod state;


#[cfg(feature = "server")]
pub mod test_utils;

pub use config::{AppConfig, AppMode, DatabaseConfig, LocaleConfig, LocaleConfigError};
pub use listener::{LocaleActivationListener, PostLoadListener};
pub use locale::{LocalizedField, DEFAULT_LOCALE};
pub use request::{CurrentRequest, RequestContext};
pub use types::{Comment, Entity, HasLocale, Post, User};
pub use validation::{ValidationErrors, Violation};

#[cfg(feature = "server")]
pub use posts::PostRepository;

#[cfg(feature = "server")]
pub use state::AppState;
