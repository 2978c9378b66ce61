//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{
    AppConfig, AuthConfig, BrandingConfig, ExportConfig, FirestoreConfig, LogLevel, StoreBackend,
    StoreConfig, UiConfig,
};
pub use args::CliArgs;
pub use storage::{ConfigError, ConfigFile};
