//! Application configuration.

use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;
use crate::application::ReportBranding;

const APP_NAME: &str = "hello-club";
const APP_QUALIFIER: &str = "ph";
const APP_ORGANIZATION: &str = "islatel";

/// Env var overriding the Firestore API key.
pub const FIRESTORE_API_KEY_ENV: &str = "HELLO_CLUB_FIRESTORE_API_KEY";
/// Env var overriding the Firestore project id.
pub const FIRESTORE_PROJECT_ENV: &str = "HELLO_CLUB_FIRESTORE_PROJECT";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Where member and transaction documents live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StoreBackend {
    /// Cloud Firestore over REST.
    Firestore,
    /// One JSON file per collection in the data directory.
    #[default]
    JsonFile,
    /// Process memory; nothing survives a restart.
    Memory,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Firestore => write!(f, "firestore"),
            Self::JsonFile => write!(f, "json-file"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Operator account.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Document store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Export settings.
    #[serde(default)]
    pub export: ExportConfig,

    /// Report header and footer text.
    #[serde(default)]
    pub branding: BrandingConfig,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Operator account configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Operator username.
    #[serde(default = "default_username")]
    pub username: String,

    /// Lowercase hex SHA-256 digest of the operator password.
    #[serde(default)]
    pub password_sha256: Option<String>,

    /// Keep the session marker in the system keyring across restarts.
    #[serde(default)]
    pub remember_session: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password_sha256: None,
            remember_session: false,
        }
    }
}

/// Document store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend to use.
    #[serde(default)]
    pub backend: StoreBackend,

    /// Directory of the JSON file store.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Firestore settings.
    #[serde(default)]
    pub firestore: FirestoreConfig,
}

/// Firestore REST settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirestoreConfig {
    /// Google Cloud project id.
    #[serde(default)]
    pub project_id: Option<String>,

    /// Web API key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Database id.
    #[serde(default = "default_database")]
    pub database: String,

    /// REST endpoint root.
    #[serde(default = "default_firestore_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            api_key: None,
            database: default_database(),
            base_url: default_firestore_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Export configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exports are written to.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Open exported files with the system handler.
    #[serde(default)]
    pub open_exports: bool,
}

/// Report branding configuration. Missing keys keep the stock text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingConfig {
    pub organization: String,
    pub tagline: String,
    pub address: String,
    pub contact: String,
    pub program: String,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        let branding = ReportBranding::default();
        Self {
            organization: branding.organization,
            tagline: branding.tagline,
            address: branding.address,
            contact: branding.contact,
            program: branding.program,
        }
    }
}

impl From<&BrandingConfig> for ReportBranding {
    fn from(config: &BrandingConfig) -> Self {
        Self {
            organization: config.organization.clone(),
            tagline: config.tagline.clone(),
            address: config.address.clone(),
            contact: config.contact.clone(),
            program: config.program.clone(),
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Accent color (name or hex code).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,

    /// Seconds a status bar message stays visible.
    #[serde(default = "default_status_duration")]
    pub status_duration: u64,

    /// Enable mouse support.
    #[serde(default)]
    pub mouse: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            accent_color: default_accent_color(),
            status_duration: default_status_duration(),
            mouse: false,
        }
    }
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_database() -> String {
    "(default)".to_string()
}

fn default_firestore_url() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_accent_color() -> String {
    "Yellow".to_string()
}

const fn default_status_duration() -> u64 {
    5
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(backend) = args.backend {
            self.store.backend = backend;
        }
        if let Some(data_dir) = args.data_dir {
            self.store.data_dir = Some(data_dir);
        }
        if let Some(export_dir) = args.export_dir {
            self.export.dir = Some(export_dir);
        }
        if let Some(username) = args.username {
            self.auth.username = username;
        }
    }

    /// Applies Firestore overrides from the environment.
    pub fn merge_with_env(&mut self) {
        self.merge_with_lookup(|key| std::env::var(key).ok());
    }

    fn merge_with_lookup(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(api_key) = present(FIRESTORE_API_KEY_ENV) {
            self.store.firestore.api_key = Some(api_key);
        }
        if let Some(project) = present(FIRESTORE_PROJECT_ENV) {
            self.store.firestore.project_id = Some(project);
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().join("hello-club.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns the JSON store directory.
    #[must_use]
    pub fn effective_data_dir(&self) -> Option<PathBuf> {
        self.store
            .data_dir
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().join("store")))
    }

    /// Returns the export directory: configured, else downloads, else home.
    #[must_use]
    pub fn effective_export_dir(&self) -> Option<PathBuf> {
        self.export.dir.clone().or_else(|| {
            UserDirs::new().map(|dirs| {
                dirs.download_dir()
                    .map_or_else(|| dirs.home_dir().to_path_buf(), std::path::Path::to_path_buf)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_config_sections() {
        let toml_content = r#"
            log_level = "debug"

            [auth]
            username = "desk"
            password_sha256 = "abc"

            [store]
            backend = "firestore"

            [store.firestore]
            project_id = "hello-club"

            [export]
            open_exports = true

            [branding]
            program = "Sunrise Club"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.auth.username, "desk");
        assert_eq!(config.store.backend, StoreBackend::Firestore);
        assert_eq!(config.store.firestore.project_id.as_deref(), Some("hello-club"));
        assert_eq!(config.store.firestore.database, "(default)");
        assert!(config.export.open_exports);
        assert_eq!(config.branding.program, "Sunrise Club");
        assert_eq!(config.branding.organization, "THE FIRST ISLATEL");
        assert_eq!(config.ui.status_duration, 5);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.auth.username, "admin");
        assert!(config.auth.password_sha256.is_none());
        assert!(!config.auth.remember_session);
        assert_eq!(config.store.backend, StoreBackend::JsonFile);
        assert_eq!(config.branding.program, "Hello Club Membership");
    }

    #[test]
    fn test_cli_args_override_file() {
        let mut config = AppConfig::default();
        let args = CliArgs::parse_from([
            "hello-club",
            "--backend",
            "memory",
            "--username",
            "front-desk",
            "--export-dir",
            "/tmp/exports",
        ]);

        config.merge_with_args(args);

        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.auth.username, "front-desk");
        assert_eq!(config.effective_export_dir(), Some(PathBuf::from("/tmp/exports")));
    }

    #[test]
    fn test_env_overrides_firestore() {
        let mut config = AppConfig::default();
        config.store.firestore.api_key = Some("from-file".to_string());

        config.merge_with_lookup(|key| match key {
            FIRESTORE_API_KEY_ENV => Some("from-env".to_string()),
            FIRESTORE_PROJECT_ENV => Some("  ".to_string()),
            _ => None,
        });

        assert_eq!(config.store.firestore.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.store.firestore.project_id, None);
    }
}
