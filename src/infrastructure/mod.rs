//! Infrastructure layer with external service adapters.

/// Operator credential checks.
pub mod auth;
pub mod clock;
/// Application configuration.
pub mod config;
/// File exports and PDF rendering.
pub mod export;
/// Session marker storage adapters.
pub mod storage;
/// Document store adapters.
pub mod store;

pub use auth::{ConfigCredentialVerifier, hash_password};
pub use clock::SystemClock;
pub use config::{AppConfig, CliArgs, ConfigFile, LogLevel, StoreBackend};
pub use export::{FileExportSink, PdfRenderer};
pub use storage::{KeyringSessionStorage, MemorySessionStorage};
pub use store::{FirestoreStore, JsonFileStore, MemoryStore};
