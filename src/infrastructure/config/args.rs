use super::app_config::{LogLevel, StoreBackend};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "hello-club",
    version,
    about = "Membership roster, analytics and reporting for Hello Club",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Document store backend.
    #[arg(long, value_enum)]
    pub backend: Option<StoreBackend>,

    /// Directory of the JSON file store.
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Directory exports are written to.
    #[arg(long, value_name = "PATH")]
    pub export_dir: Option<PathBuf>,

    /// Operator username.
    #[arg(short, long)]
    pub username: Option<String>,

    /// Print the `auth.password_sha256` value for a password and exit.
    #[arg(long, value_name = "PASSWORD")]
    pub hash_password: Option<String>,
}
