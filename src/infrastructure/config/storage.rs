use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::app_config::AppConfig;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration directory for this platform; pass --config")]
    NoConfigDir,
    #[error("config file io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),
}

impl ConfigError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// The TOML file holding [`AppConfig`].
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    /// `config.toml` in the platform config directory.
    ///
    /// # Errors
    /// Returns `ConfigError::NoConfigDir` if the platform has no config directory.
    pub fn default_location() -> Result<Self, ConfigError> {
        AppConfig::default_config_dir()
            .map(|dir| Self::in_dir(&dir))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// `config.toml` inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(CONFIG_FILE_NAME),
        }
    }

    /// An explicit file, as given with `--config`.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the configuration.
    ///
    /// A missing file is written out with defaults. A file that does not
    /// parse is left as is and defaults are returned.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, or the default file cannot be written.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "No config file, writing defaults");
            let config = AppConfig::default();
            self.save(&config)?;
            return Ok(config);
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| ConfigError::io(&self.path, e))?;
        match toml::from_str::<AppConfig>(&content) {
            Ok(config) => {
                debug!(path = %self.path.display(), "Loaded config");
                Ok(config)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Config file is malformed, using defaults"
                );
                Ok(AppConfig::default())
            }
        }
    }

    /// Writes the configuration, replacing the file atomically.
    ///
    /// # Errors
    /// Returns error if encoding or any file operation fails.
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(config)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| ConfigError::io(&dir, e))?;

        let mut staged =
            tempfile::NamedTempFile::new_in(&dir).map_err(|e| ConfigError::io(&dir, e))?;
        staged
            .write_all(content.as_bytes())
            .map_err(|e| ConfigError::io(staged.path(), e))?;
        staged
            .persist(&self.path)
            .map_err(|e| ConfigError::io(&self.path, e.error))?;
        Ok(())
    }
}
