//! Export files written into a local directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::domain::errors::ExportError;
use crate::domain::ports::ExportSinkPort;

/// Writes exports atomically into a directory, optionally opening them.
pub struct FileExportSink {
    dir: Option<PathBuf>,
    open_after_save: bool,
}

impl FileExportSink {
    /// Creates a sink. Without a directory every save fails.
    #[must_use]
    pub const fn new(dir: Option<PathBuf>, open_after_save: bool) -> Self {
        Self {
            dir,
            open_after_save,
        }
    }

    fn write(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir)?;
        let target = dir.join(file_name);

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(bytes)?;
        temp.flush()?;
        temp.persist(&target).map_err(|e| ExportError::Io(e.error))?;

        Ok(target)
    }
}

#[async_trait]
impl ExportSinkPort for FileExportSink {
    async fn save(&self, file_name: &str, bytes: Vec<u8>) -> Result<PathBuf, ExportError> {
        let dir = self.dir.clone().ok_or(ExportError::NoExportDir)?;
        let name = file_name.to_string();

        let path = tokio::task::spawn_blocking(move || Self::write(&dir, &name, &bytes))
            .await
            .map_err(|e| ExportError::Io(std::io::Error::other(e)))??;

        info!(path = %path.display(), "Export saved");

        if self.open_after_save
            && let Err(e) = opener::open(&path)
        {
            warn!(error = %e, path = %path.display(), "Failed to open export");
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_writes_file() {
        let dir = tempdir().unwrap();
        let sink = FileExportSink::new(Some(dir.path().join("exports")), false);

        let path = sink.save("members.csv", b"Name\n".to_vec()).await.unwrap();

        assert_eq!(path, dir.path().join("exports").join("members.csv"));
        assert_eq!(std::fs::read(&path).unwrap(), b"Name\n");
    }

    #[tokio::test]
    async fn test_save_overwrites_existing() {
        let dir = tempdir().unwrap();
        let sink = FileExportSink::new(Some(dir.path().to_path_buf()), false);

        sink.save("r.pdf", b"old".to_vec()).await.unwrap();
        let path = sink.save("r.pdf", b"new".to_vec()).await.unwrap();

        assert_eq!(std::fs::read(path).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_missing_dir_fails() {
        let sink = FileExportSink::new(None, false);
        let result = sink.save("x.csv", Vec::new()).await;
        assert!(matches!(result, Err(ExportError::NoExportDir)));
    }
}
