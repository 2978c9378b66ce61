//! Report export error types.

use thiserror::Error;

/// Export error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ExportError {
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to render PDF: {message}")]
    Pdf { message: String },

    #[error("no export directory is available")]
    NoExportDir,

    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Creates PDF rendering error.
    #[must_use]
    pub fn pdf(message: impl Into<String>) -> Self {
        Self::Pdf {
            message: message.into(),
        }
    }
}
