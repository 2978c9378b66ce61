//! Report export port definitions.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::errors::ExportError;
use crate::domain::report::ReportDocument;

/// Port turning a laid-out report into document bytes.
pub trait ReportRendererPort: Send + Sync {
    /// Renders every page of the report.
    fn render(&self, report: &ReportDocument) -> Result<Vec<u8>, ExportError>;
}

/// Port delivering an exported file to the operator.
#[async_trait]
pub trait ExportSinkPort: Send + Sync {
    /// Saves the bytes under the given file name and returns where they went.
    async fn save(&self, file_name: &str, bytes: Vec<u8>) -> Result<PathBuf, ExportError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;

    /// Sink keeping saved files in memory.
    #[derive(Default)]
    pub struct MemorySink {
        files: Mutex<Vec<(String, Vec<u8>)>>,
    }

    impl MemorySink {
        /// Creates empty sink.
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns saved files.
        pub fn files(&self) -> Vec<(String, Vec<u8>)> {
            self.files.lock().clone()
        }
    }

    #[async_trait]
    impl ExportSinkPort for MemorySink {
        async fn save(&self, file_name: &str, bytes: Vec<u8>) -> Result<PathBuf, ExportError> {
            self.files.lock().push((file_name.to_string(), bytes));
            Ok(PathBuf::from(file_name))
        }
    }

    /// Renderer recording the page count instead of producing a PDF.
    pub struct PageCountRenderer;

    impl ReportRendererPort for PageCountRenderer {
        fn render(&self, report: &ReportDocument) -> Result<Vec<u8>, ExportError> {
            Ok(format!("pages={}", report.pages.len()).into_bytes())
        }
    }
}
