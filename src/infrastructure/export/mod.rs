//! Export adapters.

mod file_sink;
mod pdf_renderer;

pub use file_sink::FileExportSink;
pub use pdf_renderer::PdfRenderer;
