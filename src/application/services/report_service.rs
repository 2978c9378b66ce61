//! Export orchestration for the report dialog.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use super::csv_export::{MEMBERS_CSV_FILE, members_to_csv};
use super::report_layout::{ReportInput, ReportLayout};
use crate::domain::entities::{Member, Transaction};
use crate::domain::errors::ExportError;
use crate::domain::ports::{ClockPort, ExportSinkPort, ReportRendererPort};
use crate::domain::services::ReportFilter;

/// Default file name of the transaction history report.
pub const TRANSACTIONS_PDF_FILE: &str = "hello_club_transaction_history.pdf";

/// Produces CSV and PDF exports and hands them to the export sink.
#[derive(Clone)]
pub struct ReportService {
    layout: ReportLayout,
    renderer: Arc<dyn ReportRendererPort>,
    sink: Arc<dyn ExportSinkPort>,
    clock: Arc<dyn ClockPort>,
}

impl ReportService {
    /// Creates new report service.
    #[must_use]
    pub fn new(
        layout: ReportLayout,
        renderer: Arc<dyn ReportRendererPort>,
        sink: Arc<dyn ExportSinkPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            layout,
            renderer,
            sink,
            clock,
        }
    }

    /// Exports the member contact list.
    ///
    /// # Errors
    /// Returns error if encoding or saving fails.
    pub async fn export_members_csv(&self, members: &[Member]) -> Result<PathBuf, ExportError> {
        let bytes = members_to_csv(members)?;
        let path = self.sink.save(MEMBERS_CSV_FILE, bytes).await.map_err(|e| {
            warn!(error = %e, "Failed to save member CSV");
            e
        })?;
        info!(path = %path.display(), members = members.len(), "Exported member CSV");
        Ok(path)
    }

    /// Exports the filtered transaction history as PDF.
    ///
    /// # Errors
    /// Returns error if rendering or saving fails.
    pub async fn export_transactions_pdf(
        &self,
        members: &[Member],
        transactions: &[Transaction],
        filter: &ReportFilter,
    ) -> Result<PathBuf, ExportError> {
        let input = ReportInput {
            members,
            transactions: filter.apply(transactions),
            filter,
            now: self.clock.now(),
        };
        let shown = input.transactions.len();
        let document = self.layout.build(&input);
        let pages = document.pages.len();
        let bytes = self.renderer.render(&document)?;

        let path = self.sink.save(TRANSACTIONS_PDF_FILE, bytes).await.map_err(|e| {
            warn!(error = %e, "Failed to save transaction report");
            e
        })?;
        info!(
            path = %path.display(),
            transactions = shown,
            pages,
            "Exported transaction report"
        );
        Ok(path)
    }
}
