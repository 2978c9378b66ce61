//! Application services for exports.

pub mod csv_export;
pub mod report_layout;
pub mod report_service;

pub use csv_export::{MEMBERS_CSV_FILE, members_to_csv};
pub use report_layout::{ReportBranding, ReportLayout};
pub use report_service::{ReportService, TRANSACTIONS_PDF_FILE};
