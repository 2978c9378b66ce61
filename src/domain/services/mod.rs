//! Pure domain rules over members and transactions.

pub mod diff;
pub mod metrics;
pub mod report_filter;
pub mod validation;

pub use diff::{NO_CHANGES, summarize_changes};
pub use metrics::{RosterMetrics, search_members};
pub use report_filter::{ReportFilter, distinct_actions};
pub use validation::{FormContext, validate};
