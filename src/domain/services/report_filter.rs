//! Transaction log filtering for the report dialog and PDF export.

use chrono::NaiveDate;

use crate::domain::entities::{Transaction, TransactionAction, TransactionStatus};
use crate::domain::serde_utils::DATE_FORMAT;

/// Optional predicates over the transaction log, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// Case-insensitive substring of the member name.
    pub name: Option<String>,
    pub status: Option<TransactionStatus>,
    pub action: Option<TransactionAction>,
    /// Lower bound on the start date; entries without one pass.
    pub date_from: Option<NaiveDate>,
    /// Upper bound on the end date; entries without one pass.
    pub date_to: Option<NaiveDate>,
}

impl ReportFilter {
    /// Filter that keeps everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn name_needle(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_lowercase)
    }

    /// Returns whether any predicate is set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.name_needle().is_some()
            || self.status.is_some()
            || self.action.is_some()
            || self.date_from.is_some()
            || self.date_to.is_some()
    }

    /// Returns whether a transaction passes every set predicate.
    #[must_use]
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(needle) = self.name_needle()
            && !transaction.name.to_lowercase().contains(&needle)
        {
            return false;
        }
        if self.status.is_some() && transaction.status != self.status {
            return false;
        }
        if let Some(action) = self.action
            && transaction.action != action
        {
            return false;
        }
        if let (Some(from), Some(start)) = (self.date_from, transaction.start_date)
            && start < from
        {
            return false;
        }
        if let (Some(to), Some(end)) = (self.date_to, transaction.end_date)
            && end > to
        {
            return false;
        }
        true
    }

    /// Keeps matching transactions in their original order.
    #[must_use]
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| self.matches(t)).collect()
    }

    /// Banner text listing the set predicates, e.g. `Name: "ana" | Status: Active`.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            parts.push(format!("Name: \"{name}\""));
        }
        if let Some(status) = self.status {
            parts.push(format!("Status: {status}"));
        }
        if let Some(action) = self.action {
            parts.push(format!("Action: {action}"));
        }
        if let Some(from) = self.date_from {
            parts.push(format!("From: {}", from.format(DATE_FORMAT)));
        }
        if let Some(to) = self.date_to {
            parts.push(format!("To: {}", to.format(DATE_FORMAT)));
        }
        parts.join(" | ")
    }
}

/// Actions present in the log, in declaration order.
#[must_use]
pub fn distinct_actions(transactions: &[Transaction]) -> Vec<TransactionAction> {
    let mut actions: Vec<TransactionAction> = Vec::new();
    for action in [
        TransactionAction::Added,
        TransactionAction::Updated,
        TransactionAction::Reactivated,
        TransactionAction::Deleted,
    ] {
        if transactions.iter().any(|t| t.action == action) {
            actions.push(action);
        }
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn tx(
        name: &str,
        action: TransactionAction,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Transaction {
        Transaction {
            name: name.to_string(),
            start_date: start,
            end_date: end,
            book_value: None,
            status: Some(TransactionStatus::Active),
            action,
            timestamp: String::new(),
            recorded_at: None,
            changes: None,
        }
    }

    fn log() -> Vec<Transaction> {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        vec![
            tx("Ana Cruz", TransactionAction::Added, date(2024, 1, 1), date(2024, 6, 1)),
            tx("Ben Reyes", TransactionAction::Updated, date(2024, 3, 1), date(2025, 3, 1)),
            tx("ana lim", TransactionAction::Reactivated, date(2025, 1, 1), date(2026, 1, 1)),
            Transaction::deletion("Ana Cruz", now),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let log = log();
        let filter = ReportFilter::new();

        assert!(!filter.is_active());
        assert_eq!(filter.apply(&log).len(), log.len());
        assert_eq!(filter.describe(), "");
    }

    #[test]
    fn test_name_substring_ignores_case() {
        let log = log();
        let filter = ReportFilter {
            name: Some("ANA".to_string()),
            ..ReportFilter::new()
        };

        assert_eq!(filter.apply(&log).len(), 3);
    }

    #[test]
    fn test_missing_dates_pass_bounds() {
        let log = log();
        let filter = ReportFilter {
            date_from: date(2024, 2, 1),
            date_to: date(2025, 12, 31),
            ..ReportFilter::new()
        };

        let names: Vec<_> = filter.apply(&log).iter().map(|t| t.name.clone()).collect();
        assert_eq!(names, vec!["Ben Reyes", "Ana Cruz"]);
    }

    #[test]
    fn test_conjunction_never_expands() {
        let log = log();
        let base = ReportFilter {
            status: Some(TransactionStatus::Active),
            ..ReportFilter::new()
        };
        let narrower = ReportFilter {
            action: Some(TransactionAction::Added),
            ..base.clone()
        };

        let wide = base.apply(&log).len();
        let narrow = narrower.apply(&log).len();
        assert!(narrow <= wide && wide <= log.len());
        assert_eq!(narrow, 1);
    }

    #[test]
    fn test_describe_lists_set_predicates() {
        let filter = ReportFilter {
            name: Some(" ana ".to_string()),
            status: Some(TransactionStatus::Active),
            date_to: date(2025, 1, 31),
            ..ReportFilter::new()
        };

        assert!(filter.is_active());
        assert_eq!(
            filter.describe(),
            "Name: \"ana\" | Status: Active | To: 2025-01-31"
        );
    }

    #[test]
    fn test_distinct_actions() {
        assert_eq!(
            distinct_actions(&log()),
            vec![
                TransactionAction::Added,
                TransactionAction::Updated,
                TransactionAction::Reactivated,
                TransactionAction::Deleted,
            ]
        );
        assert!(distinct_actions(&[]).is_empty());
    }
}
