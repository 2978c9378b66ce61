//! Append-only audit entries written alongside every member mutation.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::member::{Member, format_amount, format_optional_date};
use super::status::MemberStatus;
use crate::domain::serde_utils;

/// Human-readable timestamp layout, e.g. `1/5/2025, 3:04:05 PM`.
pub const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Kind of mutation an audit entry records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionAction {
    Added,
    Reactivated,
    Deleted,
    /// Also used for entries whose action tag is missing or unknown.
    #[default]
    #[serde(other)]
    Updated,
}

impl TransactionAction {
    /// Display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Updated => "Updated",
            Self::Reactivated => "Reactivated",
            Self::Deleted => "Deleted",
        }
    }

    /// Position in a member's lifecycle; breaks ties between entries
    /// recorded at the same instant.
    #[must_use]
    pub const fn lifecycle_rank(self) -> u8 {
        match self {
            Self::Added => 0,
            Self::Updated => 1,
            Self::Reactivated => 2,
            Self::Deleted => 3,
        }
    }
}

impl fmt::Display for TransactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Member status captured at the time of the mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Active,
    Expired,
    Deleted,
}

impl TransactionStatus {
    /// Display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Expired => "Expired",
            Self::Deleted => "Deleted",
        }
    }
}

impl From<MemberStatus> for TransactionStatus {
    fn from(status: MemberStatus) -> Self {
        match status {
            MemberStatus::Active => Self::Active,
            MemberStatus::Expired => Self::Expired,
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit entry. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub name: String,
    #[serde(default, with = "serde_utils::optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "serde_utils::optional_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, with = "serde_utils::lenient_decimal::option")]
    pub book_value: Option<Decimal>,
    #[serde(default)]
    pub status: Option<TransactionStatus>,
    #[serde(default)]
    pub action: TransactionAction,
    /// Local wall-clock time of the mutation, for display.
    #[serde(default)]
    pub timestamp: String,
    /// Exact instant of the mutation, for ordering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
    /// Labels of the fields an update changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,
}

impl Transaction {
    /// Snapshots a member for an add, update or reactivation.
    #[must_use]
    pub fn for_member(
        member: &Member,
        action: TransactionAction,
        now: DateTime<Utc>,
        changes: Option<String>,
    ) -> Self {
        Self {
            name: member.name.clone(),
            start_date: member.start_date,
            end_date: member.end_date,
            book_value: Some(member.book_value),
            status: Some(member.status_at(now).into()),
            action,
            timestamp: format_timestamp(now),
            recorded_at: Some(now),
            changes,
        }
    }

    /// Records the deletion of a member; only the name survives.
    #[must_use]
    pub fn deletion(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            start_date: None,
            end_date: None,
            book_value: None,
            status: Some(TransactionStatus::Deleted),
            action: TransactionAction::Deleted,
            timestamp: format_timestamp(now),
            recorded_at: Some(now),
            changes: None,
        }
    }

    /// Instant used to order the log, newest first.
    ///
    /// Entries without `recorded_at` fall back to parsing the display timestamp
    /// in local time.
    #[must_use]
    pub fn sort_key(&self) -> Option<DateTime<Utc>> {
        self.recorded_at.or_else(|| {
            NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT)
                .ok()
                .and_then(|naive| Local.from_local_datetime(&naive).earliest())
                .map(|local| local.with_timezone(&Utc))
        })
    }

    /// Start date for display, `—` when absent.
    #[must_use]
    pub fn display_start_date(&self) -> String {
        or_dash(format_optional_date(self.start_date))
    }

    /// End date for display, `—` when absent.
    #[must_use]
    pub fn display_end_date(&self) -> String {
        or_dash(format_optional_date(self.end_date))
    }

    /// Book value with two decimals; deletions show zero.
    #[must_use]
    pub fn display_book_value(&self) -> String {
        format_amount(self.book_value.unwrap_or(Decimal::ZERO))
    }

    /// Status label, `—` when absent.
    #[must_use]
    pub fn display_status(&self) -> &'static str {
        self.status.map_or("—", TransactionStatus::as_str)
    }
}

/// Sorts transactions newest first; entries without a usable time go last.
///
/// Entries at the same instant put the later lifecycle step first, then
/// order by name, so every refresh lists them the same way.
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| {
        b.sort_key()
            .cmp(&a.sort_key())
            .then_with(|| b.action.lifecycle_rank().cmp(&a.action.lifecycle_rank()))
            .then_with(|| a.name.cmp(&b.name))
    });
}

fn format_timestamp(now: DateTime<Utc>) -> String {
    now.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string()
}

fn or_dash(value: String) -> String {
    if value.is_empty() {
        "—".to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_snapshot_captures_status() {
        let member = Member {
            name: "Ana".to_string(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            book_value: Decimal::from(10),
            ..Member::default()
        };

        let tx = Transaction::for_member(&member, TransactionAction::Updated, now(), None);

        assert_eq!(tx.status, Some(TransactionStatus::Expired));
        assert_eq!(tx.book_value, Some(Decimal::from(10)));
        assert_eq!(tx.recorded_at, Some(now()));
    }

    #[test]
    fn test_deletion_shape() {
        let tx = Transaction::deletion("Ana", now());

        assert_eq!(tx.action, TransactionAction::Deleted);
        assert_eq!(tx.status, Some(TransactionStatus::Deleted));
        assert_eq!(tx.display_start_date(), "—");
        assert_eq!(tx.display_book_value(), "0.00");
    }

    #[test]
    fn test_decode_legacy_entry() {
        let doc = json!({
            "name": "Ben",
            "startDate": "—",
            "endDate": "—",
            "bookValue": "—",
            "status": "Deleted",
            "timestamp": "1/5/2025, 3:04:05 PM"
        });

        let tx: Transaction = serde_json::from_value(doc).unwrap();

        assert_eq!(tx.action, TransactionAction::Updated);
        assert_eq!(tx.book_value, None);
        assert!(tx.sort_key().is_some());
    }

    #[test]
    fn test_unknown_action_reads_as_updated() {
        let tx: Transaction =
            serde_json::from_value(json!({ "name": "C", "action": "Renamed" })).unwrap();
        assert_eq!(tx.action, TransactionAction::Updated);
    }

    #[test]
    fn test_sort_newest_first() {
        let older = Transaction::deletion("old", now());
        let newer = Transaction::deletion("new", now() + Duration::minutes(5));
        let mut list = vec![older, newer];

        sort_newest_first(&mut list);

        assert_eq!(list[0].name, "new");
        assert_eq!(list[1].name, "old");
    }

    #[test]
    fn test_same_instant_order_is_stable() {
        let ana = Member {
            name: "Ana".to_string(),
            ..Member::default()
        };
        let added = Transaction::for_member(&ana, TransactionAction::Added, now(), None);
        let deleted = Transaction::deletion("Ana", now());
        let other = Transaction::deletion("Ben", now());

        let mut forward = vec![added.clone(), deleted.clone(), other.clone()];
        let mut backward = vec![other, deleted, added];
        sort_newest_first(&mut forward);
        sort_newest_first(&mut backward);

        assert_eq!(forward, backward);
        assert_eq!(forward[0].action, TransactionAction::Deleted);
        assert_eq!(forward[0].name, "Ana");
        assert_eq!(forward[2].action, TransactionAction::Added);
    }

    #[test]
    fn test_legacy_entries_in_one_second_sort_by_lifecycle() {
        let legacy = |action: &str| -> Transaction {
            serde_json::from_value(json!({
                "name": "Cy",
                "action": action,
                "timestamp": "1/5/2025, 3:04:05 PM"
            }))
            .unwrap()
        };
        let mut list = vec![legacy("Added"), legacy("Reactivated"), legacy("Updated")];

        sort_newest_first(&mut list);

        let actions: Vec<_> = list.iter().map(|t| t.action).collect();
        assert_eq!(
            actions,
            vec![
                TransactionAction::Reactivated,
                TransactionAction::Updated,
                TransactionAction::Added
            ]
        );
    }
}
