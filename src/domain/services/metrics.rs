//! Roster aggregates shown on the dashboard and in reports.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::entities::{Member, MemberStatus};

/// Number of members on the leaderboard.
pub const LEADERBOARD_SIZE: usize = 3;

/// Aggregates over the member list at one instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterMetrics {
    pub total: usize,
    pub active: usize,
    pub expired: usize,
    pub total_book_value: Decimal,
    pub average_book_value: Decimal,
    /// Top members by book value, ties broken by name.
    pub leaders: Vec<Member>,
}

impl RosterMetrics {
    #[must_use]
    pub fn compute(members: &[Member], now: DateTime<Utc>) -> Self {
        let total = members.len();
        let active = members
            .iter()
            .filter(|m| m.status_at(now) == MemberStatus::Active)
            .count();
        let total_book_value = members
            .iter()
            .fold(Decimal::ZERO, |acc, m| acc.saturating_add(m.book_value));
        let average_book_value = if total == 0 {
            Decimal::ZERO
        } else {
            (total_book_value / Decimal::from(total)).round_dp(2)
        };

        let mut leaders: Vec<Member> = members.to_vec();
        leaders.sort_by(|a, b| {
            b.book_value
                .cmp(&a.book_value)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        leaders.truncate(LEADERBOARD_SIZE);

        Self {
            total,
            active,
            expired: total - active,
            total_book_value,
            average_book_value,
            leaders,
        }
    }

    /// Share of active members in percent, 0 for an empty roster.
    #[must_use]
    pub fn active_rate(&self) -> f64 {
        percent(self.active, self.total)
    }

    /// Share of expired members in percent, 0 for an empty roster.
    #[must_use]
    pub fn expired_rate(&self) -> f64 {
        percent(self.expired, self.total)
    }
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// Members whose name contains the query, ignoring case. A blank query keeps all.
#[must_use]
pub fn search_members<'a>(members: &'a [Member], query: &str) -> Vec<&'a Member> {
    let needle = query.trim().to_lowercase();
    members
        .iter()
        .filter(|m| needle.is_empty() || m.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn member(name: &str, value: i64, end: Option<(i32, u32, u32)>) -> Member {
        Member {
            name: name.to_string(),
            book_value: Decimal::from(value),
            end_date: end.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            ..Member::default()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_counts_and_values() {
        let members = vec![
            member("Ana", 100, Some((2024, 6, 1))),
            member("Ben", 50, Some((2026, 1, 1))),
            member("Cy", 0, None),
            member("Di", 25, Some((2023, 1, 1))),
        ];

        let metrics = RosterMetrics::compute(&members, now());

        assert_eq!(metrics.total, 4);
        assert_eq!(metrics.active, 2);
        assert_eq!(metrics.expired, 2);
        assert_eq!(metrics.total_book_value, Decimal::from(175));
        assert_eq!(metrics.average_book_value, Decimal::new(4375, 2));
        assert!((metrics.active_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_leaders_tie_break_on_name() {
        let members = vec![
            member("Cy", 10, None),
            member("ben", 50, None),
            member("Ana", 50, None),
            member("Di", 5, None),
        ];

        let metrics = RosterMetrics::compute(&members, now());
        let names: Vec<_> = metrics.leaders.iter().map(|m| m.name.as_str()).collect();

        assert_eq!(names, vec!["Ana", "ben", "Cy"]);
    }

    #[test]
    fn test_total_saturates_instead_of_overflowing() {
        let rich = |name: &str| Member {
            name: name.to_string(),
            book_value: Decimal::MAX,
            ..Member::default()
        };

        let metrics = RosterMetrics::compute(&[rich("Ana"), rich("Ben")], now());

        assert_eq!(metrics.total_book_value, Decimal::MAX);
        assert!(metrics.average_book_value > Decimal::ZERO);
    }

    #[test]
    fn test_empty_roster() {
        let metrics = RosterMetrics::compute(&[], now());

        assert_eq!(metrics.average_book_value, Decimal::ZERO);
        assert!(metrics.expired_rate().abs() < f64::EPSILON);
        assert!(metrics.leaders.is_empty());
    }

    #[test]
    fn test_search_members() {
        let members = vec![member("Ana Cruz", 0, None), member("Ben", 0, None)];

        assert_eq!(search_members(&members, " CRUZ").len(), 1);
        assert_eq!(search_members(&members, "").len(), 2);
        assert!(search_members(&members, "zed").is_empty());
    }
}
