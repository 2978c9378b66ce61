//! Derived membership status.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Membership status, derived from the end date and never stored on the member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberStatus {
    Active,
    Expired,
}

impl MemberStatus {
    /// Derives the status at `now`.
    ///
    /// No end date means the membership never lapses. A membership whose end
    /// instant equals `now` is still active.
    #[must_use]
    pub fn derive(end_date: Option<NaiveDate>, now: DateTime<Utc>) -> Self {
        match end_date {
            Some(end) if end_instant(end) < now => Self::Expired,
            _ => Self::Active,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Expired => "Expired",
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The instant a calendar end date refers to: midnight UTC of that day.
#[must_use]
pub fn end_instant(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_no_end_date_is_active() {
        let now = Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(MemberStatus::derive(None, now), MemberStatus::Active);
    }

    #[test]
    fn test_boundary_instant_is_active() {
        let end = date(2025, 3, 15);
        let now = end_instant(end);

        assert_eq!(MemberStatus::derive(Some(end), now), MemberStatus::Active);
        assert_eq!(
            MemberStatus::derive(Some(end), now + Duration::nanoseconds(1)),
            MemberStatus::Expired
        );
        assert_eq!(
            MemberStatus::derive(Some(end), now - Duration::nanoseconds(1)),
            MemberStatus::Active
        );
    }

    #[test]
    fn test_past_end_date_is_expired() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            MemberStatus::derive(Some(date(2024, 6, 1)), now),
            MemberStatus::Expired
        );
        assert_eq!(
            MemberStatus::derive(Some(date(2026, 1, 1)), now),
            MemberStatus::Active
        );
    }
}
