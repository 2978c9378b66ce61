//! Field-level change summaries for audit entries.

use crate::domain::entities::{Member, MemberField};

/// Summary recorded when an update changed nothing.
pub const NO_CHANGES: &str = "No changes";

/// Labels of the fields whose displayed value differs, in form order.
#[must_use]
pub fn changed_fields(old: &Member, new: &Member) -> Vec<MemberField> {
    MemberField::ALL
        .into_iter()
        .filter(|&field| old.field_value(field) != new.field_value(field))
        .collect()
}

/// Joins the changed labels with `", "`, or [`NO_CHANGES`].
#[must_use]
pub fn summarize_changes(old: &Member, new: &Member) -> String {
    let changed = changed_fields(old, new);
    if changed.is_empty() {
        return NO_CHANGES.to_string();
    }
    changed
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn member() -> Member {
        Member {
            name: "Ana".to_string(),
            book_value: Decimal::from(100),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            ..Member::default()
        }
    }

    #[test]
    fn test_identical_members() {
        assert_eq!(summarize_changes(&member(), &member()), NO_CHANGES);
    }

    #[test]
    fn test_labels_in_form_order() {
        let old = member();
        let new = Member {
            is_pwd: true,
            end_date: NaiveDate::from_ymd_opt(2026, 1, 1),
            book_value: Decimal::new(10000, 2),
            name: "Ana Cruz".to_string(),
            ..member()
        };

        assert_eq!(summarize_changes(&old, &new), "Name, End Date, PWD");
    }

    #[test]
    fn test_value_compared_as_displayed() {
        let new = Member {
            book_value: Decimal::new(1005, 1),
            ..member()
        };
        assert_eq!(summarize_changes(&member(), &new), "Lifetime Book Value");
    }
}
