//! Member form validation.

use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::domain::entities::{Member, MemberDraft, MemberField, MemberId};
use crate::domain::errors::ValidationErrors;
use crate::domain::serde_utils::{parse_date, parse_decimal};

pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const INVALID_MOBILE: &str = "Please enter a valid mobile number (10-11 digits)";
pub const DUPLICATE_NAME: &str = "A member with this name already exists";
pub const DUPLICATE_EMAIL: &str = "A member with this email already exists";
pub const INVALID_DATE: &str = "Please enter a date as YYYY-MM-DD";
pub const END_BEFORE_START: &str = "End date must be after start date";
pub const INVALID_AMOUNT: &str = "Please enter a valid amount";
pub const BOOK_VALUE_DECREASED: &str = "Book value can only be increased";

/// Largest book value a member may carry, in pesos.
const MAX_BOOK_VALUE_PESOS: i64 = 1_000_000_000_000_000;

/// Upper bound for a book value and for a single added amount.
#[must_use]
pub fn max_book_value() -> Decimal {
    Decimal::from(MAX_BOOK_VALUE_PESOS)
}

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"))
}

/// Situation a member form is submitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormContext {
    Create,
    Edit,
    /// New date range for an expired member.
    Reactivate,
    View,
}

impl FormContext {
    /// Fields that must not be blank.
    #[must_use]
    pub const fn required_fields(self) -> &'static [MemberField] {
        match self {
            Self::Create | Self::Edit => &[
                MemberField::Name,
                MemberField::StartDate,
                MemberField::EndDate,
                MemberField::Email,
                MemberField::Mobile,
            ],
            Self::Reactivate => &[MemberField::StartDate, MemberField::EndDate],
            Self::View => &[],
        }
    }

    /// Returns whether the form is read-only.
    #[must_use]
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::View)
    }

    /// Dialog title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Create => "Add Member",
            Self::Edit => "Edit Member",
            Self::Reactivate => "Reactivate Member",
            Self::View => "Member Details",
        }
    }
}

/// Runs every check for the context and collects all violations.
///
/// `others` is the current roster; the member being edited is skipped by id.
#[must_use]
pub fn check(
    draft: &MemberDraft,
    context: FormContext,
    others: &[Member],
    editing: Option<&MemberId>,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if context.is_read_only() {
        return errors;
    }

    for &field in context.required_fields() {
        if draft.text(field).is_none_or(|value| value.trim().is_empty()) {
            errors.add(field, format!("{} is required", field.label()));
        }
    }

    let email = draft.email.trim();
    if !email.is_empty() && !email_regex().is_match(email) {
        errors.add(MemberField::Email, INVALID_EMAIL);
    }

    if !draft.mobile.trim().is_empty() && !is_valid_mobile(&draft.mobile) {
        errors.add(MemberField::Mobile, INVALID_MOBILE);
    }

    let rivals = || {
        others
            .iter()
            .filter(move |m| editing.is_none_or(|id| &m.id != id))
    };
    let name_key = fold(&draft.name);
    if !name_key.is_empty() && rivals().any(|m| fold(&m.name) == name_key) {
        errors.add(MemberField::Name, DUPLICATE_NAME);
    }
    let email_key = fold(&draft.email);
    if !email_key.is_empty() && rivals().any(|m| fold(&m.email) == email_key) {
        errors.add(MemberField::Email, DUPLICATE_EMAIL);
    }

    for field in [
        MemberField::StartDate,
        MemberField::EndDate,
        MemberField::BirthDate,
    ] {
        let value = draft.text(field).unwrap_or_default().trim();
        if !value.is_empty() && parse_date(value).is_none() {
            errors.add(field, INVALID_DATE);
        }
    }

    if let (Some(start), Some(end)) = (parse_date(&draft.start_date), parse_date(&draft.end_date))
        && end <= start
    {
        errors.add(MemberField::EndDate, END_BEFORE_START);
    }

    if !draft.book_value.trim().is_empty() {
        match parse_decimal(&draft.book_value) {
            Some(value) if !value.is_sign_negative() && value <= max_book_value() => {}
            _ => errors.add(MemberField::BookValue, INVALID_AMOUNT),
        }
    }

    errors
}

/// Validates the draft and builds the member it describes.
///
/// # Errors
/// Returns every violation when any check fails.
pub fn validate(
    draft: &MemberDraft,
    context: FormContext,
    others: &[Member],
    editing: Option<&MemberId>,
) -> Result<Member, ValidationErrors> {
    check(draft, context, others, editing).into_result()?;
    Ok(build_member(draft, editing.cloned().unwrap_or_default()))
}

/// Builds a member from a draft that passed validation.
fn build_member(draft: &MemberDraft, id: MemberId) -> Member {
    Member {
        id,
        name: draft.name.trim().to_string(),
        book_value: parse_decimal(&draft.book_value).unwrap_or(Decimal::ZERO),
        start_date: parse_date(&draft.start_date),
        end_date: parse_date(&draft.end_date),
        birth_date: parse_date(&draft.birth_date),
        email: draft.email.trim().to_string(),
        mobile: draft.mobile.trim().to_string(),
        address: draft.address.trim().to_string(),
        gender: draft.gender.trim().to_string(),
        is_senior: draft.is_senior,
        is_pwd: draft.is_pwd,
        id_type: draft.id_type.trim().to_string(),
        id_number: draft.id_number.trim().to_string(),
    }
}

/// Mobile numbers count digits only; separators are ignored.
#[must_use]
pub fn is_valid_mobile(mobile: &str) -> bool {
    let digits = mobile.chars().filter(char::is_ascii_digit).count();
    (10..=11).contains(&digits)
}

fn fold(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use test_case::test_case;

    fn valid_draft() -> MemberDraft {
        MemberDraft {
            name: "Ana Cruz".to_string(),
            book_value: "150".to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-06-01".to_string(),
            email: "ana@example.com".to_string(),
            mobile: "0917-123-4567".to_string(),
            ..MemberDraft::new()
        }
    }

    fn existing(id: &str, name: &str, email: &str) -> Member {
        Member {
            id: MemberId::new(id),
            name: name.to_string(),
            email: email.to_string(),
            ..Member::default()
        }
    }

    #[test]
    fn test_valid_draft_builds_member() {
        let member = validate(&valid_draft(), FormContext::Create, &[], None).unwrap();

        assert_eq!(member.name, "Ana Cruz");
        assert_eq!(member.book_value, Decimal::from(150));
        assert_eq!(member.end_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert!(member.id.is_unsaved());
    }

    #[test]
    fn test_blank_required_fields_flag_exactly_those() {
        let draft = MemberDraft {
            name: "  ".to_string(),
            mobile: String::new(),
            address: String::new(),
            ..valid_draft()
        };

        let errors = check(&draft, FormContext::Create, &[], None);

        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(fields, vec![MemberField::Name, MemberField::Mobile]);
        assert_eq!(errors.get(MemberField::Name), Some("Name is required"));
    }

    #[test]
    fn test_reactivate_requires_only_dates() {
        let draft = MemberDraft {
            start_date: "2025-01-01".to_string(),
            end_date: "2026-01-01".to_string(),
            ..MemberDraft::new()
        };

        assert!(check(&draft, FormContext::Reactivate, &[], None).is_empty());
        assert!(!check(&MemberDraft::new(), FormContext::Reactivate, &[], None).is_empty());
    }

    #[test]
    fn test_view_skips_checks() {
        assert!(check(&MemberDraft::new(), FormContext::View, &[], None).is_empty());
    }

    #[test_case("ana@example.com", true ; "plain address")]
    #[test_case("ana@example", false ; "missing dot")]
    #[test_case("ana example@x.com", false ; "whitespace")]
    #[test_case("@example.com", false ; "missing local part")]
    fn test_email_shape(email: &str, ok: bool) {
        let draft = MemberDraft {
            email: email.to_string(),
            ..valid_draft()
        };
        let errors = check(&draft, FormContext::Create, &[], None);
        assert_eq!(!errors.has(MemberField::Email), ok);
    }

    #[test_case("09171234567", true ; "eleven digits")]
    #[test_case("(02) 8123-4567", true ; "ten digits with separators")]
    #[test_case("123456789", false ; "nine digits")]
    #[test_case("091712345678", false ; "twelve digits")]
    fn test_mobile_digit_count(mobile: &str, ok: bool) {
        assert_eq!(is_valid_mobile(mobile), ok);
    }

    #[test]
    fn test_duplicate_name_is_case_and_space_insensitive() {
        let roster = vec![existing("m1", "Ana Cruz", "other@example.com")];
        let draft = MemberDraft {
            name: "  ana CRUZ ".to_string(),
            ..valid_draft()
        };

        let errors = check(&draft, FormContext::Create, &roster, None);

        assert_eq!(errors.get(MemberField::Name), Some(DUPLICATE_NAME));
        assert!(!errors.has(MemberField::Email));
    }

    #[test]
    fn test_duplicate_check_skips_member_being_edited() {
        let roster = vec![
            existing("m1", "Ana Cruz", "ana@example.com"),
            existing("m2", "Ben Reyes", "ben@example.com"),
        ];
        let id = MemberId::new("m1");

        assert!(check(&valid_draft(), FormContext::Edit, &roster, Some(&id)).is_empty());

        let stolen = MemberDraft {
            email: "BEN@example.com".to_string(),
            ..valid_draft()
        };
        let errors = check(&stolen, FormContext::Edit, &roster, Some(&id));
        assert_eq!(errors.get(MemberField::Email), Some(DUPLICATE_EMAIL));
    }

    #[test]
    fn test_email_shape_error_wins_over_duplicate() {
        let roster = vec![existing("m1", "Other", "bad@mail")];
        let draft = MemberDraft {
            email: "bad@mail".to_string(),
            ..valid_draft()
        };

        let errors = check(&draft, FormContext::Create, &roster, None);
        assert_eq!(errors.get(MemberField::Email), Some(INVALID_EMAIL));
    }

    #[test_case("2024-06-01", "2024-06-01", false ; "same day")]
    #[test_case("2024-06-01", "2024-05-31", false ; "end before start")]
    #[test_case("2024-06-01", "2024-06-02", true ; "end after start")]
    fn test_end_after_start(start: &str, end: &str, ok: bool) {
        let draft = MemberDraft {
            start_date: start.to_string(),
            end_date: end.to_string(),
            ..valid_draft()
        };
        let errors = check(&draft, FormContext::Create, &[], None);
        assert_eq!(!errors.has(MemberField::EndDate), ok);
    }

    #[test]
    fn test_malformed_date_and_amount() {
        let draft = MemberDraft {
            birth_date: "01/02/1990".to_string(),
            book_value: "-5".to_string(),
            ..valid_draft()
        };

        let errors = check(&draft, FormContext::Create, &[], None);

        assert_eq!(errors.get(MemberField::BirthDate), Some(INVALID_DATE));
        assert_eq!(errors.get(MemberField::BookValue), Some(INVALID_AMOUNT));
    }

    #[test_case("1000000000000000", true ; "at the cap")]
    #[test_case("1000000000000000.01", false ; "just over the cap")]
    #[test_case("50000000000000000000000000000", false ; "near decimal range")]
    fn test_book_value_cap(value: &str, ok: bool) {
        let draft = MemberDraft {
            book_value: value.to_string(),
            ..valid_draft()
        };
        let errors = check(&draft, FormContext::Create, &[], None);
        assert_eq!(!errors.has(MemberField::BookValue), ok);
    }

    #[test]
    fn test_all_violations_reported_together() {
        let draft = MemberDraft {
            email: "nope".to_string(),
            mobile: "12".to_string(),
            end_date: "2023-01-01".to_string(),
            ..valid_draft()
        };

        let errors = check(&draft, FormContext::Create, &[], None);
        assert_eq!(errors.len(), 3);
    }
}
