//! Club member entity.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::status::MemberStatus;
use crate::domain::serde_utils::{self, DATE_FORMAT};

/// Store-assigned document identifier of a member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Wraps a document id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw document id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether the member has not been written to the store yet.
    #[must_use]
    pub fn is_unsaved(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Club membership record.
///
/// Field names follow the document schema of the `members` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Document id; not part of the stored fields.
    #[serde(skip)]
    pub id: MemberId,
    #[serde(default)]
    pub name: String,
    /// Lifetime book value, only ever increased by manual additions.
    #[serde(default, with = "serde_utils::lenient_decimal")]
    pub book_value: Decimal,
    #[serde(default, with = "serde_utils::optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "serde_utils::optional_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, with = "serde_utils::optional_date")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub is_senior: bool,
    #[serde(default, rename = "isPWD")]
    pub is_pwd: bool,
    #[serde(default)]
    pub id_type: String,
    #[serde(default)]
    pub id_number: String,
}

impl Member {
    /// Returns the membership status at the given instant.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> MemberStatus {
        MemberStatus::derive(self.end_date, now)
    }

    /// Returns the book value rounded for display, e.g. `150.50`.
    #[must_use]
    pub fn display_book_value(&self) -> String {
        format_amount(self.book_value)
    }

    /// Returns the value of a tracked field as it is shown and compared.
    #[must_use]
    pub fn field_value(&self, field: MemberField) -> String {
        match field {
            MemberField::Name => self.name.clone(),
            MemberField::BookValue => self.display_book_value(),
            MemberField::StartDate => format_optional_date(self.start_date),
            MemberField::EndDate => format_optional_date(self.end_date),
            MemberField::BirthDate => format_optional_date(self.birth_date),
            MemberField::Email => self.email.clone(),
            MemberField::Mobile => self.mobile.clone(),
            MemberField::Address => self.address.clone(),
            MemberField::Gender => self.gender.clone(),
            MemberField::IsSenior => yes_no(self.is_senior),
            MemberField::IsPwd => yes_no(self.is_pwd),
            MemberField::IdType => self.id_type.clone(),
            MemberField::IdNumber => self.id_number.clone(),
        }
    }

    /// Returns the member with the given id.
    #[must_use]
    pub fn with_id(mut self, id: MemberId) -> Self {
        self.id = id;
        self
    }
}

/// Editable member fields, in form and audit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberField {
    Name,
    BookValue,
    StartDate,
    EndDate,
    BirthDate,
    Email,
    Mobile,
    Address,
    Gender,
    IsSenior,
    IsPwd,
    IdType,
    IdNumber,
}

impl MemberField {
    /// Every field in display order.
    pub const ALL: [Self; 13] = [
        Self::Name,
        Self::BookValue,
        Self::StartDate,
        Self::EndDate,
        Self::BirthDate,
        Self::Email,
        Self::Mobile,
        Self::Address,
        Self::Gender,
        Self::IsSenior,
        Self::IsPwd,
        Self::IdType,
        Self::IdNumber,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::BookValue => "Lifetime Book Value",
            Self::StartDate => "Start Date",
            Self::EndDate => "End Date",
            Self::BirthDate => "Birth Date",
            Self::Email => "Email",
            Self::Mobile => "Mobile",
            Self::Address => "Address",
            Self::Gender => "Gender",
            Self::IsSenior => "Senior",
            Self::IsPwd => "PWD",
            Self::IdType => "ID Type",
            Self::IdNumber => "ID Number",
        }
    }

    /// Returns whether the field is a yes/no flag.
    #[must_use]
    pub const fn is_flag(self) -> bool {
        matches!(self, Self::IsSenior | Self::IsPwd)
    }

    /// Returns whether the field holds a `YYYY-MM-DD` date.
    #[must_use]
    pub const fn is_date(self) -> bool {
        matches!(self, Self::StartDate | Self::EndDate | Self::BirthDate)
    }
}

impl fmt::Display for MemberField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Formats a money amount with two decimals.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Formats an optional date, empty when absent.
#[must_use]
pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}
