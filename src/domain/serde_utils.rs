//! Serde utilities for store documents.
//!
//! Documents in the remote store were written by several clients over time, so
//! the decoders here accept every shape seen in the collections: book values
//! stored as strings or numbers, blank strings for absent dates, and the
//! `"—"` placeholders written on deletions.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;
use std::str::FromStr;

/// Calendar date format used by every date field in the store.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date, ignoring surrounding whitespace.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Parses a decimal the way the legacy store values were read: blank or
/// unparseable input yields `None`.
#[must_use]
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

struct LenientDecimalVisitor;

impl<'de> Visitor<'de> for LenientDecimalVisitor {
    type Value = Option<Decimal>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a decimal amount as string or number")
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(Decimal::from(value)))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(Decimal::from(value)))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Decimal::from_f64_retain(value).map(|d| d.normalize()))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(parse_decimal(value))
    }

    fn visit_bool<E>(self, _value: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }
}

/// Book values: serialized as a plain decimal string, decoded leniently with
/// anything unreadable counting as zero.
pub mod lenient_decimal {
    use super::{Decimal, Deserializer, LenientDecimalVisitor, Serializer};

    /// Serializes the amount as a decimal string.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.normalize().to_string())
    }

    /// Deserializes an amount from a string or number.
    ///
    /// # Errors
    ///
    /// Never fails on malformed amounts; only propagates deserializer errors.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(deserializer
            .deserialize_any(LenientDecimalVisitor)?
            .unwrap_or(Decimal::ZERO))
    }

    /// Optional amounts, absent when blank or a placeholder.
    pub mod option {
        use super::super::{Decimal, Deserializer, LenientDecimalVisitor, Serializer};

        /// Serializes a present amount as a string and an absent one as `""`.
        ///
        /// # Errors
        ///
        /// Returns an error if the serializer fails.
        pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(v) => super::serialize(v, serializer),
                None => serializer.serialize_str(""),
            }
        }

        /// Deserializes an optional amount.
        ///
        /// # Errors
        ///
        /// Only propagates deserializer errors.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(LenientDecimalVisitor)
        }
    }
}

/// Optional calendar dates stored as `YYYY-MM-DD`, with `""` meaning absent.
pub mod optional_date {
    use super::{DATE_FORMAT, Deserializer, NaiveDate, Serializer, Visitor, de, fmt, parse_date};

    /// Serializes the date, or `""` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    /// Deserializes a date; blanks, placeholders and nulls become `None`.
    ///
    /// # Errors
    ///
    /// Only propagates deserializer errors.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DateVisitor;

        impl<'de> Visitor<'de> for DateVisitor {
            type Value = Option<NaiveDate>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a YYYY-MM-DD date string")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(parse_date(value))
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }
        }

        deserializer.deserialize_any(DateVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize)]
    struct Sample {
        #[serde(default, with = "lenient_decimal")]
        amount: Decimal,
        #[serde(default, with = "lenient_decimal::option")]
        maybe_amount: Option<Decimal>,
        #[serde(default, with = "optional_date")]
        date: Option<NaiveDate>,
    }

    #[test]
    fn test_amount_from_string_and_number() {
        let a: Sample = serde_json::from_value(json!({ "amount": "150.50" })).unwrap();
        assert_eq!(a.amount, Decimal::new(15050, 2));

        let b: Sample = serde_json::from_value(json!({ "amount": 200 })).unwrap();
        assert_eq!(b.amount, Decimal::from(200));

        let c: Sample = serde_json::from_value(json!({ "amount": 12.5 })).unwrap();
        assert_eq!(c.amount, Decimal::new(125, 1));
    }

    #[test]
    fn test_unreadable_amount_is_zero() {
        let s: Sample = serde_json::from_value(json!({ "amount": "abc" })).unwrap();
        assert_eq!(s.amount, Decimal::ZERO);

        let s: Sample = serde_json::from_value(json!({ "amount": "" })).unwrap();
        assert_eq!(s.amount, Decimal::ZERO);
    }

    #[test]
    fn test_placeholder_fields_are_absent() {
        let s: Sample =
            serde_json::from_value(json!({ "maybe_amount": "—", "date": "—" })).unwrap();
        assert_eq!(s.maybe_amount, None);
        assert_eq!(s.date, None);
    }

    #[test]
    fn test_date_serializes_as_iso_or_blank() {
        let s = Sample {
            amount: Decimal::ZERO,
            maybe_amount: None,
            date: NaiveDate::from_ymd_opt(2024, 6, 1),
        };
        let value = serde_json::to_value(&s).unwrap();
        assert_eq!(value["date"], "2024-06-01");
        assert_eq!(value["maybe_amount"], "");
        assert_eq!(value["amount"], "0");
    }
}
