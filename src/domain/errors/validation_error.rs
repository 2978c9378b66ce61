//! Field-level form validation errors.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::entities::MemberField;

/// Every violation found in a submitted form, keyed by field.
///
/// Only the first message recorded for a field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<MemberField, String>,
}

impl ValidationErrors {
    /// Creates an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message unless the field already has one.
    pub fn add(&mut self, field: MemberField, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    /// Drops the message for a field, e.g. once the operator edits it.
    pub fn remove(&mut self, field: MemberField) {
        self.errors.remove(&field);
    }

    /// Returns whether the field already has an error.
    #[must_use]
    pub fn has(&self, field: MemberField) -> bool {
        self.errors.contains_key(&field)
    }

    /// Returns the message recorded for a field.
    #[must_use]
    pub fn get(&self, field: MemberField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Returns whether no violation was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Fields with errors, in form order.
    pub fn fields(&self) -> impl Iterator<Item = MemberField> + '_ {
        self.errors.keys().copied()
    }

    /// Field and message pairs, in form order.
    pub fn iter(&self) -> impl Iterator<Item = (MemberField, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// Converts into `Ok(())` when empty.
    ///
    /// # Errors
    /// Returns `self` when any violation was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|(field, message)| format!("{}: {message}", field.label()))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}
