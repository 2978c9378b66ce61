//! Unvalidated member input, as typed into the member form.

use super::member::{Member, MemberField, format_optional_date};

/// Raw form values. Text fields hold exactly what the operator typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberDraft {
    pub name: String,
    pub book_value: String,
    pub start_date: String,
    pub end_date: String,
    pub birth_date: String,
    pub email: String,
    pub mobile: String,
    pub address: String,
    pub gender: String,
    pub is_senior: bool,
    pub is_pwd: bool,
    pub id_type: String,
    pub id_number: String,
}

impl MemberDraft {
    /// Blank draft for a new member, with a zero book value.
    #[must_use]
    pub fn new() -> Self {
        Self {
            book_value: "0".to_string(),
            ..Self::default()
        }
    }

    /// Draft pre-filled from an existing member.
    #[must_use]
    pub fn from_member(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            book_value: member.book_value.normalize().to_string(),
            start_date: format_optional_date(member.start_date),
            end_date: format_optional_date(member.end_date),
            birth_date: format_optional_date(member.birth_date),
            email: member.email.clone(),
            mobile: member.mobile.clone(),
            address: member.address.clone(),
            gender: member.gender.clone(),
            is_senior: member.is_senior,
            is_pwd: member.is_pwd,
            id_type: member.id_type.clone(),
            id_number: member.id_number.clone(),
        }
    }

    /// Returns a text field, or `None` for the flag fields.
    #[must_use]
    pub fn text(&self, field: MemberField) -> Option<&str> {
        let value = match field {
            MemberField::Name => &self.name,
            MemberField::BookValue => &self.book_value,
            MemberField::StartDate => &self.start_date,
            MemberField::EndDate => &self.end_date,
            MemberField::BirthDate => &self.birth_date,
            MemberField::Email => &self.email,
            MemberField::Mobile => &self.mobile,
            MemberField::Address => &self.address,
            MemberField::Gender => &self.gender,
            MemberField::IdType => &self.id_type,
            MemberField::IdNumber => &self.id_number,
            MemberField::IsSenior | MemberField::IsPwd => return None,
        };
        Some(value.as_str())
    }

    /// Returns a mutable text field, or `None` for the flag fields.
    pub fn text_mut(&mut self, field: MemberField) -> Option<&mut String> {
        let value = match field {
            MemberField::Name => &mut self.name,
            MemberField::BookValue => &mut self.book_value,
            MemberField::StartDate => &mut self.start_date,
            MemberField::EndDate => &mut self.end_date,
            MemberField::BirthDate => &mut self.birth_date,
            MemberField::Email => &mut self.email,
            MemberField::Mobile => &mut self.mobile,
            MemberField::Address => &mut self.address,
            MemberField::Gender => &mut self.gender,
            MemberField::IdType => &mut self.id_type,
            MemberField::IdNumber => &mut self.id_number,
            MemberField::IsSenior | MemberField::IsPwd => return None,
        };
        Some(value)
    }

    /// Returns a flag field, or `None` for text fields.
    #[must_use]
    pub const fn flag(&self, field: MemberField) -> Option<bool> {
        match field {
            MemberField::IsSenior => Some(self.is_senior),
            MemberField::IsPwd => Some(self.is_pwd),
            _ => None,
        }
    }

    /// Flips a flag field; text fields are left alone.
    pub fn toggle(&mut self, field: MemberField) {
        match field {
            MemberField::IsSenior => self.is_senior = !self.is_senior,
            MemberField::IsPwd => self.is_pwd = !self.is_pwd,
            _ => {}
        }
    }
}
