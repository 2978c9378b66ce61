//! State of the member dialog form.

use rust_decimal::Decimal;

use crate::domain::entities::{Member, MemberDraft, MemberField, MemberId};
use crate::domain::errors::ValidationErrors;
use crate::domain::serde_utils::parse_decimal;
use crate::domain::services::FormContext;
use crate::domain::services::validation::{INVALID_AMOUNT, max_book_value};

/// Member dialog contents: what is being done, to whom, and what was typed.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberForm {
    pub context: FormContext,
    /// Member being edited, reactivated or viewed.
    pub editing: Option<MemberId>,
    pub draft: MemberDraft,
    /// Errors from the last submission.
    pub errors: ValidationErrors,
}

impl MemberForm {
    /// Blank form for a new member.
    #[must_use]
    pub fn create() -> Self {
        Self {
            context: FormContext::Create,
            editing: None,
            draft: MemberDraft::new(),
            errors: ValidationErrors::new(),
        }
    }

    /// Form pre-filled from an existing member.
    #[must_use]
    pub fn for_member(member: &Member, context: FormContext) -> Self {
        Self {
            context,
            editing: Some(member.id.clone()),
            draft: MemberDraft::from_member(member),
            errors: ValidationErrors::new(),
        }
    }

    /// Returns whether the form can be edited.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        !self.context.is_read_only()
    }

    /// Returns whether a field can be typed into.
    ///
    /// The book value only grows through [`Self::add_to_book_value`] once a
    /// member exists.
    #[must_use]
    pub fn is_field_editable(&self, field: MemberField) -> bool {
        match self.context {
            FormContext::View => false,
            FormContext::Create => true,
            FormContext::Edit | FormContext::Reactivate => field != MemberField::BookValue,
        }
    }

    /// Adds a positive amount to the book value.
    ///
    /// # Errors
    /// Rejects blank, non-numeric, zero or negative amounts, and amounts that
    /// would take the value past the cap. The value is left unchanged.
    pub fn add_to_book_value(&mut self, amount: &str) -> Result<Decimal, ValidationErrors> {
        let reject = || {
            let mut errors = ValidationErrors::new();
            errors.add(MemberField::BookValue, INVALID_AMOUNT);
            errors
        };

        let amount = parse_decimal(amount)
            .filter(|a| *a > Decimal::ZERO)
            .ok_or_else(reject)?;
        let current = if self.draft.book_value.trim().is_empty() {
            Decimal::ZERO
        } else {
            parse_decimal(&self.draft.book_value).ok_or_else(reject)?
        };

        let total = current
            .checked_add(amount)
            .filter(|total| *total <= max_book_value())
            .ok_or_else(reject)?;
        self.draft.book_value = total.normalize().to_string();
        Ok(total)
    }
}
