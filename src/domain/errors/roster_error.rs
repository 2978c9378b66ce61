//! Roster management error types.

use thiserror::Error;

use super::{StoreError, ValidationErrors};
use crate::domain::entities::TransactionAction;

/// Roster mutation error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum RosterError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("member {id} is no longer on the roster")]
    UnknownMember { id: String },

    #[error("{name} is still active and cannot be reactivated")]
    NotExpired { name: String },

    /// The member record was written but its audit entry was not.
    #[error("{member} was saved, but the {action} audit entry failed: {source}")]
    AuditDivergence {
        member: String,
        action: TransactionAction,
        #[source]
        source: StoreError,
    },
}

impl RosterError {
    /// Creates unknown-member error.
    #[must_use]
    pub fn unknown_member(id: impl Into<String>) -> Self {
        Self::UnknownMember { id: id.into() }
    }

    /// Returns whether the record write itself went through.
    #[must_use]
    pub const fn record_saved(&self) -> bool {
        matches!(self, Self::AuditDivergence { .. })
    }

    /// Returns field errors when the form was rejected.
    #[must_use]
    pub const fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
