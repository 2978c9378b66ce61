//! Use case implementations.

mod login_use_case;
mod roster_service;

pub use login_use_case::LoginUseCase;
pub use roster_service::{RosterService, RosterSnapshot};
