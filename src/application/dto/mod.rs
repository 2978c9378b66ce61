//! Data transfer objects for the application layer.

mod auth_dto;
mod member_form;

pub use auth_dto::{LoginRequest, LoginResponse};
pub use member_form::MemberForm;
