//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Export services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{LoginRequest, LoginResponse, MemberForm};
pub use services::{ReportBranding, ReportLayout, ReportService};
pub use use_cases::{LoginUseCase, RosterService, RosterSnapshot};
