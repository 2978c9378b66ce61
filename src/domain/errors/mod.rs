//! Domain error types.

mod auth_error;
mod export_error;
mod roster_error;
mod secret_error;
mod store_error;
mod validation_error;

pub use auth_error::AuthError;
pub use export_error::ExportError;
pub use roster_error::RosterError;
pub use secret_error::SecretError;
pub use store_error::StoreError;
pub use validation_error::ValidationErrors;
