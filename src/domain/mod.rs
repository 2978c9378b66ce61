//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Printable report model.
pub mod report;
/// Serde utilities.
pub mod serde_utils;
/// Pure business rules.
pub mod services;

pub use entities::{Member, MemberId, MemberStatus, Transaction, TransactionAction};
pub use errors::{AuthError, StoreError, ValidationErrors};
pub use ports::{DocumentStorePort, SessionStoragePort};
