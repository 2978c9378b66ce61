mod clock_port;
mod credential_port;
mod document_store_port;
mod export_port;
mod session_storage_port;

pub use clock_port::ClockPort;
pub use credential_port::CredentialVerifierPort;
pub use document_store_port::{
    DocumentStorePort, Fields, MEMBERS_COLLECTION, StoredDocument, TRANSACTIONS_COLLECTION,
};
pub use export_port::{ExportSinkPort, ReportRendererPort};
pub use session_storage_port::SessionStoragePort;
