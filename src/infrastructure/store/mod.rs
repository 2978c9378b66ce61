//! Document store adapters.

pub mod firestore;
mod json_file_store;
mod memory_store;

pub use firestore::FirestoreStore;
pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;
