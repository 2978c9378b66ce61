//! Cloud Firestore REST adapter.

mod client;
pub mod codec;
mod dto;

pub use client::FirestoreStore;
