//! Operator credential adapters.

mod config_verifier;

pub use config_verifier::{ConfigCredentialVerifier, hash_password};
