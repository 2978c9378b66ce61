//! Session marker storage adapters.

#[cfg(feature = "keyring")]
mod keyring_session;
#[cfg(not(feature = "keyring"))]
mod keyring_session_stub;
mod memory_session;

#[cfg(feature = "keyring")]
pub use keyring_session::KeyringSessionStorage;
#[cfg(not(feature = "keyring"))]
pub use keyring_session_stub::KeyringSessionStorage;
pub use memory_session::MemorySessionStorage;
