//! Authentication module for managing the session token and credentials.
//!
//! This module provides:
//! - `SessionManager`: token ownership with the authentication observable
//! - `CredentialStore`: secure OS-level token storage via keyring
//!
//! The stored token carries a client-computed 24h expiry; an expired token
//! found at startup is discarded rather than adopted.

pub mod credentials;
pub mod session;

pub use credentials::{CredentialStore, KeyringStore, MemoryStore, StoreError};
pub use session::SessionManager;
