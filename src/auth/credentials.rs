use std::sync::{Arc, Mutex};

use keyring::Entry;
use thiserror::Error;
use tracing::warn;

use crate::models::Token;

const SERVICE_NAME: &str = "com.tripjournal.client";
const ACCOUNT_NAME: &str = "auth-token";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("keychain operation failed: {0}")]
    Keychain(#[from] keyring::Error),

    #[error("failed to serialize token: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable storage for the single session credential.
///
/// One credential slot per installation; no multi-account support. Injected
/// into the session manager so tests can substitute an in-memory store.
pub trait CredentialStore: Send + Sync {
    /// Replace any stored credential with `token`.
    fn save(&self, token: &Token) -> Result<(), StoreError>;

    /// Read the stored credential. Returns `None` both when nothing is
    /// stored and when the read fails; read failures are logged, not
    /// surfaced.
    fn load(&self) -> Option<Token>;

    /// Remove the stored credential. Deleting an empty slot succeeds.
    fn delete(&self) -> Result<(), StoreError>;
}

impl<S: CredentialStore + ?Sized> CredentialStore for Arc<S> {
    fn save(&self, token: &Token) -> Result<(), StoreError> {
        (**self).save(token)
    }

    fn load(&self) -> Option<Token> {
        (**self).load()
    }

    fn delete(&self) -> Result<(), StoreError> {
        (**self).delete()
    }
}

/// OS keychain-backed store holding the token as a JSON blob.
pub struct KeyringStore;

impl KeyringStore {
    fn entry() -> Result<Entry, StoreError> {
        Ok(Entry::new(SERVICE_NAME, ACCOUNT_NAME)?)
    }
}

impl CredentialStore for KeyringStore {
    fn save(&self, token: &Token) -> Result<(), StoreError> {
        let blob = serde_json::to_string(token)?;
        let entry = Self::entry()?;
        // Replace, not update: drop any existing credential first.
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => {}
            Err(err) => return Err(err.into()),
        }
        entry.set_password(&blob)?;
        Ok(())
    }

    fn load(&self) -> Option<Token> {
        let entry = match Self::entry() {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "keychain entry unavailable");
                return None;
            }
        };
        match entry.get_password() {
            Ok(blob) => match serde_json::from_str(&blob) {
                Ok(token) => Some(token),
                Err(err) => {
                    warn!(error = %err, "stored token blob is not valid JSON");
                    None
                }
            },
            Err(keyring::Error::NoEntry) => None,
            Err(err) => {
                warn!(error = %err, "failed to read token from keychain");
                None
            }
        }
    }

    fn delete(&self) -> Result<(), StoreError> {
        match Self::entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-process store for tests and previews.
#[derive(Default)]
pub struct MemoryStore {
    token: Mutex<Option<Token>>,
}

impl CredentialStore for MemoryStore {
    fn save(&self, token: &Token) -> Result<(), StoreError> {
        *self.token.lock().expect("store lock") = Some(token.clone());
        Ok(())
    }

    fn load(&self) -> Option<Token> {
        self.token.lock().expect("store lock").clone()
    }

    fn delete(&self) -> Result<(), StoreError> {
        *self.token.lock().expect("store lock") = None;
        Ok(())
    }
}
