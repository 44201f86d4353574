use std::sync::Mutex;

use tokio::sync::watch;
use tracing::{debug, warn};

use super::credentials::{CredentialStore, StoreError};
use crate::models::Token;

/// Owns the live session token and mirrors every change to the credential
/// store.
///
/// The token is replaced whole, never partially updated. UI code watches
/// `subscribe()` to re-render on login and logout; an in-flight request
/// keeps whatever token string it already captured, so logout during a
/// request is a benign race.
pub struct SessionManager {
    store: Box<dyn CredentialStore>,
    token: Mutex<Option<Token>>,
    auth_tx: watch::Sender<bool>,
    expired_at_startup: bool,
}

impl SessionManager {
    /// Build a manager around `store`, adopting any stored credential whose
    /// expiration is absent or in the future. An expired credential is
    /// discarded, removed from the store, and remembered via
    /// [`token_expired_at_startup`](Self::token_expired_at_startup).
    pub fn new(store: Box<dyn CredentialStore>) -> Self {
        let mut expired_at_startup = false;
        let token = match store.load() {
            Some(stored) if stored.is_expired() => {
                debug!("stored token has expired, discarding");
                expired_at_startup = true;
                // Nothing will overwrite the slot until the next login, so
                // clear it now instead of leaving the stale blob behind.
                if let Err(err) = store.delete() {
                    warn!(error = %err, "failed to remove expired token from store");
                }
                None
            }
            other => other,
        };
        let (auth_tx, _) = watch::channel(token.is_some());
        Self {
            store,
            token: Mutex::new(token),
            auth_tx,
            expired_at_startup,
        }
    }

    /// Install a new session token. The store write is the postcondition:
    /// on storage failure the in-memory token and the observable are left
    /// untouched.
    pub fn set_token(&self, token: Token) -> Result<(), StoreError> {
        self.store.save(&token)?;
        *self.token.lock().expect("token lock") = Some(token);
        self.auth_tx.send_replace(true);
        Ok(())
    }

    /// Drop the session token and remove it from the store.
    pub fn clear_token(&self) -> Result<(), StoreError> {
        self.store.delete()?;
        *self.token.lock().expect("token lock") = None;
        self.auth_tx.send_replace(false);
        Ok(())
    }

    /// Explicit logout; same contract as [`clear_token`](Self::clear_token).
    pub fn log_out(&self) -> Result<(), StoreError> {
        self.clear_token()
    }

    /// Bearer value for request construction, if authenticated.
    pub fn access_token(&self) -> Option<String> {
        self.token
            .lock()
            .expect("token lock")
            .as_ref()
            .map(|token| token.access_token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.lock().expect("token lock").is_some()
    }

    /// Continuous boolean authentication stream. Emission is synchronous
    /// with every token change; the stream never completes, and dropping
    /// the receiver unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.auth_tx.subscribe()
    }

    /// True when construction found a stored-but-expired token.
    pub fn token_expired_at_startup(&self) -> bool {
        self.expired_at_startup
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};

    use super::*;
    use crate::auth::credentials::MemoryStore;

    fn token(expires_in_hours: Option<i64>) -> Token {
        Token {
            access_token: "abc123".into(),
            token_type: "Bearer".into(),
            expiration_date: expires_in_hours.map(|h| Utc::now() + Duration::hours(h)),
        }
    }

    #[test]
    fn adopts_stored_token_with_future_expiry() {
        let store = Arc::new(MemoryStore::default());
        store.save(&token(Some(1))).unwrap();

        let session = SessionManager::new(Box::new(store.clone()));
        assert!(session.is_authenticated());
        assert!(!session.token_expired_at_startup());
        assert_eq!(session.access_token().as_deref(), Some("abc123"));
    }

    #[test]
    fn adopts_stored_token_without_expiry() {
        let store = Arc::new(MemoryStore::default());
        store.save(&token(None)).unwrap();

        let session = SessionManager::new(Box::new(store.clone()));
        assert!(session.is_authenticated());
        assert!(!session.token_expired_at_startup());
    }

    #[test]
    fn discards_expired_token_and_clears_store() {
        let store = Arc::new(MemoryStore::default());
        store.save(&token(Some(-1))).unwrap();

        let session = SessionManager::new(Box::new(store.clone()));
        assert!(!session.is_authenticated());
        assert!(session.token_expired_at_startup());
        assert!(store.load().is_none());
    }

    #[test]
    fn starts_logged_out_on_empty_store() {
        let session = SessionManager::new(Box::new(MemoryStore::default()));
        assert!(!session.is_authenticated());
        assert!(!session.token_expired_at_startup());
        assert!(session.access_token().is_none());
    }

    #[test]
    fn set_token_persists_to_store() {
        let store = Arc::new(MemoryStore::default());
        let session = SessionManager::new(Box::new(store.clone()));

        session.set_token(token(Some(24))).unwrap();
        assert_eq!(store.load().unwrap().access_token, "abc123");
    }

    #[test]
    fn log_out_leaves_store_empty() {
        let store = Arc::new(MemoryStore::default());
        let session = SessionManager::new(Box::new(store.clone()));
        session.set_token(token(Some(24))).unwrap();

        session.log_out().unwrap();
        assert!(!session.is_authenticated());
        assert!(store.load().is_none());
    }

    #[test]
    fn observable_tracks_token_changes() {
        let session = SessionManager::new(Box::new(MemoryStore::default()));
        let rx = session.subscribe();
        assert!(!*rx.borrow());

        session.set_token(token(Some(24))).unwrap();
        assert!(*rx.borrow());

        session.clear_token().unwrap();
        assert!(!*rx.borrow());
    }

    #[test]
    fn observable_starts_true_for_adopted_token() {
        let store = Arc::new(MemoryStore::default());
        store.save(&token(None)).unwrap();

        let session = SessionManager::new(Box::new(store.clone()));
        assert!(*session.subscribe().borrow());
    }
}
