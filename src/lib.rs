//! TripJournal core - client-side networking for the TripJournal app.
//!
//! This crate authenticates a user against the TripJournal REST API, keeps
//! the session token in the OS keychain, and exposes typed CRUD operations
//! for trips, events, and media attachments. The UI layer constructs a
//! [`JournalClient`] and subscribes to [`SessionManager::subscribe`] to
//! re-render on login and logout.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiError, JournalClient};
pub use auth::{CredentialStore, KeyringStore, MemoryStore, SessionManager, StoreError};
pub use config::{Endpoint, Environment};
pub use models::{
    Event, EventCreate, EventUpdate, Location, Media, MediaCreate, Token, Trip, TripCreate,
    TripUpdate,
};
