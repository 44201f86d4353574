//! REST API client module for the TripJournal service.
//!
//! This module provides the `JournalClient` for authenticating against the
//! TripJournal API and performing CRUD operations on trips, events, and
//! media attachments.
//!
//! The API uses an OAuth2-style password grant for login and bearer token
//! authorization on every other endpoint.

pub mod client;
pub mod error;

pub use client::JournalClient;
pub use error::ApiError;
