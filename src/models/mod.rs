//! Data models for TripJournal entities and request payloads.
//!
//! Entities (`Trip`, `Event`, `Media`) carry server-assigned ids and are
//! returned by the API client. The `*Create`/`*Update` types are request
//! payload shapes only and are never persisted client-side.
//!
//! All timestamps serialize as ISO-8601 in both directions.

pub mod event;
pub mod media;
pub mod token;
pub mod trip;

pub use event::{Event, EventCreate, EventUpdate, Location};
pub use media::{Media, MediaCreate};
pub use token::Token;
pub use trip::{Trip, TripCreate, TripUpdate};
