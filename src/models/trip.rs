use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Event;

/// A journaled trip with its ordered events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: i64,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub events: Vec<Event>,
}

/// Payload for creating a trip; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripCreate {
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Payload for replacing an existing trip's fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripUpdate {
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}
