use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Media;

/// A single event within a trip, optionally pinned to a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub medias: Vec<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_from_previous: Option<String>,
}

/// A geographic point with an optional human-readable address.
/// Value type: no identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Payload for creating an event within a trip.
/// The trip relation travels by id; events are never embedded on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCreate {
    pub trip_id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_from_previous: Option<String>,
}

/// Payload for replacing an existing event's fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventUpdate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_from_previous: Option<String>,
}
