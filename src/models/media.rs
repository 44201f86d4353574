use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use url::Url;

/// A media attachment with a server-resolvable URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
}

/// Upload payload for a media attachment; raw bytes travel base64-encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaCreate {
    pub event_id: i64,
    pub base64_data: String,
}

impl MediaCreate {
    pub fn new(event_id: i64, data: &[u8]) -> Self {
        Self {
            event_id,
            base64_data: BASE64.encode(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let media = Media {
            id: 3,
            url: Some("http://localhost:8000/media/3.jpg".parse().unwrap()),
        };
        let json = serde_json::to_string(&media).unwrap();
        let parsed: Media = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, media);
    }

    #[test]
    fn url_may_be_absent() {
        let parsed: Media = serde_json::from_str(r#"{"id":3}"#).unwrap();
        assert!(parsed.url.is_none());
    }

    #[test]
    fn upload_payload_encodes_bytes() {
        let payload = MediaCreate::new(9, b"hello");
        assert_eq!(payload.event_id, 9);
        assert_eq!(payload.base64_data, "aGVsbG8=");
    }
}
