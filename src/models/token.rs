use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Token lifetime granted at login/register.
/// The server does not report an expiry; the client stamps issue time + 24h.
const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Session credential returned by the login and register endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    /// Client-computed; absent on the wire from the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
}

impl Token {
    /// Expiry stamp for a token issued now.
    pub fn default_expiration() -> DateTime<Utc> {
        Utc::now() + Duration::hours(TOKEN_LIFETIME_HOURS)
    }

    /// A token without an expiration date never expires locally.
    pub fn is_expired(&self) -> bool {
        match self.expiration_date {
            Some(expiry) => expiry <= Utc::now(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expiration_date: Option<DateTime<Utc>>) -> Token {
        Token {
            access_token: "abc123".into(),
            token_type: "Bearer".into(),
            expiration_date,
        }
    }

    #[test]
    fn expiry_in_the_past() {
        assert!(token(Some(Utc::now() - Duration::hours(1))).is_expired());
    }

    #[test]
    fn expiry_in_the_future() {
        assert!(!token(Some(Utc::now() + Duration::hours(1))).is_expired());
    }

    #[test]
    fn no_expiry_never_expires() {
        assert!(!token(None).is_expired());
    }

    #[test]
    fn default_expiration_is_a_day_out() {
        let expiry = Token::default_expiration();
        let delta = expiry - Utc::now();
        assert!(delta > Duration::hours(23) && delta <= Duration::hours(24));
    }

    #[test]
    fn decodes_server_response_without_expiry() {
        let parsed: Token =
            serde_json::from_str(r#"{"access_token":"abc123","token_type":"Bearer"}"#).unwrap();
        assert_eq!(parsed.access_token, "abc123");
        assert!(parsed.expiration_date.is_none());
    }

    #[test]
    fn expiry_survives_a_storage_round_trip() {
        let original = token(Some(Utc::now() + Duration::hours(24)));
        let blob = serde_json::to_string(&original).unwrap();
        let restored: Token = serde_json::from_str(&blob).unwrap();
        assert_eq!(restored, original);
    }
}
