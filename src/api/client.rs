//! API client for the TripJournal REST API.
//!
//! One method per API operation: register and login, plus CRUD for trips,
//! events, and media. Authenticated requests carry a bearer token from the
//! session manager; timestamps travel as ISO-8601 in both directions.

use std::sync::Arc;

use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use url::Url;

use crate::auth::SessionManager;
use crate::config::{Endpoint, Environment};
use crate::models::{
    Event, EventCreate, EventUpdate, Media, MediaCreate, Token, Trip, TripCreate, TripUpdate,
};

use super::ApiError;

/// Client for the TripJournal REST API.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct JournalClient {
    http: Client,
    base_url: Url,
    session: Arc<SessionManager>,
}

impl JournalClient {
    /// Create a client against a named environment.
    pub fn new(environment: Environment, session: Arc<SessionManager>) -> Result<Self, ApiError> {
        let base_url = Url::parse(environment.base_url())
            .map_err(|err| ApiError::InvalidUrl(err.to_string()))?;
        Self::with_base_url(base_url, session)
    }

    /// Create a client against an explicit base URL.
    pub fn with_base_url(base_url: Url, session: Arc<SessionManager>) -> Result<Self, ApiError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// Session manager backing this client.
    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    // ===== Authentication =====

    /// Create an account and adopt the returned session token.
    pub async fn register(&self, username: &str, password: &str) -> Result<Token, ApiError> {
        let url = self.url_for(Endpoint::Register)?;
        let body = Self::json_body(&RegisterPayload { username, password })?;
        let response = self
            .http
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        self.adopt_token(response).await
    }

    /// Exchange username and password for a session token
    /// (OAuth2 password grant).
    pub async fn log_in(&self, username: &str, password: &str) -> Result<Token, ApiError> {
        let url = self.url_for(Endpoint::Login)?;
        // The token endpoint takes a form body, not JSON.
        let response = self
            .http
            .post(url)
            .form(&[
                ("grant_type", ""),
                ("username", username),
                ("password", password),
            ])
            .send()
            .await?;
        self.adopt_token(response).await
    }

    // ===== Trips =====

    pub async fn create_trip(&self, request: &TripCreate) -> Result<Trip, ApiError> {
        let url = self.url_for(Endpoint::Trips)?;
        let body = Self::json_body(request)?;
        let response = self
            .authed(Method::POST, url)?
            .body(body)
            .send()
            .await?;
        Self::decode(Self::expect_status(response, &[200])?).await
    }

    pub async fn get_trips(&self) -> Result<Vec<Trip>, ApiError> {
        let url = self.url_for(Endpoint::Trips)?;
        let response = self.authed(Method::GET, url)?.send().await?;
        debug!(status = %response.status(), "trips response received");
        Self::decode(Self::expect_status(response, &[200])?).await
    }

    pub async fn get_trip(&self, trip_id: i64) -> Result<Trip, ApiError> {
        let url = self.url_for_item(Endpoint::Trips, trip_id)?;
        let response = self.authed(Method::GET, url)?.send().await?;
        Self::decode(Self::expect_status(response, &[200])?).await
    }

    pub async fn update_trip(&self, trip_id: i64, request: &TripUpdate) -> Result<Trip, ApiError> {
        let url = self.url_for_item(Endpoint::Trips, trip_id)?;
        let body = Self::json_body(request)?;
        let response = self
            .authed(Method::PUT, url)?
            .body(body)
            .send()
            .await?;
        Self::decode(Self::expect_status(response, &[200])?).await
    }

    /// Delete a trip. The server answers 200 or 204 depending on version;
    /// both count as success.
    pub async fn delete_trip(&self, trip_id: i64) -> Result<(), ApiError> {
        let url = self.url_for_item(Endpoint::Trips, trip_id)?;
        let response = self.authed(Method::DELETE, url)?.send().await?;
        Self::expect_status(response, &[200, 204])?;
        Ok(())
    }

    // ===== Events =====

    pub async fn create_event(&self, request: &EventCreate) -> Result<Event, ApiError> {
        let url = self.url_for(Endpoint::Events)?;
        let body = Self::json_body(request)?;
        let response = self
            .authed(Method::POST, url)?
            .body(body)
            .send()
            .await?;
        Self::decode(Self::expect_status(response, &[200])?).await
    }

    pub async fn update_event(
        &self,
        event_id: i64,
        request: &EventUpdate,
    ) -> Result<Event, ApiError> {
        let url = self.url_for_item(Endpoint::Events, event_id)?;
        let body = Self::json_body(request)?;
        let response = self
            .authed(Method::PUT, url)?
            .body(body)
            .send()
            .await?;
        Self::decode(Self::expect_status(response, &[200])?).await
    }

    pub async fn delete_event(&self, event_id: i64) -> Result<(), ApiError> {
        let url = self.url_for_item(Endpoint::Events, event_id)?;
        let response = self.authed(Method::DELETE, url)?.send().await?;
        Self::expect_status(response, &[204])?;
        Ok(())
    }

    // ===== Media =====

    pub async fn create_media(&self, request: &MediaCreate) -> Result<Media, ApiError> {
        let url = self.url_for(Endpoint::Media)?;
        let body = Self::json_body(request)?;
        let response = self
            .authed(Method::POST, url)?
            .body(body)
            .send()
            .await?;
        debug!(status = %response.status(), "media upload response received");
        Self::decode(Self::expect_status(response, &[200])?).await
    }

    pub async fn delete_media(&self, media_id: i64) -> Result<(), ApiError> {
        let url = self.url_for_item(Endpoint::Media, media_id)?;
        let response = self.authed(Method::DELETE, url)?.send().await?;
        Self::expect_status(response, &[200])?;
        Ok(())
    }

    // ===== Request plumbing =====

    fn url_for(&self, endpoint: Endpoint) -> Result<Url, ApiError> {
        self.base_url
            .join(endpoint.path())
            .map_err(|err| ApiError::InvalidUrl(format!("{}: {err}", endpoint.path())))
    }

    fn url_for_item(&self, endpoint: Endpoint, id: i64) -> Result<Url, ApiError> {
        self.base_url
            .join(&format!("{}/{id}", endpoint.path()))
            .map_err(|err| ApiError::InvalidUrl(format!("{}/{id}: {err}", endpoint.path())))
    }

    /// Request scaffold for authenticated operations. Fails before any
    /// network I/O when no token is present. Every operation except login
    /// declares a JSON content type, body or not.
    fn authed(&self, method: Method, url: Url) -> Result<RequestBuilder, ApiError> {
        let token = self
            .session
            .access_token()
            .ok_or(ApiError::Unauthenticated)?;
        Ok(self
            .http
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json")
            .bearer_auth(token))
    }

    fn json_body<B: Serialize>(body: &B) -> Result<Vec<u8>, ApiError> {
        serde_json::to_vec(body).map_err(ApiError::Encoding)
    }

    fn expect_status(response: Response, expected: &[u16]) -> Result<Response, ApiError> {
        let status = response.status().as_u16();
        if expected.contains(&status) {
            Ok(response)
        } else {
            Err(ApiError::UnexpectedStatus(status))
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(ApiError::Decoding)
    }

    /// Shared login/register tail: expect 200, stamp the 24h expiry, and
    /// install the token so it is persisted before the caller sees it.
    async fn adopt_token(&self, response: Response) -> Result<Token, ApiError> {
        debug!(status = %response.status(), "auth response received");
        let response = Self::expect_status(response, &[200])?;
        let mut token: Token = Self::decode(response).await?;
        token.expiration_date = Some(Token::default_expiration());
        self.session.set_token(token.clone())?;
        Ok(token)
    }
}

// Internal request payload for the register endpoint; the login form is
// built inline.
#[derive(Serialize)]
struct RegisterPayload<'a> {
    username: &'a str,
    password: &'a str,
}
