use thiserror::Error;

use crate::auth::StoreError;

/// Failure modes of the REST client.
///
/// Every failure is terminal for the operation that raised it; nothing is
/// retried internally and no partial state is left behind.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("could not build request URL: {0}")]
    InvalidUrl(String),

    #[error("not authenticated - log in or register first")]
    Unauthenticated,

    #[error("failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("failed to decode response body: {0}")]
    Decoding(#[source] serde_json::Error),

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status code {0}")]
    UnexpectedStatus(u16),

    #[error("credential storage failed: {0}")]
    Storage(#[from] StoreError),
}
