//! Error types for the feed API client.
//!
//! `NotFound` gets its own variant since a vanished post is the common
//! failure for like/delete. Everything else that is not 2xx lands in
//! `HttpError` with the raw status and body.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The host could not complete the round-trip (connection refused, reset, ...).
    #[error("transport failed: {0}")]
    Transport(String),
}
