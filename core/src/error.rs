//! Error types for the controller client.
//!
//! # Design
//! Errors are returned to the immediate caller unchanged; the client never
//! retries or swallows them. `NotFound` is only produced by lookups that
//! decode an empty list, since the controller answers an unknown application
//! with `[]` rather than a 404. All other non-2xx responses land in
//! `HttpError` with the raw status code and body for debugging.

use thiserror::Error;

/// Errors returned by `ControllerClient` and its accessors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request URL could not be built from the base URL and path.
    #[error("failed to build request: {0}")]
    RequestBuild(String),

    /// The transport failed before a response was received.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The controller rejected the credentials (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// The controller returned a non-2xx status other than 401.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// A RESTUI endpoint answered with something that is not JSON, usually
    /// the login page.
    #[error("unexpected content from RESTUI endpoint: {0}")]
    UnexpectedContent(String),

    /// A lookup decoded an empty list.
    #[error("application not found: {0}")]
    NotFound(String),

    /// Client configuration could not be read or parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}
