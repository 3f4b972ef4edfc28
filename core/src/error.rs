//! Error types for the person client.
//!
//! `NotFound` and `Conflict` get dedicated variants because callers branch on
//! them; any other fault keeps its status, detail and message.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// 404 fault: no person with the requested ID.
    #[error("person not found")]
    NotFound,

    /// 409 fault: the email belongs to another person.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Any other fault returned by the service.
    #[error("fault {code} (HTTP {status}): {message}")]
    Fault {
        status: u16,
        code: String,
        message: String,
    },

    /// Non-success status whose body is not a fault.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}
