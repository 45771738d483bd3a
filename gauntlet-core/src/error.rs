// Error types surfaced to the transport layer

use crate::HttpResponse;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// Field-level failures, carrying the status and `{"errors": [...]}`
    /// body they render as
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        status: u16,
        body: Value,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::BadRequest(_) | Error::Deserialization(_) => 400,
            Error::Validation { status, .. } => *status,
            Error::Serialization(_) | Error::Configuration(_) => 500,
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Render as a JSON response.
    ///
    /// Validation errors keep their field list; everything else becomes
    /// `{"error": "<message>"}`.
    pub fn into_response(self) -> HttpResponse {
        let status = self.status_code();
        let body = match self {
            Error::Validation { body, .. } => body,
            other => serde_json::json!({ "error": other.to_string() }),
        };

        match HttpResponse::new(status).with_json(&body) {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, "failed to render error response");
                HttpResponse::new(500).with_body(err.to_string().into_bytes())
            }
        }
    }
}
