//! Normalized failures from the movie database gateway.
//!
//! Every failure path ends up as a [`GatewayError`] whose `Display` output is the
//! message shown to the user. It is never empty.

use serde::Deserialize;
use thiserror::Error;

const REQUEST_FALLBACK: &str = "The request could not be built.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A detail lookup came back 404.
    #[error("Movie not found.")]
    NotFound,

    /// The request went out but no response came back.
    #[error(
        "Network error: could not reach the movie database. Check your connection and try again."
    )]
    Network { detail: String },

    /// The request could not be constructed locally.
    #[error("{0}")]
    Request(String),

    /// A 2xx response whose body did not match the expected shape.
    #[error("Unexpected response from the movie database.")]
    Malformed { detail: String },
}

/// TMDB error bodies look like `{"status_code": 7, "status_message": "..."}`.
#[derive(Deserialize)]
struct ErrorBody {
    status_message: Option<String>,
    message: Option<String>,
}

impl GatewayError {
    /// Builds the error for a non-2xx response from its status code and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.status_message.or(b.message))
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Server error (status {}).", status));

        GatewayError::Status { status, message }
    }

    /// Classifies a transport-level failure reported by `reqwest`.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_builder() {
            GatewayError::request(err.to_string())
        } else {
            GatewayError::Network {
                detail: err.to_string(),
            }
        }
    }

    pub fn request(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.trim().is_empty() {
            GatewayError::Request(REQUEST_FALLBACK.to_string())
        } else {
            GatewayError::Request(raw)
        }
    }

    /// Turns a 404 into [`GatewayError::NotFound`]; other errors pass through.
    pub fn not_found_on_404(self) -> Self {
        match self {
            GatewayError::Status { status: 404, .. } => GatewayError::NotFound,
            other => other,
        }
    }
}
