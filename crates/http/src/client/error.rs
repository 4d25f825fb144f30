//! Client error types

use crate::types::ErrorBody;
use reqwest::StatusCode;
use thiserror::Error;

/// Message surfaced whenever no response was received
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Try again.";

/// Client error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// No response was received (connect failure, timeout, aborted fetch)
    #[error("{message}")]
    Network { message: String },

    /// The server rejected the access token and the session was not recovered
    #[error("Authentication expired: {}", or_reason(&401, .message))]
    AuthExpired { message: String },

    /// The refresh endpoint failed; the session is over
    #[error("Session refresh failed: {0}")]
    RefreshFailed(Box<ClientError>),

    /// Request rejected as invalid (400, 422)
    #[error("Validation failed ({status}): {}", or_reason(.status, .message))]
    Validation { status: u16, message: String },

    /// Any other non-success response
    #[error("Server error {status}: {}", or_reason(.status, .message))]
    Domain { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// The synthetic error used when no response object exists
    pub fn network() -> Self {
        Self::Network {
            message: NETWORK_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn refresh_failed(cause: ClientError) -> Self {
        match cause {
            already @ Self::RefreshFailed(_) => already,
            cause => Self::RefreshFailed(Box::new(cause)),
        }
    }

    /// Create error from an HTTP status and the raw response body.
    ///
    /// Only a JSON `message` (or `error`) field counts as the server's
    /// message; anything else leaves it empty.
    pub fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let message = extract_message(body);
        match status.as_u16() {
            401 => Self::AuthExpired { message },
            400 | 422 => Self::Validation {
                status: status.as_u16(),
                message,
            },
            code => Self::Domain {
                status: code,
                message,
            },
        }
    }

    /// HTTP status carried by the error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthExpired { .. } => Some(401),
            Self::Validation { status, .. } | Self::Domain { status, .. } => Some(*status),
            Self::RefreshFailed(cause) => cause.status(),
            _ => None,
        }
    }

    /// Message suitable for showing to the user, falling back to the
    /// status reason phrase when the server sent none
    pub fn message(&self) -> &str {
        match self {
            Self::AuthExpired { message } => or_reason(&401, message),
            Self::Validation { status, message } | Self::Domain { status, message } => {
                or_reason(status, message)
            }
            Self::RefreshFailed(cause) => cause.message(),
            Self::Network { message }
            | Self::Serialization(message)
            | Self::Configuration(message) => message,
        }
    }

    /// Message the server put in the response body, or the network message
    /// when no response arrived
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Network { message } => Some(message.as_str()),
            Self::AuthExpired { message }
            | Self::Validation { message, .. }
            | Self::Domain { message, .. } => Some(message.as_str()).filter(|m| !m.is_empty()),
            Self::RefreshFailed(cause) => cause.server_message(),
            Self::Serialization(_) | Self::Configuration(_) => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired { .. })
    }

    pub fn is_refresh_failed(&self) -> bool {
        matches!(self, Self::RefreshFailed(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            Self::Configuration(error.to_string())
        } else if error.is_decode() {
            Self::Serialization(error.to_string())
        } else {
            tracing::warn!(%error, "request produced no response");
            Self::network()
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

fn extract_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message.or(parsed.error))
        .unwrap_or_default()
}

fn or_reason<'a>(status: &u16, message: &'a str) -> &'a str {
    if !message.is_empty() {
        return message;
    }
    StatusCode::from_u16(*status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("Request failed")
}
