//! Wire DTOs for the auth endpoints and the shared API error type.
//!
//! DESIGN
//! ======
//! Only auth payloads are typed; resource responses (activities,
//! reservations, subscriptions, users) pass through as `serde_json::Value`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::state::session::{Identity, Role};

/// Failure of a backend call. Transport errors are carried as-is; the
/// client neither retries nor classifies them.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Connection, TLS, timeout, or body-read failure.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

impl ApiError {
    /// HTTP status for `Status` errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email_or_username: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub repeat_password: String,
    pub email: String,
    pub user_type: Role,
}

/// Successful login response; the identity is nested under `login_response`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub(crate) struct LoginEnvelope {
    pub login_response: Identity,
}
