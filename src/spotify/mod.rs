//! # Spotify Integration Module
//!
//! Everything that talks to Spotify lives here. The module is split into:
//!
//! - [`auth`] - OAuth 2.0 authorization-code flow: token cache reuse, the
//!   browser round trip through a local callback server (or a pasted
//!   redirect URL), code exchange and token refresh
//! - [`SpotifyClient`] - thin authenticated wrapper over the Web API
//! - [`StatsApi`] / [`fetch_dashboard`] - the three reads behind the
//!   dashboard and the mapping into [`crate::types::DashboardView`]
//!
//! ## API Coverage
//!
//! - `GET /me` - profile of the current user
//! - `GET /me/top/artists` - top artists for a time range
//! - `GET /me/top/tracks` - top tracks for a time range
//! - `POST /api/token` - code exchange and refresh
//!
//! ## Error Types
//!
//! Every fallible operation returns [`ApiError`]. There is no retry logic:
//! the first failure is reported to the user as is.

use std::fmt;

pub mod auth;
mod client;
mod stats;

pub use client::SpotifyClient;
pub use stats::{StatsApi, TOP_ITEMS_LIMIT, build_view, fetch_dashboard};

#[derive(Debug)]
pub enum ApiError {
    /// Transport failure reported by reqwest.
    Http(reqwest::Error),
    /// Non-success status from the Web API or the accounts service.
    Status { status: u16, message: String },
    /// Authorization flow failure (denied, mismatched state, timeout).
    Auth(String),
    /// Response body did not match the expected shape.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http(e) => write!(f, "{}", e),
            ApiError::Status { status, message } => {
                write!(f, "http status: {}, {}", status, message)
            }
            ApiError::Auth(message) => write!(f, "{}", message),
            ApiError::Decode(message) => write!(f, "unexpected response: {}", message),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Http(err)
        }
    }
}
