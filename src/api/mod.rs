//! # API Module
//!
//! HTTP handlers for the short-lived local server that receives Spotify's
//! OAuth redirect.
//!
//! ## Endpoints
//!
//! - [`callback`] - mounted on the path of the configured redirect URI.
//!   Validates the `state` parameter, exchanges the authorization code and
//!   hands the resulting token (or the failure) back to the waiting flow.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use spotistats::api::callback;
//!
//! let app = Router::new()
//!     .route("/callback", get(callback).layer(Extension(shared_state)));
//! ```

mod callback;

pub use callback::callback;
