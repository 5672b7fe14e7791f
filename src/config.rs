//! Configuration management for spotistats.
//!
//! This module owns every file location the tool touches and the handful of
//! endpoint settings that can be overridden from the environment. All state
//! lives in one directory:
//!
//! - `config.json` - Spotify application credentials (see [`crate::management::CredentialsManager`])
//! - `.cache` - OAuth token cache (see [`crate::management::TokenManager`])
//! - `.env` - optional overrides for the variables read below
//!
//! The directory defaults to `~/.config/spotistats` and can be relocated with
//! `SPOTISTATS_CONFIG_DIR`. Lookup order for every other setting is:
//! 1. Process environment (highest priority)
//! 2. `.env` file in the config directory
//! 3. Built-in defaults

use std::{env, path::PathBuf, time::Duration};

/// Redirect URI stored when the user leaves the setup prompt empty.
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8888/callback";

/// Scopes requested during authorization.
pub const SPOTIFY_SCOPE: &str = "user-top-read user-read-private";

/// Where users register their Spotify application.
pub const DEVELOPER_DASHBOARD_URL: &str = "https://developer.spotify.com/dashboard";

const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 120;

/// Loads environment overrides from the `.env` file in the config directory.
///
/// A missing file is fine: every setting has a default. Variables already set
/// in the process environment are never overwritten.
///
/// # Errors
///
/// Returns an error string if the file exists but cannot be read or parsed.
///
/// # Example
///
/// ```
/// if let Err(e) = spotistats::config::load_env() {
///     eprintln!("Configuration error: {}", e);
/// }
/// ```
pub fn load_env() -> Result<(), String> {
    let path = env_file();
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Returns the directory holding the config file and the token cache.
///
/// Honors `SPOTISTATS_CONFIG_DIR`, otherwise `~/.config/spotistats`. Falls
/// back to the working directory when no home directory can be determined.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = env::var("SPOTISTATS_CONFIG_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config/spotistats");
    path
}

/// Path of the credentials file.
pub fn config_file() -> PathBuf {
    config_dir().join("config.json")
}

/// Path handed to the token cache.
pub fn token_cache_file() -> PathBuf {
    config_dir().join(".cache")
}

/// Path of the optional environment override file.
pub fn env_file() -> PathBuf {
    config_dir().join(".env")
}

/// Returns the Spotify Web API base URL.
///
/// Reads `SPOTISTATS_API_URL`, defaulting to `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    env_or("SPOTISTATS_API_URL", DEFAULT_API_URL)
}

/// Returns the Spotify OAuth authorization URL.
///
/// Reads `SPOTISTATS_AUTH_URL`, defaulting to
/// `https://accounts.spotify.com/authorize`.
pub fn spotify_apiauth_url() -> String {
    env_or("SPOTISTATS_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Returns the Spotify OAuth token exchange URL.
///
/// Reads `SPOTISTATS_TOKEN_URL`, defaulting to
/// `https://accounts.spotify.com/api/token`.
pub fn spotify_apitoken_url() -> String {
    env_or("SPOTISTATS_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// How long the browser flow waits for the redirect to arrive.
///
/// Reads `SPOTISTATS_AUTH_TIMEOUT` (seconds). Unparseable values fall back
/// to the default of two minutes.
pub fn auth_timeout() -> Duration {
    let secs = env::var("SPOTISTATS_AUTH_TIMEOUT")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|s| *s > 0)
        .unwrap_or(DEFAULT_AUTH_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim_end_matches('/').to_string(),
        _ => default.to_string(),
    }
}
