use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Spotify application credentials as stored in `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl Credentials {
    pub fn is_complete(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    /// Seconds before the nominal expiry at which the token is treated as stale.
    pub const EXPIRY_MARGIN: u64 = 240;

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + Self::EXPIRY_MARGIN >= self.obtained_at + self.expires_in
    }

    /// True if every space-separated scope in `requested` was granted.
    pub fn covers(&self, requested: &str) -> bool {
        let granted: Vec<&str> = self.scope.split_whitespace().collect();
        requested
            .split_whitespace()
            .all(|scope| granted.contains(&scope))
    }
}

/// State shared between the browser flow and the callback handler.
#[derive(Debug, Clone)]
pub struct PendingAuth {
    pub state: String,
    pub credentials: Credentials,
    /// Endpoint the authorization code is exchanged at.
    pub token_url: String,
    pub token: Option<Token>,
    pub error: Option<String>,
}

impl PendingAuth {
    pub fn new(state: String, credentials: Credentials) -> Self {
        Self {
            state,
            credentials,
            token_url: crate::config::spotify_apitoken_url(),
            token: None,
            error: None,
        }
    }
}

/// Statistics window passed as `time_range` to the top items endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    ShortTerm,
    LongTerm,
}

impl TimeRange {
    pub fn from_global(global: bool) -> Self {
        if global {
            TimeRange::LongTerm
        } else {
            TimeRange::ShortTerm
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::LongTerm => "long_term",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "Last Month",
            TimeRange::LongTerm => "All Time",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
    pub followers: Followers,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Followers {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopItemsResponse<T> {
    pub items: Vec<T>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyErrorResponse {
    pub error: SpotifyErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyErrorBody {
    pub status: u16,
    pub message: String,
}

/// Error payload of the accounts service (`/authorize`, `/api/token`).
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

/// One ranked track as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEntry {
    pub name: String,
    pub artists: Vec<String>,
}

/// Everything the dashboard shows, in API rank order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub display_name: String,
    pub followers: u64,
    pub period: String,
    pub artists: Vec<String>,
    pub tracks: Vec<TrackEntry>,
}
