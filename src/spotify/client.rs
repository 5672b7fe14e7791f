use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::{
    config,
    management::TokenManager,
    spotify::{ApiError, StatsApi},
    types::{
        Artist, Credentials, OAuthErrorResponse, SpotifyErrorResponse, TimeRange,
        TopItemsResponse, Track, UserProfile,
    },
};

/// Authenticated Web API client.
///
/// Holds the credentials alongside the token so an expired token can be
/// refreshed in place before any request goes out.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    credentials: Credentials,
    tokens: TokenManager,
}

impl SpotifyClient {
    pub fn new(credentials: Credentials, tokens: TokenManager) -> Self {
        Self::with_api_url(credentials, tokens, config::spotify_apiurl())
    }

    /// Client for a Web API rooted at `api_url` (no trailing slash).
    pub fn with_api_url(
        credentials: Credentials,
        tokens: TokenManager,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into(),
            credentials,
            tokens,
        }
    }

    async fn get<T: DeserializeOwned>(
        &mut self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let token = self.tokens.get_valid_token(&self.credentials).await?;
        let api_url = format!("{uri}{path}", uri = self.api_url, path = path);

        let response = self
            .http
            .get(&api_url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }
}

impl StatsApi for SpotifyClient {
    async fn current_user(&mut self) -> Result<UserProfile, ApiError> {
        self.get("/me", &[]).await
    }

    async fn top_artists(
        &mut self,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<TopItemsResponse<Artist>, ApiError> {
        self.get(
            "/me/top/artists",
            &[
                ("time_range", time_range.as_str().to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn top_tracks(
        &mut self,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<TopItemsResponse<Track>, ApiError> {
        self.get(
            "/me/top/tracks",
            &[
                ("time_range", time_range.as_str().to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }
}

/// Turns a non-success response into [`ApiError::Status`].
///
/// The Web API and the accounts service use different error bodies; both are
/// understood, anything else falls back to the raw body text.
pub(crate) async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = if let Ok(err) = serde_json::from_str::<SpotifyErrorResponse>(&body) {
        err.error.message
    } else if let Ok(err) = serde_json::from_str::<OAuthErrorResponse>(&body) {
        match err.error_description {
            Some(description) => format!("{}: {}", err.error, description),
            None => err.error,
        }
    } else if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body
    };

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}
