use std::path::{Path, PathBuf};

use crate::{
    config,
    spotify::{self, ApiError},
    types::{Credentials, Token},
    warning,
};

/// Owns the cached OAuth token and keeps it fresh.
pub struct TokenManager {
    token: Token,
    path: PathBuf,
    token_url: String,
}

impl TokenManager {
    pub fn new(token: Token, path: PathBuf) -> Self {
        TokenManager {
            token,
            path,
            token_url: config::spotify_apitoken_url(),
        }
    }

    pub async fn load(path: &Path) -> Result<Self, String> {
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self::new(token, path.to_path_buf()))
    }

    /// Sends refresh requests to `token_url` instead of the configured endpoint.
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    pub async fn persist(&self) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing and re-persisting it first if it
    /// is about to expire.
    ///
    /// A failed write of the refreshed token is reported but does not fail
    /// the request.
    pub async fn get_valid_token(&mut self, credentials: &Credentials) -> Result<String, ApiError> {
        if self.token.is_expired() {
            let refreshed =
                spotify::auth::refresh_token(&self.token_url, credentials, &self.token).await?;
            self.token = refreshed;
            if let Err(e) = self.persist().await {
                warning!("Failed to save refreshed token to cache: {}", e);
            }
        }

        Ok(self.token.access_token.clone())
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
