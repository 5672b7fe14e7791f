use std::{net::SocketAddr, path::Path, sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::Mutex,
};

use crate::{
    config, info,
    management::TokenManager,
    server::start_api_server,
    spotify::{ApiError, client::check_status},
    success,
    types::{Credentials, PendingAuth, Token, TokenResponse},
    utils::{self, RedirectParams},
    warning,
};

/// Returns a token manager holding a usable token for `credentials`.
///
/// The cache at `cache_path` is reused when it grants every scope in
/// [`config::SPOTIFY_SCOPE`]; expiry is handled later by
/// [`TokenManager::get_valid_token`]. Otherwise the user is sent through the
/// browser flow and the new token is written to the cache.
///
/// # Authentication Flow
///
/// 1. **State**: a random `state` value ties the redirect to this run
/// 2. **Browser Launch**: the authorization URL is opened in the default browser
/// 3. **Redirect**: a loopback redirect URI with a port is answered by a local
///    callback server; any other redirect URI is pasted back by the user
/// 4. **Token Exchange**: the code is exchanged with client credentials
/// 5. **Token Persistence**: the token is saved for the next run
///
/// Waiting for the redirect blocks for at most [`config::auth_timeout`].
pub async fn authorize(
    credentials: &Credentials,
    cache_path: &Path,
) -> Result<TokenManager, ApiError> {
    match TokenManager::load(cache_path).await {
        Ok(manager) if manager.current_token().covers(config::SPOTIFY_SCOPE) => {
            return Ok(manager);
        }
        Ok(_) => info!("Cached token is missing required scopes, authorizing again."),
        Err(_) => {}
    }

    let token = request_user_token(credentials).await?;
    let manager = TokenManager::new(token, cache_path.to_path_buf());
    if let Err(e) = manager.persist().await {
        warning!("Failed to save token to cache: {}", e);
    }

    success!("Authentication successful!");
    Ok(manager)
}

async fn request_user_token(credentials: &Credentials) -> Result<Token, ApiError> {
    let state = utils::generate_state();
    let auth_url = utils::build_authorize_url(
        &config::spotify_apiauth_url(),
        credentials,
        config::SPOTIFY_SCOPE,
        &state,
    )
    .map_err(ApiError::Auth)?;

    match utils::redirect_listener(&credentials.redirect_uri) {
        Some(addr) => token_via_callback_server(credentials, addr, &auth_url, state).await,
        None => token_via_pasted_url(credentials, &auth_url, &state).await,
    }
}

async fn token_via_callback_server(
    credentials: &Credentials,
    addr: SocketAddr,
    auth_url: &str,
    state: String,
) -> Result<Token, ApiError> {
    let shared_state = Arc::new(Mutex::new(PendingAuth::new(state, credentials.clone())));
    let callback_path = utils::redirect_path(&credentials.redirect_uri);

    let server = start_api_server(addr, &callback_path, Arc::clone(&shared_state))
        .await
        .map_err(|e| ApiError::Auth(format!("Cannot listen on {}: {}", addr, e)))?;

    open_browser(auth_url);

    let result = wait_for_token(shared_state, config::auth_timeout()).await;
    server.abort();
    result
}

async fn token_via_pasted_url(
    credentials: &Credentials,
    auth_url: &str,
    state: &str,
) -> Result<Token, ApiError> {
    open_browser(auth_url);
    info!("After granting access, paste the URL you were redirected to:");

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .map_err(|e| ApiError::Auth(e.to_string()))?;

    let params = utils::parse_redirect_url(line.trim()).map_err(ApiError::Auth)?;
    complete_authorization(&config::spotify_apitoken_url(), credentials, state, params).await
}

fn open_browser(auth_url: &str) {
    info!("Opening browser for Spotify authorization...");
    if webbrowser::open(auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }
}

/// Polls the shared state until the callback handler stored a token or an
/// error, or `max_wait` elapses.
async fn wait_for_token(
    shared_state: Arc<Mutex<PendingAuth>>,
    max_wait: Duration,
) -> Result<Token, ApiError> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(token) = &lock.token {
            return Ok(token.clone());
        }
        if let Some(err) = &lock.error {
            return Err(ApiError::Auth(err.clone()));
        }
        drop(lock);
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    Err(ApiError::Auth("Authentication failed or timed out.".to_string()))
}

/// Validates the parameters Spotify redirected with and exchanges the code.
///
/// Shared by the callback server and the pasted-URL path.
pub async fn complete_authorization(
    token_url: &str,
    credentials: &Credentials,
    expected_state: &str,
    params: RedirectParams,
) -> Result<Token, ApiError> {
    let code = utils::validate_redirect(params, expected_state).map_err(ApiError::Auth)?;
    exchange_code(token_url, credentials, &code).await
}

/// Exchanges an authorization code for a token.
///
/// The client authenticates with HTTP Basic credentials, so the secret never
/// appears in the request body.
pub async fn exchange_code(
    token_url: &str,
    credentials: &Credentials,
    code: &str,
) -> Result<Token, ApiError> {
    let client = Client::new();
    let res = client
        .post(token_url)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", credentials.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let res = check_status(res).await?;
    let body: TokenResponse = res.json().await?;
    Ok(token_from_response(body, None))
}

/// Refreshes an expired access token.
///
/// Spotify may omit the refresh token and scope from the response; the values
/// of `current` are carried over in that case.
pub async fn refresh_token(
    token_url: &str,
    credentials: &Credentials,
    current: &Token,
) -> Result<Token, ApiError> {
    if current.refresh_token.is_empty() {
        return Err(ApiError::Auth(
            "Cached token cannot be refreshed. Delete the token cache and run again.".to_string(),
        ));
    }

    let client = Client::new();
    let res = client
        .post(token_url)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", current.refresh_token.as_str()),
        ])
        .send()
        .await?;

    let res = check_status(res).await?;
    let body: TokenResponse = res.json().await?;
    Ok(token_from_response(body, Some(current)))
}

/// Builds a cache entry from a token endpoint response, stamped with the
/// current time.
pub fn token_from_response(body: TokenResponse, previous: Option<&Token>) -> Token {
    Token {
        access_token: body.access_token,
        refresh_token: body
            .refresh_token
            .or_else(|| previous.map(|t| t.refresh_token.clone()))
            .unwrap_or_default(),
        scope: body
            .scope
            .or_else(|| previous.map(|t| t.scope.clone()))
            .unwrap_or_else(|| config::SPOTIFY_SCOPE.to_string()),
        expires_in: body.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    }
}
