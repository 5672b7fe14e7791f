use std::{
    collections::HashMap,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;

use crate::types::Credentials;

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

pub fn build_authorize_url(
    auth_url: &str,
    credentials: &Credentials,
    scope: &str,
    state: &str,
) -> Result<String, String> {
    let url = Url::parse_with_params(
        auth_url,
        &[
            ("client_id", credentials.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", credentials.redirect_uri.as_str()),
            ("scope", scope),
            ("state", state),
        ],
    )
    .map_err(|e| format!("Invalid authorization URL {}: {}", auth_url, e))?;

    Ok(url.to_string())
}

/// Address to serve the OAuth callback on, if the redirect URI allows it.
///
/// Only plain `http` redirects to a loopback host with an explicit port can
/// be answered locally; everything else needs the user to paste the URL.
pub fn redirect_listener(redirect_uri: &str) -> Option<SocketAddr> {
    let url = Url::parse(redirect_uri).ok()?;
    if url.scheme() != "http" {
        return None;
    }

    let port = url.port()?;
    let host = url.host_str()?.trim_start_matches('[').trim_end_matches(']');
    let ip = if host.eq_ignore_ascii_case("localhost") {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    } else {
        host.parse::<IpAddr>().ok().filter(|ip| ip.is_loopback())?
    };

    Some(SocketAddr::new(ip, port))
}

/// Path component of the redirect URI, `/` when there is none.
pub fn redirect_path(redirect_uri: &str) -> String {
    match Url::parse(redirect_uri) {
        Ok(url) if !url.path().is_empty() => url.path().to_string(),
        _ => "/".to_string(),
    }
}

/// Query parameters Spotify appends to the redirect URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

impl RedirectParams {
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        Self {
            code: query.get("code").cloned(),
            state: query.get("state").cloned(),
            error: query.get("error").cloned(),
        }
    }
}

pub fn parse_redirect_url(redirect_url: &str) -> Result<RedirectParams, String> {
    let url = Url::parse(redirect_url).map_err(|e| format!("Invalid redirect URL: {}", e))?;
    let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
    Ok(RedirectParams::from_query(&query))
}

/// Returns the authorization code if the redirect belongs to this flow.
pub fn validate_redirect(params: RedirectParams, expected_state: &str) -> Result<String, String> {
    if let Some(error) = params.error {
        return Err(format!("Authorization denied: {}", error));
    }

    if params.state.as_deref() != Some(expected_state) {
        return Err("State mismatch in authorization response.".to_string());
    }

    match params.code {
        Some(code) if !code.is_empty() => Ok(code),
        _ => Err("Missing authorization code.".to_string()),
    }
}

pub fn join_artist_names(artists: &[String]) -> String {
    artists.join(", ")
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
