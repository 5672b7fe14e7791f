use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use axum::{
    Extension, Form, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{get, post},
};
use chrono::Utc;
use serde_json::{Value, json};
use spotistats::management::TokenManager;
use spotistats::spotify::{ApiError, SpotifyClient, StatsApi};
use spotistats::types::{Credentials, PendingAuth, TimeRange, Token};
use tempfile::TempDir;
use tokio::sync::Mutex;

/// Requests seen by the fake Spotify server: path, query or form fields, and
/// the `Authorization` header.
#[derive(Clone, Default)]
struct Recorded {
    requests: Arc<std::sync::Mutex<Vec<(String, HashMap<String, String>, String)>>>,
}

impl Recorded {
    fn push(&self, path: &str, query: HashMap<String, String>, headers: &HeaderMap) {
        let auth = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.requests
            .lock()
            .unwrap()
            .push((path.to_string(), query, auth));
    }

    fn all(&self) -> Vec<(String, HashMap<String, String>, String)> {
        self.requests.lock().unwrap().clone()
    }
}

// Serves `app` on an ephemeral loopback port and returns its base URL
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn create_test_credentials() -> Credentials {
    Credentials {
        client_id: "client123".to_string(),
        client_secret: "secret456".to_string(),
        redirect_uri: "http://localhost:9999/cb".to_string(),
    }
}

fn create_test_token(access_token: &str, obtained_at: u64) -> Token {
    Token {
        access_token: access_token.to_string(),
        refresh_token: "refresh-abc".to_string(),
        scope: "user-top-read user-read-private".to_string(),
        expires_in: 3600,
        obtained_at,
    }
}

fn fresh_tokens(dir: &TempDir) -> TokenManager {
    let now = Utc::now().timestamp() as u64;
    TokenManager::new(create_test_token("live-token", now), dir.path().join(".cache"))
}

fn expired_tokens(dir: &TempDir) -> TokenManager {
    let long_ago = Utc::now().timestamp() as u64 - 7200;
    TokenManager::new(create_test_token("stale-token", long_ago), dir.path().join(".cache"))
}

async fn me(State(rec): State<Recorded>, headers: HeaderMap) -> Json<Value> {
    rec.push("/me", HashMap::new(), &headers);
    Json(json!({
        "id": "user-id",
        "display_name": "Listener",
        "followers": { "total": 42 }
    }))
}

async fn top_artists(
    State(rec): State<Recorded>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    rec.push("/me/top/artists", query, &headers);
    Json(json!({
        "items": [
            { "id": "a1", "name": "Artist 1" },
            { "id": "a2", "name": "Artist 2" }
        ],
        "total": 2
    }))
}

async fn top_tracks(
    State(rec): State<Recorded>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    rec.push("/me/top/tracks", query, &headers);
    Json(json!({
        "items": [
            { "id": "t1", "name": "Track 1", "artists": [{ "id": "a1", "name": "Artist 1" }] }
        ],
        "total": 1
    }))
}

fn stats_router(rec: Recorded) -> Router {
    Router::new()
        .route("/me", get(me))
        .route("/me/top/artists", get(top_artists))
        .route("/me/top/tracks", get(top_tracks))
        .with_state(rec)
}

#[tokio::test]
async fn test_top_items_send_time_range_and_limit() {
    let rec = Recorded::default();
    let api_url = serve(stats_router(rec.clone())).await;
    let dir = TempDir::new().unwrap();
    let mut client =
        SpotifyClient::with_api_url(create_test_credentials(), fresh_tokens(&dir), api_url);

    let artists = client.top_artists(TimeRange::LongTerm, 5).await.unwrap();
    let tracks = client.top_tracks(TimeRange::ShortTerm, 5).await.unwrap();

    assert_eq!(artists.items.len(), 2);
    assert_eq!(artists.items[0].name, "Artist 1");
    assert_eq!(tracks.items[0].artists[0].name, "Artist 1");

    let requests = rec.all();
    assert_eq!(requests.len(), 2);

    let (path, query, auth) = &requests[0];
    assert_eq!(path, "/me/top/artists");
    assert_eq!(query["time_range"], "long_term");
    assert_eq!(query["limit"], "5");
    assert_eq!(auth, "Bearer live-token");

    let (path, query, _) = &requests[1];
    assert_eq!(path, "/me/top/tracks");
    assert_eq!(query["time_range"], "short_term");
    assert_eq!(query["limit"], "5");
}

#[tokio::test]
async fn test_current_user_decodes_profile() {
    let rec = Recorded::default();
    let api_url = serve(stats_router(rec.clone())).await;
    let dir = TempDir::new().unwrap();
    let mut client =
        SpotifyClient::with_api_url(create_test_credentials(), fresh_tokens(&dir), api_url);

    let user = client.current_user().await.unwrap();

    assert_eq!(user.id, "user-id");
    assert_eq!(user.display_name.as_deref(), Some("Listener"));
    assert_eq!(user.followers.total, 42);
}

#[tokio::test]
async fn test_unauthorized_uses_spotify_error_message() {
    let app = Router::new().route(
        "/me",
        get(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": { "status": 401, "message": "The access token expired" } })),
            )
        }),
    );
    let api_url = serve(app).await;
    let dir = TempDir::new().unwrap();
    let mut client =
        SpotifyClient::with_api_url(create_test_credentials(), fresh_tokens(&dir), api_url);

    let result = client.current_user().await;

    match result {
        Err(ApiError::Status { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "The access token expired");
        }
        other => panic!("expected a status error, got {:?}", other.map(|u| u.id)),
    }
}

#[tokio::test]
async fn test_rate_limited_without_body_uses_reason() {
    let app = Router::new().route(
        "/me/top/tracks",
        get(|| async { StatusCode::TOO_MANY_REQUESTS }),
    );
    let api_url = serve(app).await;
    let dir = TempDir::new().unwrap();
    let mut client =
        SpotifyClient::with_api_url(create_test_credentials(), fresh_tokens(&dir), api_url);

    let err = client
        .top_tracks(TimeRange::ShortTerm, 5)
        .await
        .err()
        .unwrap();

    assert!(matches!(err, ApiError::Status { status: 429, .. }));
    assert_eq!(err.to_string(), "http status: 429, Too Many Requests");
}

#[tokio::test]
async fn test_expired_token_is_refreshed_before_request() {
    let rec = Recorded::default();
    let token_calls = Recorded::default();
    let token_route = {
        let token_calls = token_calls.clone();
        post(move |headers: HeaderMap, Form(form): Form<HashMap<String, String>>| {
            let token_calls = token_calls.clone();
            async move {
                token_calls.push("/api/token", form, &headers);
                // no refresh_token or scope in the answer, like Spotify often does
                Json(json!({ "access_token": "new-token", "expires_in": 3600 }))
            }
        })
    };
    let app = stats_router(rec.clone()).route("/api/token", token_route);
    let base_url = serve(app).await;

    let dir = TempDir::new().unwrap();
    let tokens = expired_tokens(&dir).with_token_url(format!("{}/api/token", base_url));
    let mut client = SpotifyClient::with_api_url(create_test_credentials(), tokens, &base_url);

    client.current_user().await.unwrap();

    let refreshes = token_calls.all();
    assert_eq!(refreshes.len(), 1);
    let (_, form, auth) = &refreshes[0];
    assert_eq!(form["grant_type"], "refresh_token");
    assert_eq!(form["refresh_token"], "refresh-abc");
    assert!(auth.starts_with("Basic "));

    let (_, _, auth) = &rec.all()[0];
    assert_eq!(auth, "Bearer new-token");

    let cached: Token =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join(".cache")).unwrap())
            .unwrap();
    assert_eq!(cached.access_token, "new-token");
    assert_eq!(cached.refresh_token, "refresh-abc");
    assert_eq!(cached.scope, "user-top-read user-read-private");
    assert!(!cached.is_expired());
}

#[tokio::test]
async fn test_refresh_error_uses_oauth_description() {
    let app = Router::new().route(
        "/api/token",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid_grant", "error_description": "Refresh token revoked" })),
            )
        }),
    );
    let base_url = serve(app).await;
    let dir = TempDir::new().unwrap();
    let mut tokens = expired_tokens(&dir).with_token_url(format!("{}/api/token", base_url));

    let err = tokens
        .get_valid_token(&create_test_credentials())
        .await
        .err()
        .unwrap();

    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "invalid_grant: Refresh token revoked");
        }
        other => panic!("expected a status error, got {}", other),
    }
}

#[tokio::test]
async fn test_refresh_still_succeeds_when_cache_write_fails() {
    let app = Router::new().route(
        "/api/token",
        post(|| async { Json(json!({ "access_token": "new-token", "expires_in": 3600 })) }),
    );
    let base_url = serve(app).await;

    let dir = TempDir::new().unwrap();
    // a regular file where the cache directory should be
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let long_ago = Utc::now().timestamp() as u64 - 7200;
    let mut tokens = TokenManager::new(
        create_test_token("stale-token", long_ago),
        blocker.join(".cache"),
    )
    .with_token_url(format!("{}/api/token", base_url));

    let access_token = tokens
        .get_valid_token(&create_test_credentials())
        .await
        .unwrap();

    assert_eq!(access_token, "new-token");
    assert_eq!(tokens.current_token().refresh_token, "refresh-abc");
    assert!(!blocker.join(".cache").exists());
}

// Builds a callback server whose token endpoint notes whether the shared
// state could be locked while the exchange was in flight.
async fn callback_server(state: &str) -> (String, Arc<Mutex<PendingAuth>>, Arc<AtomicBool>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let mut pending = PendingAuth::new(state.to_string(), create_test_credentials());
    pending.token_url = format!("{}/api/token", base_url);
    let shared = Arc::new(Mutex::new(pending));
    let unlocked_during_exchange = Arc::new(AtomicBool::new(false));

    let token_route = {
        let shared = Arc::clone(&shared);
        let flag = Arc::clone(&unlocked_during_exchange);
        post(move || {
            let shared = Arc::clone(&shared);
            let flag = Arc::clone(&flag);
            async move {
                flag.store(shared.try_lock().is_ok(), Ordering::SeqCst);
                Json(json!({
                    "access_token": "callback-token",
                    "refresh_token": "callback-refresh",
                    "scope": "user-top-read user-read-private",
                    "expires_in": 3600
                }))
            }
        })
    };

    let app = Router::new()
        .route(
            "/cb",
            get(spotistats::api::callback).layer(Extension(Arc::clone(&shared))),
        )
        .route("/api/token", token_route);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (base_url, shared, unlocked_during_exchange)
}

#[tokio::test]
async fn test_callback_releases_state_during_exchange() {
    let (base_url, shared, unlocked_during_exchange) = callback_server("xyz").await;

    let body = reqwest::get(format!("{}/cb?code=abc&state=xyz", base_url))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Authentication successful"));
    assert!(unlocked_during_exchange.load(Ordering::SeqCst));

    let pending = shared.lock().await;
    let token = pending.token.as_ref().unwrap();
    assert_eq!(token.access_token, "callback-token");
    assert_eq!(token.refresh_token, "callback-refresh");
    assert!(pending.error.is_none());
}

#[tokio::test]
async fn test_callback_state_mismatch_records_error() {
    let (base_url, shared, _) = callback_server("xyz").await;

    let body = reqwest::get(format!("{}/cb?code=abc&state=forged", base_url))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Login failed"));
    let pending = shared.lock().await;
    assert!(pending.token.is_none());
    assert!(pending.error.as_deref().unwrap().contains("State mismatch"));
}
