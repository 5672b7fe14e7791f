use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{spotify, types::PendingAuth, utils::RedirectParams, warning};

/// Answers the OAuth redirect.
///
/// The shared state is only locked to read the flow parameters and to store
/// the outcome, never across the token exchange.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<PendingAuth>>>,
) -> Html<&'static str> {
    let params = RedirectParams::from_query(&params);

    let (credentials, expected_state, token_url) = {
        let pending = shared_state.lock().await;
        if pending.token.is_some() {
            return Html("<h4>Already authenticated.</h4><p>Close browser window.</p>");
        }
        (
            pending.credentials.clone(),
            pending.state.clone(),
            pending.token_url.clone(),
        )
    };

    let result =
        spotify::auth::complete_authorization(&token_url, &credentials, &expected_state, params)
            .await;

    let mut pending = shared_state.lock().await;
    match result {
        Ok(token) => {
            pending.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            pending.error = Some(e.to_string());
            Html("<h4>Login failed.</h4><p>Return to the terminal for details.</p>")
        }
    }
}
