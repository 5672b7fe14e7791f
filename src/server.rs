use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, sync::Arc};
use tokio::{sync::Mutex, task::JoinHandle};

use crate::{api, types::PendingAuth, warning};

/// Binds the OAuth callback server and serves it on a background task.
///
/// Binding happens before this returns, so a port already in use is reported
/// to the caller instead of being lost inside the task. Abort the returned
/// handle once the flow is over.
pub async fn start_api_server(
    addr: SocketAddr,
    callback_path: &str,
    state: Arc<Mutex<PendingAuth>>,
) -> std::io::Result<JoinHandle<()>> {
    let app = Router::new().route(callback_path, get(api::callback).layer(Extension(state)));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    Ok(tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            warning!("Callback server stopped: {}", e);
        }
    }))
}
