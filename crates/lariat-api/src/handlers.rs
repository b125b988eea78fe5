//! Greeter handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::{error, info};

use crate::ApiState;

/// Names `/client` greets, in order.
pub const CLIENT_NAMES: [&str; 8] = [
    "Ray", "Dave", "Bob", "Paul", "Tammie", "Kimly", "Holden", "Cornelia",
];

// ── Greeting ───────────────────────────────────────────────────

/// GET /greet/{name}
pub async fn greet(Path(name): Path<String>) -> String {
    info!(%name, "greeting");
    format!("hello, {name}!")
}

// ── Self-calling client ────────────────────────────────────────

/// GET /client
///
/// Greets every name in [`CLIENT_NAMES`] through the server's own
/// greet endpoint, one call at a time, and returns the collected
/// bodies. The first failing call aborts the rest.
pub async fn client(State(state): State<ApiState>) -> impl IntoResponse {
    let base = state.self_url.trim_end_matches('/');
    let mut greetings = Vec::with_capacity(CLIENT_NAMES.len());

    for name in CLIENT_NAMES {
        let url = format!("{base}/greet/{name}");
        match fetch_greeting(&state.http, &url).await {
            Ok(body) => greetings.push(body),
            Err(e) => {
                error!(%name, error = %e, "self greet call failed");
                return (StatusCode::BAD_GATEWAY, e).into_response();
            }
        }
    }

    Json(greetings).into_response()
}

async fn fetch_greeting(http: &reqwest::Client, url: &str) -> Result<String, String> {
    http.get(url)
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?
        .text()
        .await
        .map_err(|e| e.to_string())
}

// ── Liveness ───────────────────────────────────────────────────

/// GET /healthz
pub async fn healthz() -> &'static str {
    "ok"
}
