//! lariat-api — HTTP greeter endpoints.
//!
//! # Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/greet/{name}` | Greet one name in plain text |
//! | GET | `/client` | Greet the fixed name list through the server itself |
//! | GET | `/healthz` | Liveness probe |

pub mod handlers;

use axum::routing::get;
use axum::Router;

/// Shared state for greeter handlers.
#[derive(Clone)]
pub struct ApiState {
    /// Client `/client` uses to call back into this server.
    pub http: reqwest::Client,
    /// Base URL the self-calls go through.
    pub self_url: String,
}

/// Build the greeter router.
pub fn build_router(self_url: String) -> Router {
    let state = ApiState {
        http: reqwest::Client::new(),
        self_url,
    };

    Router::new()
        .route("/greet/{name}", get(handlers::greet))
        .route("/client", get(handlers::client))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}
