//! Axum router construction for the Observer API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the Observer server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /ws/days` -- `WebSocket` day summary stream
/// - `GET /api/station` -- full station snapshot
/// - `GET /api/quests` -- offer board
/// - `GET /api/process` -- active process
/// - `GET /api/log` -- operations log
/// - `POST /api/quests/{id}/accept` -- accept a contract
/// - `POST /api/quests/refresh` -- request a new offer batch
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws/days", get(ws::ws_days))
        // REST API
        .route("/api/station", get(handlers::get_station))
        .route("/api/quests", get(handlers::list_quests))
        .route("/api/process", get(handlers::get_process))
        .route("/api/log", get(handlers::get_log))
        .route("/api/quests/refresh", post(handlers::refresh_quests))
        .route("/api/quests/{id}/accept", post(handlers::accept_quest))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
