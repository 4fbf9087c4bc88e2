//! REST API endpoint handlers for the Observer server.
//!
//! Read handlers take the station's read lock; the two mutating handlers
//! (`accept` and `refresh`) take the write lock so each transition runs
//! whole. Offer generation is the one slow operation in the system, so
//! `refresh` flips the in-flight flag under the lock, drops it, and runs
//! the generation fan-out in a spawned task.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/station` | Full station snapshot |
//! | `GET` | `/api/quests` | Contracts on the offer board |
//! | `GET` | `/api/process` | The active process, if any |
//! | `GET` | `/api/log` | Operations log, newest first |
//! | `POST` | `/api/quests/{id}/accept` | Accept a contract |
//! | `POST` | `/api/quests/refresh` | Request a new offer batch |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use foundry_core::AcceptOutcome;
use foundry_types::QuestId;
use tracing::info;
use uuid::Uuid;

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing station status and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let station = state.station.read().await;
    let day = station.day();
    let ledger = station.ledger();
    let offers = station.offers().len();
    let process = station
        .active_process()
        .map_or_else(|| "Idle".to_owned(), |p| p.quest.title.clone());

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Orbital Artisan Foundry</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        li::before {{ content: "GET "; color: #7ee787; font-weight: bold; }}
        .status {{ color: #3fb950; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Orbital Artisan Foundry</h1>
    <p class="subtitle">Station monitoring server</p>

    <p>Status: <span class="status">RUNNING</span></p>

    <div>
        <div class="metric">
            <div class="label">Day</div>
            <div class="value">{day}</div>
        </div>
        <div class="metric">
            <div class="label">Cash</div>
            <div class="value">{cash}</div>
        </div>
        <div class="metric">
            <div class="label">Materials</div>
            <div class="value">{materials}</div>
        </div>
        <div class="metric">
            <div class="label">Power</div>
            <div class="value">{power}</div>
        </div>
        <div class="metric">
            <div class="label">Research</div>
            <div class="value">{research}</div>
        </div>
        <div class="metric">
            <div class="label">Offers</div>
            <div class="value">{offers}</div>
        </div>
        <div class="metric">
            <div class="label">Bay</div>
            <div class="value">{process}</div>
        </div>
    </div>

    <hr>

    <h2>API Endpoints</h2>
    <ul>
        <li><a href="/api/station">/api/station</a> -- Full station snapshot</li>
        <li><a href="/api/quests">/api/quests</a> -- Contracts on the offer board</li>
        <li><a href="/api/process">/api/process</a> -- The active process</li>
        <li><a href="/api/log">/api/log</a> -- Operations log</li>
    </ul>

    <h2>WebSocket</h2>
    <ul>
        <li style="list-style:none;"><code>ws://host:port/ws/days</code> -- Live day summary stream</li>
    </ul>
</body>
</html>"#,
        cash = ledger.cash,
        materials = ledger.materials,
        power = ledger.power,
        research = ledger.research_points,
    ))
}

// ---------------------------------------------------------------------------
// GET /api/station -- full station snapshot
// ---------------------------------------------------------------------------

/// Return the full station snapshot: day, ledger, offers, process, and
/// log.
pub async fn get_station(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let station = state.station.read().await;

    Ok(Json(serde_json::json!({
        "day": station.day(),
        "ledger": station.ledger(),
        "offers": station.offers(),
        "process": station.active_process(),
        "generating_offers": station.is_generating_offers(),
        "log": station.log_entries(),
    })))
}

// ---------------------------------------------------------------------------
// GET /api/quests -- the offer board
// ---------------------------------------------------------------------------

/// List the contracts currently on the offer board.
pub async fn list_quests(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let station = state.station.read().await;
    let offers = station.offers();

    Ok(Json(serde_json::json!({
        "count": offers.len(),
        "generating": station.is_generating_offers(),
        "quests": offers,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/process -- the active process
// ---------------------------------------------------------------------------

/// Return the active process, or `null` when the bay is idle.
pub async fn get_process(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let station = state.station.read().await;

    Ok(Json(serde_json::json!({
        "process": station.active_process(),
    })))
}

// ---------------------------------------------------------------------------
// GET /api/log -- operations log
// ---------------------------------------------------------------------------

/// Return the operations log, newest entry first.
pub async fn get_log(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let station = state.station.read().await;
    let entries = station.log_entries();

    Ok(Json(serde_json::json!({
        "count": entries.len(),
        "entries": entries,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/quests/{id}/accept -- accept a contract
// ---------------------------------------------------------------------------

/// Accept a contract from the offer board.
///
/// Returns `200` with the started process, `404` if the id is not on the
/// board, or `409` if the bay is busy or materials are short.
pub async fn accept_quest(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ObserverError> {
    let id = QuestId::from(parse_uuid(&id_str)?);

    let mut station = state.station.write().await;
    match station.accept_quest(id) {
        AcceptOutcome::Started => Ok(Json(serde_json::json!({
            "outcome": "started",
            "process": station.active_process(),
        }))),
        AcceptOutcome::ProcessBusy => Err(ObserverError::Conflict(
            "a process is already in progress".to_owned(),
        )),
        AcceptOutcome::InsufficientMaterials => Err(ObserverError::Conflict(
            "insufficient materials for this contract".to_owned(),
        )),
        AcceptOutcome::UnknownQuest => {
            Err(ObserverError::NotFound(format!("quest {id}")))
        }
    }
}

// ---------------------------------------------------------------------------
// POST /api/quests/refresh -- request a new offer batch
// ---------------------------------------------------------------------------

/// Request a new batch of contracts for the offer board.
///
/// Returns `202` when generation starts; the batch lands on the board
/// when the fan-out completes. Returns `409` while a generation is
/// already in flight, while offers remain on the board, or while a
/// process is running.
pub async fn refresh_quests(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let level = {
        let mut station = state.station.write().await;
        if !station.begin_offer_refresh() {
            return Err(ObserverError::Conflict(
                "offer refresh is not available right now".to_owned(),
            ));
        }
        station.level()
    };

    let generator = Arc::clone(&state.generator);
    let station = Arc::clone(&state.station);
    let count = state.offer_count;

    tokio::spawn(async move {
        let offers = generator.generate_offers(level, count).await;
        info!(count = offers.len(), "offer batch generated");
        station.write().await.commit_offers(offers);
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(serde_json::json!({ "status": "generating" })),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a UUID from a string, returning an [`ObserverError`] on failure.
fn parse_uuid(s: &str) -> Result<Uuid, ObserverError> {
    s.parse::<Uuid>()
        .map_err(|e| ObserverError::InvalidUuid(format!("{s}: {e}")))
}
