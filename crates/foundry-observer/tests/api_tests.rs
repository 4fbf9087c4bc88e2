//! Integration tests for the Observer API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. The generator is offline, so refresh tests
//! exercise the fallback path deterministically.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use foundry_core::{FoundryConfig, Station};
use foundry_observer::router::build_router;
use foundry_observer::state::AppState;
use foundry_quests::QuestGenerator;
use foundry_types::{Quest, QuestId, QuestOrigin, QuestRequirements, QuestReward};
use serde_json::Value;
use tokio::sync::RwLock;
use tower::ServiceExt;

fn make_quest(materials: u64, time_days: u64) -> Quest {
    Quest {
        id: QuestId::new(),
        origin: QuestOrigin::Generated,
        title: String::from("Vapor-Deposited Lens Array"),
        client: String::from("Astra Dynamics"),
        description: String::from("Optics that cannot survive a 1 g cooldown."),
        requirements: QuestRequirements {
            materials,
            time_days,
        },
        reward: QuestReward {
            cash: 25_000,
            research: 40,
        },
        generated_at: Utc::now(),
    }
}

fn make_state(offers: Vec<Quest>) -> Arc<AppState> {
    let mut station = Station::new(&FoundryConfig::default());
    if !offers.is_empty() {
        assert!(station.begin_offer_refresh());
        station.commit_offers(offers);
    }
    Arc::new(AppState::new(
        Arc::new(RwLock::new(station)),
        Arc::new(QuestGenerator::offline()),
        3,
    ))
}

async fn get_json(state: Arc<AppState>, uri: &str) -> (StatusCode, Value) {
    let router = build_router(state);
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

async fn post_json(state: Arc<AppState>, uri: &str) -> (StatusCode, Value) {
    let router = build_router(state);
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn station_snapshot_shows_seed_state() {
    let state = make_state(Vec::new());
    let (status, json) = get_json(state, "/api/station").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["day"], 1);
    assert_eq!(json["ledger"]["cash"], 50_000);
    assert_eq!(json["ledger"]["materials"], 1_000);
    assert!(json["process"].is_null());
    assert_eq!(json["offers"].as_array().unwrap().len(), 0);
    // The welcome line is in the log.
    assert_eq!(json["log"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn quest_board_lists_offers() {
    let state = make_state(vec![make_quest(100, 5), make_quest(200, 8)]);
    let (status, json) = get_json(state, "/api/quests").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);
    assert_eq!(json["generating"], false);
    assert_eq!(
        json["quests"][0]["title"],
        "Vapor-Deposited Lens Array"
    );
}

#[tokio::test]
async fn accepting_a_quest_starts_the_process() {
    let quest = make_quest(100, 5);
    let id = quest.id;
    let state = make_state(vec![quest]);

    let (status, json) = post_json(Arc::clone(&state), &format!("/api/quests/{id}/accept")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "started");
    assert_eq!(json["process"]["days_remaining"], 5);

    let (_, json) = get_json(state, "/api/station").await;
    assert_eq!(json["ledger"]["materials"], 900);
    assert_eq!(json["offers"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn accepting_while_busy_is_a_conflict() {
    let first = make_quest(100, 5);
    let first_id = first.id;
    let state = make_state(vec![first]);

    let (status, _) =
        post_json(Arc::clone(&state), &format!("/api/quests/{first_id}/accept")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) =
        post_json(state, &format!("/api/quests/{}/accept", QuestId::new())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["error"].as_str().unwrap().contains("in progress"));
}

#[tokio::test]
async fn accepting_an_unknown_quest_is_not_found() {
    let state = make_state(vec![make_quest(100, 5)]);
    let (status, _) = post_json(state, &format!("/api/quests/{}/accept", QuestId::new())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn accepting_with_a_malformed_id_is_a_bad_request() {
    let state = make_state(vec![make_quest(100, 5)]);
    let (status, _) = post_json(state, "/api/quests/not-a-uuid/accept").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn refresh_is_rejected_while_offers_remain() {
    let state = make_state(vec![make_quest(100, 5)]);
    let (status, _) = post_json(state, "/api/quests/refresh").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn refresh_fills_the_board_with_the_configured_count() {
    let state = make_state(Vec::new());

    let (status, json) = post_json(Arc::clone(&state), "/api/quests/refresh").await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json["status"], "generating");

    // The offline generator resolves immediately; wait for the spawned
    // task to commit the batch.
    let mut offers = 0;
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        let station = state.station.read().await;
        if !station.is_generating_offers() {
            offers = station.offers().len();
            break;
        }
    }
    assert_eq!(offers, 3);
}

#[tokio::test]
async fn log_endpoint_returns_newest_first() {
    let quest = make_quest(100, 1);
    let id = quest.id;
    let state = make_state(vec![quest]);

    let (status, _) = post_json(Arc::clone(&state), &format!("/api/quests/{id}/accept")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = get_json(state, "/api/log").await;
    assert_eq!(status, StatusCode::OK);
    let entries = json["entries"].as_array().unwrap();
    assert!(
        entries[0]["message"]
            .as_str()
            .unwrap()
            .starts_with("Manufacturing of")
    );
}
