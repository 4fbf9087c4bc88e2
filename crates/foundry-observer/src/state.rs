//! Shared application state for the Observer API server.
//!
//! [`AppState`] holds the broadcast channel for day summaries, the
//! shared [`Station`] behind a read-write lock, and the quest generator.
//! REST reads take the read half of the lock; the two mutating endpoints
//! and the game loop take the write half, so every transition is applied
//! whole before any reader can observe it.

use std::sync::Arc;

use foundry_core::Station;
use foundry_quests::QuestGenerator;
use foundry_types::{ActiveProcess, ResourceLedger};
use tokio::sync::{RwLock, broadcast};

/// Capacity of the broadcast channel for day summaries.
///
/// If a subscriber falls behind by more than this many messages it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest message.
const BROADCAST_CAPACITY: usize = 256;

/// JSON-serializable day summary pushed over the `WebSocket`.
///
/// A lightweight projection of [`foundry_core::DaySummary`] plus the
/// ledger, so a dashboard can repaint its counters without a follow-up
/// REST call.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DayBroadcast {
    /// The day number that just started.
    pub day: u64,
    /// Resource counters after the tick.
    pub ledger: ResourceLedger,
    /// The active process after the tick, if one remains.
    pub process: Option<ActiveProcess>,
    /// Title of the contract that completed this tick, if any.
    pub completed: Option<String>,
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Broadcast sender for day summary messages.
    pub tx: broadcast::Sender<DayBroadcast>,
    /// The station, shared with the game loop.
    pub station: Arc<RwLock<Station>>,
    /// The contract generator used by the refresh endpoint.
    pub generator: Arc<QuestGenerator>,
    /// Number of contracts generated per board refresh.
    pub offer_count: usize,
}

impl AppState {
    /// Create a new application state around a shared station.
    pub fn new(
        station: Arc<RwLock<Station>>,
        generator: Arc<QuestGenerator>,
        offer_count: usize,
    ) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            tx,
            station,
            generator,
            offer_count,
        }
    }

    /// Subscribe to the day broadcast channel.
    pub fn subscribe(&self) -> broadcast::Receiver<DayBroadcast> {
        self.tx.subscribe()
    }

    /// Publish a day summary to all connected clients.
    ///
    /// Returns the number of receivers that received the message.
    /// Returns 0 if no clients are connected (this is not an error).
    pub fn broadcast(&self, summary: &DayBroadcast) -> usize {
        // send returns Err only when there are zero receivers, which is
        // normal when no WebSocket clients are connected.
        self.tx.send(summary.clone()).unwrap_or(0)
    }
}
