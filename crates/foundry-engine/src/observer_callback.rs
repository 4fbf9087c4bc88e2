//! Day callback that feeds the Observer API.
//!
//! After each day, this callback projects the [`DaySummary`] into a
//! [`DayBroadcast`] and pushes it to all connected `WebSocket` clients.
//! REST reads need no push -- they read the shared station directly.

use std::sync::Arc;

use foundry_core::runner::DayCallback;
use foundry_core::{DaySummary, Station};
use foundry_observer::state::{AppState, DayBroadcast};
use tracing::debug;

/// Callback that bridges the game loop to the Observer API.
pub struct ObserverCallback {
    state: Arc<AppState>,
}

impl ObserverCallback {
    /// Create a new observer callback backed by the given app state.
    pub const fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

impl DayCallback for ObserverCallback {
    fn on_day(&mut self, summary: &DaySummary, station: &Station) {
        let broadcast = DayBroadcast {
            day: summary.day,
            ledger: station.ledger(),
            process: summary.process.clone(),
            completed: summary.completed.as_ref().map(|c| c.title.clone()),
        };

        let receivers = self.state.broadcast(&broadcast);
        debug!(day = summary.day, receivers, "day broadcast sent");
    }
}
