//! The game loop: a wall-clock tick source driving the station.
//!
//! One simulated day passes per `tick_interval_ms` of real time. Ticks
//! are best-effort: if the host stalls, days are simply late -- there is
//! no catch-up. The loop is decoupled from the state machine so tests
//! can call [`Station::advance_day`] synchronously without waiting on
//! real time.
//!
//! The station lives behind an [`RwLock`] shared with the observer API;
//! each tick takes the write lock for exactly one `advance_day` call, so
//! ticks and user intents never interleave partially.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::clock::ClockError;
use crate::station::{DaySummary, Station};

/// Errors that can occur while running the game loop.
#[derive(Debug, thiserror::Error)]
pub enum GameLoopError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },
}

/// Why the game loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEndReason {
    /// The configured `max_days` bound was reached.
    MaxDaysReached,
}

/// Result of a bounded game-loop run.
#[derive(Debug)]
pub struct GameLoopResult {
    /// Why the loop stopped.
    pub end_reason: GameEndReason,
    /// Number of ticks executed.
    pub total_days: u64,
}

/// Callback invoked after each day completes.
///
/// Implementations use this to broadcast day summaries to observer
/// clients. The callback runs while the station write lock is held, so
/// it must not block.
pub trait DayCallback: Send {
    /// Called after a day's tick completes successfully.
    fn on_day(&mut self, summary: &DaySummary, station: &Station);
}

/// A no-op day callback for testing.
pub struct NoOpCallback;

impl DayCallback for NoOpCallback {
    fn on_day(&mut self, _summary: &DaySummary, _station: &Station) {}
}

/// Run the game loop until the optional `max_days` bound is reached.
///
/// With `max_days: None` the loop runs for the lifetime of the session
/// and this function never returns normally.
///
/// # Errors
///
/// Returns [`GameLoopError::Clock`] if the day counter overflows.
pub async fn run_game_loop(
    station: &Arc<RwLock<Station>>,
    tick_interval_ms: u64,
    max_days: Option<u64>,
    callback: &mut dyn DayCallback,
) -> Result<GameLoopResult, GameLoopError> {
    let mut total_days: u64 = 0;

    info!(tick_interval_ms, ?max_days, "game loop starting");

    loop {
        if tick_interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(tick_interval_ms)).await;
        }

        {
            let mut guard = station.write().await;
            let summary = guard.advance_day()?;
            callback.on_day(&summary, &guard);
        }

        total_days = total_days.saturating_add(1);

        if let Some(bound) = max_days
            && total_days >= bound
        {
            info!(total_days, "max_days reached, game loop stopping");
            return Ok(GameLoopResult {
                end_reason: GameEndReason::MaxDaysReached,
                total_days,
            });
        }
    }
}
