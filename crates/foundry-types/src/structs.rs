//! Core entity structs for the Foundry simulation.
//!
//! These are plain data carriers: all mutation goes through the station
//! state machine in `foundry-core`. Everything here is serializable and
//! exported to `TypeScript` for the dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ProcessKind, QuestOrigin};
use crate::ids::QuestId;

// ---------------------------------------------------------------------------
// Resource ledger
// ---------------------------------------------------------------------------

/// The station's resource counters.
///
/// Non-negativity is guaranteed by the unsigned types; the ledger is
/// mutated only by initial seeding, quest acceptance (materials debit),
/// and process completion (cash/research credit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ResourceLedger {
    /// Credits on hand.
    pub cash: u64,
    /// Raw materials in kilograms.
    pub materials: u64,
    /// Available power in kilowatts. Held for display; no transition
    /// consumes it yet.
    pub power: u64,
    /// Accumulated research points.
    pub research_points: u64,
}

// ---------------------------------------------------------------------------
// Quests
// ---------------------------------------------------------------------------

/// What a contract costs to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QuestRequirements {
    /// Raw materials debited at acceptance, in kilograms.
    pub materials: u64,
    /// Manufacturing duration in simulated days.
    pub time_days: u64,
}

/// What a completed contract pays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QuestReward {
    /// Credits paid on delivery.
    pub cash: u64,
    /// Research points granted on delivery.
    pub research: u64,
}

/// A manufacturing contract offered to the station.
///
/// Quests are immutable once created. One is destroyed by being accepted
/// (it moves into the active process) and the rest of the offer set is
/// discarded with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Quest {
    /// Unique contract identifier.
    pub id: QuestId,
    /// Whether this quest came from the generation boundary or the
    /// local fallback.
    pub origin: QuestOrigin,
    /// Name of the manufactured item.
    pub title: String,
    /// The commissioning client.
    pub client: String,
    /// Narrative description of the job.
    pub description: String,
    /// Resource cost to start the contract.
    pub requirements: QuestRequirements,
    /// Payout on completion.
    pub reward: QuestReward,
    /// When the quest was stamped, wall-clock.
    pub generated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Active process
// ---------------------------------------------------------------------------

/// The single in-flight job bound to an accepted quest.
///
/// At most one exists system-wide. Created at acceptance, advanced once
/// per day, destroyed when `days_remaining` reaches zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActiveProcess {
    /// What kind of work is running.
    pub kind: ProcessKind,
    /// The accepted contract driving this process.
    pub quest: Quest,
    /// Completion percentage in `[0, 100]`.
    pub progress: f64,
    /// Simulated days left until completion.
    pub days_remaining: u64,
    /// The original duration, fixed at acceptance. Progress is computed
    /// against this value, never against the remaining time.
    pub total_days: u64,
}

// ---------------------------------------------------------------------------
// Operations log
// ---------------------------------------------------------------------------

/// One line of the station's operations log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LogEntry {
    /// The simulated day current when the entry was appended.
    pub day: u64,
    /// Human-readable event text.
    pub message: String,
}

impl core::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[Day {}] {}", self.day, self.message)
    }
}
