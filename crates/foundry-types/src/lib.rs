//! Shared type definitions for the Orbital Artisan Foundry simulation.
//!
//! This crate is the single source of truth for the data model used across
//! the Foundry workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for quest identifiers
//! - [`enums`] -- Process kinds, contract industries, quest origin
//! - [`structs`] -- Ledger, quest, active process, and log entry structs

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Industry, ProcessKind, QuestOrigin};
pub use ids::QuestId;
pub use structs::{ActiveProcess, LogEntry, Quest, QuestRequirements, QuestReward, ResourceLedger};

#[cfg(test)]
mod tests {
    //! Integration tests for type exports and `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. Importing them here triggers generation.
        // The actual files are written to the `bindings/` directory
        // relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::QuestId::export_all();

        let _ = crate::enums::ProcessKind::export_all();
        let _ = crate::enums::Industry::export_all();
        let _ = crate::enums::QuestOrigin::export_all();

        let _ = crate::structs::ResourceLedger::export_all();
        let _ = crate::structs::QuestRequirements::export_all();
        let _ = crate::structs::QuestReward::export_all();
        let _ = crate::structs::Quest::export_all();
        let _ = crate::structs::ActiveProcess::export_all();
        let _ = crate::structs::LogEntry::export_all();
    }
}
