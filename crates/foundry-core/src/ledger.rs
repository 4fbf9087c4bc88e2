//! Checked mutation helpers for the station's resource ledger.
//!
//! The [`ResourceLedger`] struct itself is plain data (defined in
//! `foundry-types`); this module owns the only two mutations the game
//! performs on it: the materials debit at quest acceptance and the
//! cash/research credit at process completion. Debits are checked and
//! fail rather than underflow; credits saturate at `u64::MAX`.

use foundry_types::{QuestReward, ResourceLedger};

/// Errors that can occur when mutating the ledger.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A debit was attempted for more materials than the station holds.
    #[error("insufficient materials: required {required} kg, available {available} kg")]
    InsufficientMaterials {
        /// Materials the contract requires, in kilograms.
        required: u64,
        /// Materials currently on hand, in kilograms.
        available: u64,
    },
}

/// Debit raw materials from the ledger.
///
/// # Errors
///
/// Returns [`LedgerError::InsufficientMaterials`] without touching the
/// ledger if `amount` exceeds the materials on hand.
pub fn debit_materials(ledger: &mut ResourceLedger, amount: u64) -> Result<(), LedgerError> {
    ledger.materials = ledger.materials.checked_sub(amount).ok_or(
        LedgerError::InsufficientMaterials {
            required: amount,
            available: ledger.materials,
        },
    )?;
    Ok(())
}

/// Credit a completed contract's reward to the ledger.
///
/// Cash and research points saturate at `u64::MAX` rather than wrapping.
/// No other ledger field is touched.
pub fn credit_reward(ledger: &mut ResourceLedger, reward: &QuestReward) {
    ledger.cash = ledger.cash.saturating_add(reward.cash);
    ledger.research_points = ledger.research_points.saturating_add(reward.research);
}
