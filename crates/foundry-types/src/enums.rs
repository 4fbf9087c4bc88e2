//! Enumeration types for the Foundry simulation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Process kinds
// ---------------------------------------------------------------------------

/// The kind of work the station's fabrication bay is doing.
///
/// Only [`ProcessKind::Manufacturing`] is produced by any transition today.
/// `MaterialResupply` and `ProductDelivery` are reserved for future station
/// operations and are never constructed by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ProcessKind {
    /// Fabricating a contracted component in the bay.
    Manufacturing,
    /// Restocking raw materials (reserved, never constructed).
    MaterialResupply,
    /// Shipping a finished product to the client (reserved, never constructed).
    ProductDelivery,
}

impl core::fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Manufacturing => "Manufacturing",
            Self::MaterialResupply => "Material Resupply",
            Self::ProductDelivery => "Product Delivery",
        };
        write!(f, "{label}")
    }
}

// ---------------------------------------------------------------------------
// Contract industries
// ---------------------------------------------------------------------------

/// The industry a contract is themed around.
///
/// The quest generator draws one of these at random when building the
/// generation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Industry {
    /// Spacecraft and launch-vehicle components.
    Aerospace,
    /// Implants, lab equipment, and pharmaceutical hardware.
    Medical,
    /// Bespoke high-end consumer goods.
    LuxuryGoods,
    /// Semiconductors, optics, and exotic electronics.
    AdvancedElectronics,
}

impl Industry {
    /// The fixed set of industries contracts are drawn from.
    pub const ALL: [Self; 4] = [
        Self::Aerospace,
        Self::Medical,
        Self::LuxuryGoods,
        Self::AdvancedElectronics,
    ];
}

impl core::fmt::Display for Industry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Aerospace => "Aerospace",
            Self::Medical => "Medical",
            Self::LuxuryGoods => "Luxury Goods",
            Self::AdvancedElectronics => "Advanced Electronics",
        };
        write!(f, "{label}")
    }
}

// ---------------------------------------------------------------------------
// Quest origin
// ---------------------------------------------------------------------------

/// Where a quest came from.
///
/// A [`QuestOrigin::Fallback`] quest was substituted locally after the
/// generation boundary failed; the player sees it as a routine internal
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum QuestOrigin {
    /// Produced by the external generation request.
    Generated,
    /// Substituted locally after a generation failure.
    Fallback,
}
