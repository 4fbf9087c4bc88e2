//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Contract identifiers use UUID v7 (time-ordered), so a freshly stamped
//! quest id carries the generation instant in its high bits. Uniqueness is
//! probabilistic, not cryptographic -- which is all the offer board needs.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Unique identifier for a contract offered on the quest board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QuestId(pub Uuid);

impl QuestId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for QuestId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for QuestId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for QuestId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<QuestId> for Uuid {
    fn from(id: QuestId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn quest_ids_are_unique() {
        let a = QuestId::new();
        let b = QuestId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn quest_id_roundtrips_through_uuid() {
        let id = QuestId::new();
        let uuid: Uuid = id.into();
        assert_eq!(QuestId::from(uuid), id);
    }

    #[test]
    fn quest_id_serializes_as_uuid_string() {
        let id = QuestId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
