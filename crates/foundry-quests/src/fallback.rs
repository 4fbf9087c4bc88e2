//! Deterministic fallback contract.
//!
//! When the LLM is unreachable, times out, or produces unparseable
//! output, the quest board must never come up empty. This module builds
//! the canned contract that fills the gap. Its numbers never change;
//! its identity is fresh on every call so the board can hold several at
//! once without id collisions.

use chrono::Utc;
use foundry_types::{Quest, QuestId, QuestOrigin, QuestRequirements, QuestReward};

/// Materials requirement of the fallback contract, in kilograms.
const FALLBACK_MATERIALS: u64 = 50;
/// Manufacturing time of the fallback contract, in days.
const FALLBACK_TIME_DAYS: u64 = 5;
/// Cash reward of the fallback contract, in credits.
const FALLBACK_CASH: u64 = 10_000;
/// Research reward of the fallback contract, in points.
const FALLBACK_RESEARCH: u64 = 10;

/// Build the fallback contract.
///
/// Requirements and reward are fixed; the id and timestamp are fresh.
#[must_use]
pub fn fallback_quest() -> Quest {
    Quest {
        id: QuestId::new(),
        origin: QuestOrigin::Fallback,
        title: "Manual Override Crystal".to_owned(),
        client: "Foundry Operations".to_owned(),
        description: "The client uplink is down, but the foundry never idles. \
                      Grow a standard-issue piezoelectric crystal for the \
                      station's own spare-parts locker."
            .to_owned(),
        requirements: QuestRequirements {
            materials: FALLBACK_MATERIALS,
            time_days: FALLBACK_TIME_DAYS,
        },
        reward: QuestReward {
            cash: FALLBACK_CASH,
            research: FALLBACK_RESEARCH,
        },
        generated_at: Utc::now(),
    }
}
