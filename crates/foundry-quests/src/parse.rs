//! LLM response parsing into a typed [`Quest`].
//!
//! The LLM returns raw text (ideally JSON). This module extracts and
//! validates the response into the [`Quest`] shape from `foundry-types`.
//! Numbers must be positive -- a contract with zero materials or a
//! zero-day deadline is malformed -- but values outside the advisory
//! ranges passed in the prompt are trusted and only logged.

use chrono::Utc;
use foundry_types::{Quest, QuestId, QuestOrigin, QuestRequirements, QuestReward};
use tracing::warn;

use crate::error::GeneratorError;
use crate::prompt::ranges;

/// Intermediate struct for deserializing the LLM's raw JSON response.
///
/// The LLM produces a flat JSON object with `title`, `client`,
/// `description`, `requirements`, and `reward` at the top level. Numbers
/// arrive as JSON numbers and are occasionally fractional; they are
/// rounded and range-checked in [`convert_raw_quest`].
#[derive(Debug, serde::Deserialize)]
struct RawQuest {
    title: String,
    client: String,
    description: String,
    requirements: RawRequirements,
    reward: RawReward,
}

/// Raw `requirements` object from the LLM.
#[derive(Debug, serde::Deserialize)]
struct RawRequirements {
    materials: f64,
    #[serde(alias = "time_days")]
    time: f64,
}

/// Raw `reward` object from the LLM.
#[derive(Debug, serde::Deserialize)]
struct RawReward {
    cash: f64,
    research: f64,
}

/// Parse an LLM response string into a stamped [`Quest`].
///
/// Attempts multiple recovery strategies if the raw text is not clean
/// JSON:
/// 1. Direct `serde_json` deserialization
/// 2. Extract JSON from markdown code blocks
/// 3. Strip trailing commas and retry
///
/// # Errors
///
/// Returns [`GeneratorError::Parse`] if every strategy fails or the
/// parsed numbers are not positive. The caller substitutes the fallback
/// quest in that case.
pub fn parse_quest_response(raw: &str) -> Result<Quest, GeneratorError> {
    let trimmed = raw.trim();

    // Strategy 1: direct parse
    if let Ok(parsed) = serde_json::from_str::<RawQuest>(trimmed) {
        return convert_raw_quest(parsed);
    }

    // Strategy 2: extract from markdown code block
    if let Some(json_str) = extract_json_from_codeblock(trimmed)
        && let Ok(parsed) = serde_json::from_str::<RawQuest>(json_str)
    {
        return convert_raw_quest(parsed);
    }

    // Strategy 3: strip trailing commas and retry
    let cleaned = strip_trailing_commas(trimmed);
    if let Ok(parsed) = serde_json::from_str::<RawQuest>(&cleaned) {
        return convert_raw_quest(parsed);
    }

    // Strategy 4: extract from code block then strip commas
    if let Some(json_str) = extract_json_from_codeblock(trimmed) {
        let cleaned_inner = strip_trailing_commas(json_str);
        if let Ok(parsed) = serde_json::from_str::<RawQuest>(&cleaned_inner) {
            return convert_raw_quest(parsed);
        }
    }

    Err(GeneratorError::Parse(format!(
        "all parse strategies failed for: {trimmed}"
    )))
}

/// Convert a deserialized raw quest into a stamped, typed [`Quest`].
fn convert_raw_quest(raw: RawQuest) -> Result<Quest, GeneratorError> {
    let materials = to_positive_u64(raw.requirements.materials, "requirements.materials")?;
    let time_days = to_positive_u64(raw.requirements.time, "requirements.time")?;
    let cash = to_positive_u64(raw.reward.cash, "reward.cash")?;
    let research = to_positive_u64(raw.reward.research, "reward.research")?;

    warn_if_outside(materials, ranges::MATERIALS_MIN, ranges::MATERIALS_MAX, "materials");
    warn_if_outside(time_days, ranges::TIME_MIN, ranges::TIME_MAX, "time");
    warn_if_outside(cash, ranges::CASH_MIN, ranges::CASH_MAX, "cash");
    warn_if_outside(research, ranges::RESEARCH_MIN, ranges::RESEARCH_MAX, "research");

    Ok(Quest {
        id: QuestId::new(),
        origin: QuestOrigin::Generated,
        title: raw.title,
        client: raw.client,
        description: raw.description,
        requirements: QuestRequirements {
            materials,
            time_days,
        },
        reward: QuestReward { cash, research },
        generated_at: Utc::now(),
    })
}

/// Round a positive, finite JSON number to `u64`.
///
/// Zero, negative, and non-finite values are malformed: a contract that
/// costs nothing or finishes in zero days breaks the state machine's
/// assumptions.
// Everything the prompt asks for fits comfortably below 2^53, so the
// round-trip through f64 is exact.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_positive_u64(value: f64, field: &str) -> Result<u64, GeneratorError> {
    if value.is_finite() && (1.0..=9_007_199_254_740_992.0).contains(&value) {
        Ok(value.round() as u64)
    } else {
        Err(GeneratorError::Parse(format!(
            "{field} must be a positive number, got {value}"
        )))
    }
}

/// Log when a value falls outside the advisory range sent in the prompt.
///
/// The value is still accepted -- the ranges are hints to the model, not
/// local constraints.
fn warn_if_outside(value: u64, min: u64, max: u64, field: &str) {
    if value < min || value > max {
        warn!(field, value, min, max, "generated value outside advisory range");
    }
}

/// Extract JSON from a markdown code block.
fn extract_json_from_codeblock(text: &str) -> Option<&str> {
    // Look for ```json ... ``` or ``` ... ```
    let start = text
        .find("```json")
        .map(|i| {
            let after_tag = i.checked_add(7).unwrap_or(i);
            // Find the newline after ```json
            text.get(after_tag..)
                .and_then(|s| s.find('\n'))
                .and_then(|nl| after_tag.checked_add(nl))
                .and_then(|pos| pos.checked_add(1))
                .unwrap_or(after_tag)
        })
        .or_else(|| {
            text.find("```").map(|i| {
                let after_tag = i.checked_add(3).unwrap_or(i);
                text.get(after_tag..)
                    .and_then(|s| s.find('\n'))
                    .and_then(|nl| after_tag.checked_add(nl))
                    .and_then(|pos| pos.checked_add(1))
                    .unwrap_or(after_tag)
            })
        });

    let start = start?;
    let remaining = text.get(start..)?;
    let end = remaining.find("```")?;
    remaining.get(..end).map(str::trim)
}

/// Strip trailing commas before closing braces and brackets (common LLM
/// error).
fn strip_trailing_commas(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    let mut i = 0;
    while i < len {
        let c = chars.get(i).copied().unwrap_or(' ');
        if c == ',' {
            // Look ahead past whitespace for } or ]
            let mut j = i.checked_add(1).unwrap_or(i);
            while j < len && chars.get(j).copied().unwrap_or(' ').is_whitespace() {
                j = j.checked_add(1).unwrap_or(j);
            }
            let next = chars.get(j).copied().unwrap_or(' ');
            if next == '}' || next == ']' {
                // Skip this comma
                i = i.checked_add(1).unwrap_or(i);
                continue;
            }
        }
        result.push(c);
        i = i.checked_add(1).unwrap_or(len);
    }

    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "title": "Zero-G Optical Lattice",
        "client": "Astra Dynamics",
        "description": "A photonic lattice that only forms in microgravity.",
        "requirements": {"materials": 220, "time": 9},
        "reward": {"cash": 48000, "research": 55}
    }"#;

    #[test]
    fn parse_valid_quest() {
        let quest = parse_quest_response(VALID).unwrap();
        assert_eq!(quest.title, "Zero-G Optical Lattice");
        assert_eq!(quest.client, "Astra Dynamics");
        assert_eq!(quest.origin, QuestOrigin::Generated);
        assert_eq!(quest.requirements.materials, 220);
        assert_eq!(quest.requirements.time_days, 9);
        assert_eq!(quest.reward.cash, 48_000);
        assert_eq!(quest.reward.research, 55);
    }

    #[test]
    fn parse_from_codeblock() {
        let raw = format!("Here is the contract:\n\n```json\n{VALID}\n```\n\nEnjoy!");
        let quest = parse_quest_response(&raw).unwrap();
        assert_eq!(quest.requirements.time_days, 9);
    }

    #[test]
    fn parse_trailing_comma() {
        let raw = r#"{
            "title": "Hypergolic Valve Cluster",
            "client": "Cygnus Medical",
            "description": "Precision valves.",
            "requirements": {"materials": 90, "time": 6,},
            "reward": {"cash": 15000, "research": 12,},
        }"#;
        let quest = parse_quest_response(raw).unwrap();
        assert_eq!(quest.requirements.materials, 90);
    }

    #[test]
    fn parse_garbage_is_an_error() {
        let result = parse_quest_response("I would love to write you a contract someday.");
        assert!(result.is_err());
    }

    #[test]
    fn parse_empty_is_an_error() {
        assert!(parse_quest_response("").is_err());
    }

    #[test]
    fn nonpositive_numbers_are_rejected() {
        let raw = r#"{
            "title": "Free Labor",
            "client": "Nobody",
            "description": "Suspicious.",
            "requirements": {"materials": 0, "time": 5},
            "reward": {"cash": 10000, "research": 10}
        }"#;
        assert!(parse_quest_response(raw).is_err());

        let raw = r#"{
            "title": "Time Travel",
            "client": "Nobody",
            "description": "Suspicious.",
            "requirements": {"materials": 50, "time": -3},
            "reward": {"cash": 10000, "research": 10}
        }"#;
        assert!(parse_quest_response(raw).is_err());
    }

    #[test]
    fn out_of_range_values_are_trusted() {
        // 900 kg exceeds the advisory 500 kg ceiling but is still a
        // well-formed contract.
        let raw = r#"{
            "title": "Bulk Alloy Run",
            "client": "Helion Composites",
            "description": "A very large order.",
            "requirements": {"materials": 900, "time": 9},
            "reward": {"cash": 48000, "research": 55}
        }"#;
        let quest = parse_quest_response(raw).unwrap();
        assert_eq!(quest.requirements.materials, 900);
    }

    #[test]
    fn fractional_numbers_are_rounded() {
        let raw = r#"{
            "title": "Gossamer Mirror Segment",
            "client": "Astra Dynamics",
            "description": "Thin-film optics.",
            "requirements": {"materials": 120.6, "time": 7.2},
            "reward": {"cash": 30000.4, "research": 25.5}
        }"#;
        let quest = parse_quest_response(raw).unwrap();
        assert_eq!(quest.requirements.materials, 121);
        assert_eq!(quest.requirements.time_days, 7);
        assert_eq!(quest.reward.research, 26);
    }

    #[test]
    fn missing_fields_are_an_error() {
        let raw = r#"{"title": "Incomplete", "client": "X"}"#;
        assert!(parse_quest_response(raw).is_err());
    }

    #[test]
    fn extract_json_from_markdown() {
        let text = "```json\n{\"key\": \"value\"}\n```";
        let result = extract_json_from_codeblock(text);
        assert_eq!(result, Some("{\"key\": \"value\"}"));
    }

    #[test]
    fn strip_trailing_commas_basic() {
        let input = r#"{"a": 1, "b": 2,}"#;
        let result = strip_trailing_commas(input);
        assert_eq!(result, r#"{"a": 1, "b": 2}"#);
    }
}
