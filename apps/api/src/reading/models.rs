//! Reading data models and the normalization applied to raw model output.
//!
//! The model is asked for exactly three powers, traps, compatible jobs and jobs
//! to avoid, and a 0–100 score. Normalization enforces that contract:
//! scores are rounded and clamped, longer lists are cut to three, shorter
//! lists are rejected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of entries each list field must carry.
pub const LIST_LEN: usize = 3;
pub const MAX_COSMIC_SCORE: u8 = 100;

/// A named power or trap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trait {
    pub name: String,
    pub description: String,
    pub emoji: String,
}

/// The reading returned to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingResult {
    pub sign: String,
    pub ascendant: String,
    pub cosmic_score: u8,
    pub powers: Vec<Trait>,
    pub traps: Vec<Trait>,
    pub prediction: String,
    pub compatible_jobs: Vec<String>,
    pub avoid_jobs: Vec<String>,
}

/// The shape the model is asked to produce, before normalization.
/// `cosmicScore` is accepted as any JSON number.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReading {
    pub sign: String,
    pub ascendant: String,
    pub cosmic_score: f64,
    pub powers: Vec<Trait>,
    pub traps: Vec<Trait>,
    pub prediction: String,
    pub compatible_jobs: Vec<String>,
    pub avoid_jobs: Vec<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("field '{field}' has {found} entries, expected 3")]
    TooFewEntries { field: &'static str, found: usize },

    /// JSON text cannot carry NaN or infinity, so only a `RawReading` built
    /// in code reaches this.
    #[error("cosmicScore is not a finite number")]
    NonFiniteScore,
}

impl RawReading {
    pub fn normalize(self) -> Result<ReadingResult, ShapeError> {
        if !self.cosmic_score.is_finite() {
            return Err(ShapeError::NonFiniteScore);
        }
        let cosmic_score = self
            .cosmic_score
            .round()
            .clamp(0.0, f64::from(MAX_COSMIC_SCORE)) as u8;

        Ok(ReadingResult {
            sign: self.sign,
            ascendant: self.ascendant,
            cosmic_score,
            powers: exactly_three("powers", self.powers)?,
            traps: exactly_three("traps", self.traps)?,
            prediction: self.prediction,
            compatible_jobs: exactly_three("compatibleJobs", self.compatible_jobs)?,
            avoid_jobs: exactly_three("avoidJobs", self.avoid_jobs)?,
        })
    }
}

fn exactly_three<T>(field: &'static str, mut items: Vec<T>) -> Result<Vec<T>, ShapeError> {
    if items.len() < LIST_LEN {
        return Err(ShapeError::TooFewEntries {
            field,
            found: items.len(),
        });
    }
    items.truncate(LIST_LEN);
    Ok(items)
}

impl ReadingResult {
    /// Text offered to social share links.
    pub fn share_text(&self) -> String {
        format!(
            "My AstroPunch reading: I'm a {} with {} ascendant! Cosmic Score: {}/100",
            self.sign, self.ascendant, self.cosmic_score
        )
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    /// A complete, well-formed model payload.
    pub fn reading_json() -> Value {
        json!({
            "sign": "Spreadsheet Sagittarius",
            "ascendant": "Rising Standup",
            "cosmicScore": 87,
            "powers": [
                {"name": "Inbox Zero", "description": "Slays email dragons", "emoji": "📬"},
                {"name": "Deploy Whisperer", "description": "Ships on Fridays unscathed", "emoji": "🚀"},
                {"name": "Meeting Alchemist", "description": "Turns hours into minutes", "emoji": "⚗️"}
            ],
            "traps": [
                {"name": "Scope Creep", "description": "Says yes to everything", "emoji": "🐌"},
                {"name": "Tab Hoarder", "description": "Two hundred tabs open", "emoji": "🗂️"},
                {"name": "Coffee Debt", "description": "Runs on borrowed espresso", "emoji": "☕"}
            ],
            "prediction": "2026 brings a promotion disguised as a reorg. Embrace it.",
            "compatibleJobs": ["Product Wizard", "Chief Vibes Officer", "Rust Whisperer"],
            "avoidJobs": ["Fax Operator (too retro)", "Mime (too quiet)", "Lighthouse Keeper (too lonely)"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::reading_json;
    use super::*;

    fn raw(value: serde_json::Value) -> RawReading {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_non_finite_score_built_in_code_is_rejected() {
        for score in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut reading = raw(reading_json());
            reading.cosmic_score = score;
            assert_eq!(reading.normalize(), Err(ShapeError::NonFiniteScore));
        }
    }

    #[test]
    fn test_well_formed_payload_normalizes_unchanged() {
        let reading = raw(reading_json()).normalize().unwrap();
        assert_eq!(reading.sign, "Spreadsheet Sagittarius");
        assert_eq!(reading.cosmic_score, 87);
        assert_eq!(reading.powers.len(), 3);
        assert_eq!(reading.avoid_jobs[2], "Lighthouse Keeper (too lonely)");
    }

    #[test]
    fn test_score_is_rounded_and_clamped() {
        let mut value = reading_json();
        value["cosmicScore"] = serde_json::json!(142.6);
        assert_eq!(raw(value.clone()).normalize().unwrap().cosmic_score, 100);

        value["cosmicScore"] = serde_json::json!(-7);
        assert_eq!(raw(value.clone()).normalize().unwrap().cosmic_score, 0);

        value["cosmicScore"] = serde_json::json!(72.5);
        assert_eq!(raw(value).normalize().unwrap().cosmic_score, 73);
    }

    #[test]
    fn test_extra_list_entries_are_truncated() {
        let mut value = reading_json();
        value["compatibleJobs"] = serde_json::json!(["a", "b", "c", "d", "e"]);
        let reading = raw(value).normalize().unwrap();
        assert_eq!(reading.compatible_jobs, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_short_list_is_rejected() {
        let mut value = reading_json();
        value["traps"] = serde_json::json!([
            {"name": "Only one", "description": "lonely", "emoji": "1️⃣"}
        ]);
        assert_eq!(
            raw(value).normalize().unwrap_err(),
            ShapeError::TooFewEntries {
                field: "traps",
                found: 1
            }
        );
    }

    #[test]
    fn test_missing_field_fails_deserialization() {
        let mut value = reading_json();
        value.as_object_mut().unwrap().remove("prediction");
        assert!(serde_json::from_value::<RawReading>(value).is_err());
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let reading = raw(reading_json()).normalize().unwrap();
        let value = serde_json::to_value(&reading).unwrap();
        assert_eq!(value["cosmicScore"], 87);
        assert!(value.get("compatibleJobs").is_some());
        assert!(value.get("cosmic_score").is_none());
    }

    #[test]
    fn test_share_text() {
        let reading = raw(reading_json()).normalize().unwrap();
        assert_eq!(
            reading.share_text(),
            "My AstroPunch reading: I'm a Spreadsheet Sagittarius with Rising Standup ascendant! Cosmic Score: 87/100"
        );
    }
}
