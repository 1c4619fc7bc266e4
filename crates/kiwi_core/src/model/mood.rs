//! Mood journal model and aggregate value types.
//!
//! # Invariants
//! - `MoodScore` is always within `1..=5`.
//! - A `DailyAverage` of `0.0` means "no entries that day", never a mood.

use crate::model::validation::{in_scale, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Self-reported wellness score, 1 (bad) to 5 (great).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct MoodScore(u8);

impl MoodScore {
    /// Slider position before the user touches it.
    pub const NEUTRAL_DEFAULT: MoodScore = MoodScore(4);

    /// # Errors
    /// - `ValidationError::MoodOutOfRange` when `value` is outside `1..=5`.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        in_scale(value)
            .map(Self)
            .ok_or(ValidationError::MoodOutOfRange(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Face shown next to the mood slider.
    pub fn emoji(self) -> &'static str {
        match self.0 {
            1 => "😟",
            2 => "😐",
            3 => "🙂",
            4 => "😊",
            _ => "🤩",
        }
    }
}

impl Default for MoodScore {
    fn default() -> Self {
        Self::NEUTRAL_DEFAULT
    }
}

impl TryFrom<i64> for MoodScore {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MoodScore> for u8 {
    fn from(value: MoodScore) -> Self {
        value.0
    }
}

/// One day-stamped mood report. Several entries may share a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodLogEntry {
    pub mood: MoodScore,
    pub date: NaiveDate,
}

/// Mean mood for one calendar day; `0.0` when the day has no entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyAverage {
    pub date: NaiveDate,
    pub average: f64,
}

impl DailyAverage {
    pub fn has_data(&self) -> bool {
        self.average > 0.0
    }
}

/// Mean of the non-empty days of a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverallMood {
    Average(f64),
    NoData,
}

impl OverallMood {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Average(value) => Some(value),
            Self::NoData => None,
        }
    }
}

impl Display for OverallMood {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Average(value) => write!(f, "{value:.1}"),
            Self::NoData => write!(f, "no data"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MoodLogEntry, MoodScore, OverallMood};
    use crate::model::validation::ValidationError;

    #[test]
    fn mood_score_enforces_scale() {
        assert_eq!(MoodScore::new(0), Err(ValidationError::MoodOutOfRange(0)));
        assert_eq!(MoodScore::new(6), Err(ValidationError::MoodOutOfRange(6)));
        assert_eq!(MoodScore::new(1).unwrap().emoji(), "😟");
        assert_eq!(MoodScore::default().value(), 4);
    }

    #[test]
    fn entry_json_matches_stored_shape() {
        let entry: MoodLogEntry = serde_json::from_str(r#"{"mood":3,"date":"2024-03-01"}"#).unwrap();
        assert_eq!(entry.mood.value(), 3);
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"mood":3,"date":"2024-03-01"}"#
        );
    }

    #[test]
    fn overall_mood_formats_one_decimal() {
        assert_eq!(OverallMood::Average(3.36).to_string(), "3.4");
        assert_eq!(OverallMood::NoData.to_string(), "no data");
        assert_eq!(OverallMood::NoData.value(), None);
    }
}
