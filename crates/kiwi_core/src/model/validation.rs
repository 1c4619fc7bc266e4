//! Input validation errors shared by task and mood models.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lowest accepted value on the 1..5 scales (priority, mood).
pub const SCALE_MIN: u8 = 1;
/// Highest accepted value on the 1..5 scales (priority, mood).
pub const SCALE_MAX: u8 = 5;

/// Rejected user input. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Task title is empty after trimming whitespace.
    EmptyTitle,
    /// Priority outside `1..=5`.
    PriorityOutOfRange(i64),
    /// Mood score outside `1..=5`.
    MoodOutOfRange(i64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::PriorityOutOfRange(value) => write!(
                f,
                "priority must be between {SCALE_MIN} and {SCALE_MAX}, got {value}"
            ),
            Self::MoodOutOfRange(value) => write!(
                f,
                "mood must be between {SCALE_MIN} and {SCALE_MAX}, got {value}"
            ),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn in_scale(value: i64) -> Option<u8> {
    if (i64::from(SCALE_MIN)..=i64::from(SCALE_MAX)).contains(&value) {
        u8::try_from(value).ok()
    } else {
        None
    }
}
