//! Pure state → view-model projection.
//!
//! The presentation re-runs `project` after every mutation; nothing here
//! touches storage.

use crate::model::mood::{DailyAverage, MoodScore, OverallMood};
use crate::model::task::Task;
use crate::model::theme::Theme;
use crate::service::mood_store::overall_average;
use crate::service::task_store::TaskListing;
use chrono::NaiveDate;

/// Percent of chart height per mood point (5 → 100 %).
const BAR_PERCENT_PER_POINT: f64 = 20.0;

/// One column of the mood trend chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendBar {
    pub date: NaiveDate,
    pub average: f64,
    /// `0.0` for days without data, otherwise 20–100.
    pub height_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub pending: Vec<Task>,
    pub completed: Vec<Task>,
    pub trend: Vec<TrendBar>,
    pub overall: OverallMood,
    pub current_mood: MoodScore,
    pub mood_emoji: &'static str,
    pub theme: Theme,
}

impl DashboardView {
    /// Whether the "completed" section should be offered at all.
    pub fn has_completed(&self) -> bool {
        !self.completed.is_empty()
    }
}

pub fn project(
    listing: TaskListing,
    trend: &[DailyAverage],
    current_mood: MoodScore,
    theme: Theme,
) -> DashboardView {
    DashboardView {
        pending: listing.pending,
        completed: listing.completed,
        trend: trend.iter().map(to_bar).collect(),
        overall: overall_average(trend),
        current_mood,
        mood_emoji: current_mood.emoji(),
        theme,
    }
}

fn to_bar(day: &DailyAverage) -> TrendBar {
    TrendBar {
        date: day.date,
        average: day.average,
        height_percent: day.average * BAR_PERCENT_PER_POINT,
    }
}
