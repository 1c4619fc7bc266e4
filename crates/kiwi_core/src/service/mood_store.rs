//! Mood store: append-only mood journal with retention and aggregation.
//!
//! # Responsibility
//! - Own the in-memory mood log loaded from the `moodLogs` blob.
//! - Prune entries past the retention horizon on every log.
//! - Aggregate entries into per-day averages over a trailing window.
//!
//! # Invariants
//! - After `log_mood*`, every entry satisfies `date >= today - retention_days`.
//! - Days without entries aggregate to `0.0`; the overall average skips them.

use crate::clock::{Clock, SystemClock};
use crate::model::mood::{DailyAverage, MoodLogEntry, MoodScore, OverallMood};
use crate::service::StoreResult;
use crate::storage::{load_collection, save_collection, KvStore, MOOD_LOGS_KEY};
use chrono::{Days, NaiveDate};
use log::info;

/// Default retention horizon in days.
pub const DEFAULT_RETENTION_DAYS: u32 = 30;
/// Default trend window in days.
pub const DEFAULT_TREND_WINDOW_DAYS: u32 = 7;

/// Retention and trend window sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodPolicy {
    pub retention_days: u32,
    pub trend_window_days: u32,
}

impl Default for MoodPolicy {
    fn default() -> Self {
        Self {
            retention_days: DEFAULT_RETENTION_DAYS,
            trend_window_days: DEFAULT_TREND_WINDOW_DAYS,
        }
    }
}

/// Owner of the mood log collection.
pub struct MoodStore<S: KvStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    policy: MoodPolicy,
    entries: Vec<MoodLogEntry>,
}

impl<S: KvStore, C: Clock> MoodStore<S, C> {
    /// Loads the mood log from `store`; unreadable blobs yield an empty log.
    pub fn load(store: S, clock: C) -> Self {
        let entries = load_collection::<MoodLogEntry>(&store, MOOD_LOGS_KEY);
        info!(
            "event=mood_store_load module=mood_store status=ok count={}",
            entries.len()
        );
        Self {
            store,
            clock,
            policy: MoodPolicy::default(),
            entries,
        }
    }

    pub fn with_policy(mut self, policy: MoodPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> MoodPolicy {
        self.policy
    }

    pub fn entries(&self) -> &[MoodLogEntry] {
        &self.entries
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Oldest date kept by retention, relative to the clock's today.
    pub fn retention_cutoff(&self) -> NaiveDate {
        days_before(self.today(), self.policy.retention_days)
    }

    /// Logs a mood for today.
    pub fn log_mood(&mut self, value: i64) -> StoreResult<MoodLogEntry> {
        let today = self.today();
        self.log_mood_on(value, today)
    }

    /// Appends a mood entry for `date`, prunes expired entries and persists.
    ///
    /// # Errors
    /// - `StoreError::Validation` when `value` is outside `1..=5`; nothing
    ///   changes.
    /// - `StoreError::Storage` when the blob cannot be written.
    pub fn log_mood_on(&mut self, value: i64, date: NaiveDate) -> StoreResult<MoodLogEntry> {
        let mood = MoodScore::new(value)?;
        let entry = MoodLogEntry { mood, date };
        self.entries.push(entry);

        let cutoff = self.retention_cutoff();
        let before = self.entries.len();
        self.entries.retain(|entry| entry.date >= cutoff);
        let pruned = before - self.entries.len();

        save_collection(&self.store, MOOD_LOGS_KEY, &self.entries)?;
        info!(
            "event=mood_log module=mood_store status=ok mood={} pruned={pruned} count={}",
            mood.value(),
            self.entries.len()
        );
        Ok(entry)
    }

    /// Per-day mean mood for the `window_days` days ending at `window_end`
    /// (inclusive), oldest first. Empty days report `0.0`.
    pub fn daily_averages(&self, window_end: NaiveDate, window_days: u32) -> Vec<DailyAverage> {
        (0..window_days)
            .rev()
            .map(|offset| {
                let date = days_before(window_end, offset);
                let (sum, count) = self
                    .entries
                    .iter()
                    .filter(|entry| entry.date == date)
                    .fold((0u32, 0u32), |(sum, count), entry| {
                        (sum + u32::from(entry.mood.value()), count + 1)
                    });
                let average = if count == 0 {
                    0.0
                } else {
                    f64::from(sum) / f64::from(count)
                };
                DailyAverage { date, average }
            })
            .collect()
    }

    /// Daily averages over the configured trend window ending today.
    pub fn trend(&self) -> Vec<DailyAverage> {
        self.daily_averages(self.today(), self.policy.trend_window_days)
    }
}

/// Mean of the days that have data; `NoData` when none do.
pub fn overall_average(days: &[DailyAverage]) -> OverallMood {
    let (sum, count) = days
        .iter()
        .filter(|day| day.has_data())
        .fold((0.0, 0u32), |(sum, count), day| (sum + day.average, count + 1));
    if count == 0 {
        OverallMood::NoData
    } else {
        OverallMood::Average(sum / f64::from(count))
    }
}

fn days_before(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::{overall_average, MoodStore};
    use crate::clock::ManualClock;
    use crate::model::mood::{DailyAverage, OverallMood};
    use crate::storage::MemoryKvStore;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn window_is_chronological_and_inclusive_of_end() {
        let store = MoodStore::load(MemoryKvStore::new(), ManualClock::new(day(20)));
        let days = store.daily_averages(day(20), 7);
        assert_eq!(days.len(), 7);
        assert_eq!(days.first().unwrap().date, day(14));
        assert_eq!(days.last().unwrap().date, day(20));
        assert!(days.iter().all(|d| d.average == 0.0));
    }

    #[test]
    fn zero_sized_window_is_empty() {
        let store = MoodStore::load(MemoryKvStore::new(), ManualClock::new(day(20)));
        assert!(store.daily_averages(day(20), 0).is_empty());
    }

    #[test]
    fn overall_average_skips_empty_days() {
        let days = [
            DailyAverage { date: day(1), average: 0.0 },
            DailyAverage { date: day(2), average: 2.0 },
            DailyAverage { date: day(3), average: 5.0 },
        ];
        assert_eq!(overall_average(&days), OverallMood::Average(3.5));
        assert_eq!(overall_average(&days[..1]), OverallMood::NoData);
    }
}
