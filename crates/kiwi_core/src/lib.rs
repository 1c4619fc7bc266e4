//! Core domain logic for the Kiwi task & mood tracker.
//! This crate is the single source of truth for ordering, aggregation and
//! persistence rules; front-ends only render projections and forward intents.

pub mod clock;
pub mod config;
pub mod db;
pub mod id;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod suggest;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, ConfigError};
pub use id::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::mood::{DailyAverage, MoodLogEntry, MoodScore, OverallMood};
pub use model::suggestion::SuggestedTask;
pub use model::task::{Priority, Task, TaskDraft, TaskId};
pub use model::theme::Theme;
pub use model::validation::ValidationError;
pub use service::mood_store::{overall_average, MoodPolicy, MoodStore};
pub use service::projection::{DashboardView, TrendBar};
pub use service::task_store::{TaskListing, TaskStore};
pub use service::tracker::{Tracker, TrackerSettings};
pub use service::{StoreError, StoreResult};
pub use storage::{KvStore, MemoryKvStore, SqliteKvStore, StorageError};
pub use suggest::{
    SuggestionClient, SuggestionDispatcher, SuggestionFetchError, SuggestionOutcome,
    SuggestionRequest, SuggestionTransport, SuggestionUpdate,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
