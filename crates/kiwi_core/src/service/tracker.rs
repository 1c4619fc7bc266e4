//! Session facade handed to the presentation layer.
//!
//! # Responsibility
//! - Bundle the task store, mood store, theme and current slider mood.
//! - Translate presentation intents into store mutations.
//!
//! # Invariants
//! - Task and mood stores never reference each other; only the tracker reads
//!   both (to build suggestion requests).

use crate::clock::{Clock, SystemClock};
use crate::id::{IdGenerator, UuidIdGenerator};
use crate::model::mood::MoodScore;
use crate::model::suggestion::SuggestedTask;
use crate::model::task::{Priority, Task};
use crate::model::theme::Theme;
use crate::service::mood_store::{MoodPolicy, MoodStore};
use crate::service::projection::{project, DashboardView};
use crate::service::task_store::TaskStore;
use crate::service::StoreResult;
use crate::storage::{load_theme, save_theme, KvStore};
use crate::suggest::SuggestionRequest;
use log::info;

/// Tunables applied when opening a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackerSettings {
    pub quick_add_priority: Priority,
    pub mood_policy: MoodPolicy,
    /// Theme used when none has been saved yet.
    pub system_theme: Theme,
}

pub struct Tracker<S: KvStore + Clone, G: IdGenerator = UuidIdGenerator, C: Clock = SystemClock> {
    tasks: TaskStore<S, G>,
    moods: MoodStore<S, C>,
    store: S,
    theme: Theme,
    current_mood: MoodScore,
}

impl<S: KvStore + Clone, G: IdGenerator, C: Clock> Tracker<S, G, C> {
    /// Loads every persisted collection from `store`.
    pub fn open(store: S, ids: G, clock: C, settings: TrackerSettings) -> Self {
        let tasks = TaskStore::load(store.clone(), ids)
            .with_quick_add_priority(settings.quick_add_priority);
        let moods = MoodStore::load(store.clone(), clock).with_policy(settings.mood_policy);
        let theme = load_theme(&store, settings.system_theme);
        info!("event=tracker_open module=tracker status=ok theme={theme}");
        Self {
            tasks,
            moods,
            store,
            theme,
            current_mood: MoodScore::default(),
        }
    }

    pub fn tasks(&self) -> &TaskStore<S, G> {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskStore<S, G> {
        &mut self.tasks
    }

    pub fn moods(&self) -> &MoodStore<S, C> {
        &self.moods
    }

    pub fn moods_mut(&mut self) -> &mut MoodStore<S, C> {
        &mut self.moods
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switches light/dark and persists the new theme.
    pub fn toggle_theme(&mut self) -> StoreResult<Theme> {
        self.theme = self.theme.toggled();
        save_theme(&self.store, self.theme)?;
        info!("event=theme_toggle module=tracker status=ok theme={}", self.theme);
        Ok(self.theme)
    }

    pub fn current_mood(&self) -> MoodScore {
        self.current_mood
    }

    /// Moves the slider without logging anything.
    pub fn set_current_mood(&mut self, mood: MoodScore) {
        self.current_mood = mood;
    }

    /// Handles a committed mood slider change: logs it for today and returns
    /// the suggestion request that should follow.
    pub fn change_mood(&mut self, value: i64) -> StoreResult<SuggestionRequest> {
        let entry = self.moods.log_mood(value)?;
        self.current_mood = entry.mood;
        Ok(self.suggestion_request())
    }

    /// Suggestion inputs for the current mood and task titles.
    pub fn suggestion_request(&self) -> SuggestionRequest {
        SuggestionRequest {
            mood: self.current_mood,
            task_titles: self.tasks.titles(),
        }
    }

    /// Promotes a suggestion to a regular incomplete task.
    pub fn accept_suggestion(&mut self, suggestion: &SuggestedTask) -> StoreResult<Task> {
        self.tasks.add(suggestion.to_draft())
    }

    /// Presentation-ready projection of the current state.
    pub fn view(&self) -> DashboardView {
        project(
            self.tasks.list_for_display(),
            &self.moods.trend(),
            self.current_mood,
            self.theme,
        )
    }
}
