use chrono::NaiveDate;
use kiwi_core::db::open_db;
use kiwi_core::storage::{KvStore, THEME_KEY};
use kiwi_core::{
    ManualClock, MemoryKvStore, MoodScore, OverallMood, Priority, SequentialIdGenerator,
    SqliteKvStore, SuggestedTask, TaskDraft, Theme, Tracker, TrackerSettings,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

fn open(kv: &MemoryKvStore) -> Tracker<MemoryKvStore, SequentialIdGenerator, ManualClock> {
    Tracker::open(
        kv.clone(),
        SequentialIdGenerator::new(),
        ManualClock::new(today()),
        TrackerSettings::default(),
    )
}

#[test]
fn theme_defaults_to_system_and_toggle_persists() {
    let kv = MemoryKvStore::new();
    let settings = TrackerSettings {
        system_theme: Theme::Dark,
        ..TrackerSettings::default()
    };
    let mut tracker = Tracker::open(
        kv.clone(),
        SequentialIdGenerator::new(),
        ManualClock::new(today()),
        settings,
    );
    assert_eq!(tracker.theme(), Theme::Dark);
    assert_eq!(kv.get(THEME_KEY).unwrap(), None);

    assert_eq!(tracker.toggle_theme().unwrap(), Theme::Light);
    assert_eq!(kv.get(THEME_KEY).unwrap().as_deref(), Some("light"));

    let reopened = Tracker::open(
        kv.clone(),
        SequentialIdGenerator::new(),
        ManualClock::new(today()),
        settings,
    );
    assert_eq!(reopened.theme(), Theme::Light);
}

#[test]
fn mood_change_logs_and_builds_suggestion_request() {
    let kv = MemoryKvStore::new();
    let mut tracker = open(&kv);
    assert_eq!(tracker.current_mood(), MoodScore::NEUTRAL_DEFAULT);
    tracker.tasks_mut().quick_add("Yoga").unwrap();
    tracker.tasks_mut().quick_add("Read").unwrap();

    let request = tracker.change_mood(2).unwrap();
    assert_eq!(request.mood.value(), 2);
    assert_eq!(request.task_titles, vec!["Yoga".to_string(), "Read".to_string()]);
    assert_eq!(tracker.current_mood().value(), 2);
    assert_eq!(tracker.moods().entries().len(), 1);
}

#[test]
fn invalid_mood_change_keeps_current_mood() {
    let kv = MemoryKvStore::new();
    let mut tracker = open(&kv);

    assert!(tracker.change_mood(9).is_err());
    assert_eq!(tracker.current_mood(), MoodScore::NEUTRAL_DEFAULT);
    assert!(tracker.moods().entries().is_empty());
}

#[test]
fn accepted_suggestion_becomes_incomplete_task() {
    let kv = MemoryKvStore::new();
    let mut tracker = open(&kv);
    let suggestion = SuggestedTask {
        title: "Drink water 💧".to_string(),
        notes: "One glass now".to_string(),
        priority: Priority::new(4).unwrap(),
    };

    let task = tracker.accept_suggestion(&suggestion).unwrap();
    assert_eq!(task.title, suggestion.title);
    assert_eq!(task.notes, suggestion.notes);
    assert_eq!(task.priority, suggestion.priority);
    assert!(!task.completed);
    assert_eq!(tracker.tasks().tasks().len(), 1);
}

#[test]
fn view_projects_tasks_and_trend() {
    let kv = MemoryKvStore::new();
    let mut tracker = open(&kv);
    let done = tracker.tasks_mut().quick_add("done").unwrap();
    tracker
        .tasks_mut()
        .add(TaskDraft::new("urgent").priority(Priority::new(5).unwrap()))
        .unwrap();
    tracker.tasks_mut().toggle_completion(&done.id).unwrap();
    tracker.change_mood(5).unwrap();

    let view = tracker.view();
    assert_eq!(view.pending.len(), 1);
    assert_eq!(view.pending[0].title, "urgent");
    assert!(view.has_completed());
    assert_eq!(view.trend.len(), 7);
    assert_eq!(view.trend[6].date, today());
    assert_eq!(view.trend[6].height_percent, 100.0);
    assert_eq!(view.overall, OverallMood::Average(5.0));
    assert_eq!(view.mood_emoji, "🤩");
}

#[test]
fn state_survives_reopening_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kiwi.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let kv = SqliteKvStore::try_new(&conn).unwrap();
        let mut tracker = Tracker::open(
            kv,
            SequentialIdGenerator::new(),
            ManualClock::new(today()),
            TrackerSettings::default(),
        );
        tracker.tasks_mut().quick_add("stretch").unwrap();
        tracker.change_mood(3).unwrap();
        tracker.toggle_theme().unwrap();
    }

    let conn = open_db(&path).unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let tracker = Tracker::open(
        kv,
        SequentialIdGenerator::new(),
        ManualClock::new(today()),
        TrackerSettings::default(),
    );
    assert_eq!(tracker.tasks().titles(), vec!["stretch".to_string()]);
    assert_eq!(tracker.moods().entries().len(), 1);
    assert_eq!(tracker.theme(), Theme::Dark);
}
