use chrono::{Days, NaiveDate};
use kiwi_core::storage::MOOD_LOGS_KEY;
use kiwi_core::{
    overall_average, KvStore, ManualClock, MemoryKvStore, MoodPolicy, MoodStore, OverallMood,
    StoreError, ValidationError,
};
use std::rc::Rc;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

fn days_ago(days: u64) -> NaiveDate {
    today().checked_sub_days(Days::new(days)).unwrap()
}

#[test]
fn entry_older_than_retention_is_pruned_on_next_log() {
    let kv = MemoryKvStore::new();
    let clock = Rc::new(ManualClock::new(days_ago(31)));
    let mut store = MoodStore::load(kv.clone(), Rc::clone(&clock));

    store.log_mood(2).unwrap();
    assert_eq!(store.entries().len(), 1);

    clock.advance_days(31);
    assert_eq!(store.today(), today());
    store.log_mood(4).unwrap();

    assert_eq!(store.entries().len(), 1);
    assert_eq!(store.entries()[0].date, today());
    assert_eq!(store.entries()[0].mood.value(), 4);
}

#[test]
fn retention_cutoff_is_inclusive() {
    let kv = MemoryKvStore::new();
    kv.set(
        MOOD_LOGS_KEY,
        &format!(
            r#"[{{"mood":1,"date":"{}"}},{{"mood":2,"date":"{}"}}]"#,
            days_ago(30),
            days_ago(31)
        ),
    )
    .unwrap();
    let mut store = MoodStore::load(kv.clone(), ManualClock::new(today()));

    store.log_mood(3).unwrap();

    let dates: Vec<NaiveDate> = store.entries().iter().map(|entry| entry.date).collect();
    assert_eq!(dates, vec![days_ago(30), today()]);

    let reloaded = MoodStore::load(kv, ManualClock::new(today()));
    assert_eq!(reloaded.entries(), store.entries());
}

#[test]
fn out_of_range_mood_is_rejected_without_mutation() {
    let kv = MemoryKvStore::new();
    let mut store = MoodStore::load(kv.clone(), ManualClock::new(today()));

    for value in [0, 6, -1] {
        let err = store.log_mood(value).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::MoodOutOfRange(v)) if v == value
        ));
    }
    assert!(store.entries().is_empty());
    assert_eq!(kv.get(MOOD_LOGS_KEY).unwrap(), None);
}

#[test]
fn same_day_entries_are_averaged_and_empty_days_report_zero() {
    let kv = MemoryKvStore::new();
    let mut store = MoodStore::load(kv, ManualClock::new(today()));
    store.log_mood_on(2, days_ago(3)).unwrap();
    store.log_mood_on(4, days_ago(3)).unwrap();
    store.log_mood_on(5, today()).unwrap();

    let days = store.daily_averages(today(), 7);
    assert_eq!(days.len(), 7);
    assert_eq!(days[3].date, days_ago(3));
    assert_eq!(days[3].average, 3.0);
    assert_eq!(days[6].average, 5.0);
    for index in [0, 1, 2, 4, 5] {
        assert_eq!(days[index].average, 0.0, "day {index} should be empty");
    }

    assert_eq!(overall_average(&days), OverallMood::Average(4.0));
}

#[test]
fn entries_outside_window_are_ignored() {
    let kv = MemoryKvStore::new();
    let mut store = MoodStore::load(kv, ManualClock::new(today()));
    store.log_mood_on(1, days_ago(7)).unwrap();
    store.log_mood_on(5, days_ago(6)).unwrap();

    let days = store.trend();
    assert_eq!(days.first().unwrap().date, days_ago(6));
    assert_eq!(overall_average(&days), OverallMood::Average(5.0));
}

#[test]
fn empty_window_reports_no_data_not_zero() {
    let kv = MemoryKvStore::new();
    let mut store = MoodStore::load(kv, ManualClock::new(today()));
    store.log_mood_on(3, days_ago(20)).unwrap();

    let days = store.trend();
    assert!(days.iter().all(|day| day.average == 0.0));
    assert_eq!(overall_average(&days), OverallMood::NoData);
    assert_ne!(overall_average(&days), OverallMood::Average(0.0));
}

#[test]
fn custom_policy_changes_retention_and_window() {
    let kv = MemoryKvStore::new();
    let mut store = MoodStore::load(kv, ManualClock::new(today())).with_policy(MoodPolicy {
        retention_days: 3,
        trend_window_days: 2,
    });
    assert_eq!(store.policy().retention_days, 3);
    store.log_mood_on(2, days_ago(4)).unwrap();
    store.log_mood_on(2, days_ago(3)).unwrap();

    assert_eq!(store.entries().len(), 1);
    assert_eq!(store.trend().len(), 2);
}
