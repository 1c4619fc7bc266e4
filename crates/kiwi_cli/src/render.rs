//! Plain-text rendering of tracker projections.

use kiwi_core::{DashboardView, SuggestionOutcome, Task};

const BAR_WIDTH: f64 = 20.0;

pub fn print_tasks(view: &DashboardView, include_completed: bool) {
    if view.pending.is_empty() {
        println!("No tasks. Time to relax!");
    }
    for task in &view.pending {
        println!("{}", task_line(task));
    }

    if include_completed && view.has_completed() {
        println!();
        println!("Completed:");
        for task in &view.completed {
            println!("{}", task_line(task));
        }
    } else if view.has_completed() {
        println!("({} completed, use --all to show)", view.completed.len());
    }
}

fn task_line(task: &Task) -> String {
    let check = if task.completed { "[x]" } else { "[ ]" };
    let due = task
        .due_date
        .map(|day| format!(" (due {})", day.format("%d %b")))
        .unwrap_or_default();
    format!(
        "{check} P{} {}{due}  #{}",
        task.priority.value(),
        task.title,
        task.id
    )
}

pub fn print_trend(view: &DashboardView) {
    for bar in &view.trend {
        let width = (bar.height_percent / 100.0 * BAR_WIDTH).round() as usize;
        println!(
            "{} {:<20} {}",
            bar.date.format("%a"),
            "█".repeat(width),
            if bar.average > 0.0 {
                format!("{:.1}", bar.average)
            } else {
                "-".to_string()
            }
        );
    }
    println!("{}", overall_line(view));
}

fn overall_line(view: &DashboardView) -> String {
    format!(
        "Average mood over the last {} days: {}",
        view.trend.len(),
        view.overall
    )
}

pub fn print_suggestions(outcome: &SuggestionOutcome) {
    if let Some(err) = outcome.error() {
        println!("Could not load suggestions.");
        log::debug!("event=suggest_render module=cli status=error error={err}");
        return;
    }
    let suggestions = outcome.suggestions();
    if suggestions.is_empty() {
        println!("No suggestions right now.");
        return;
    }
    for (index, suggestion) in suggestions.iter().enumerate() {
        println!(
            "{}. P{} {}",
            index + 1,
            suggestion.priority.value(),
            suggestion.title
        );
        if !suggestion.notes.is_empty() {
            println!("   {}", suggestion.notes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::overall_line;
    use chrono::NaiveDate;
    use kiwi_core::{
        ManualClock, MemoryKvStore, MoodPolicy, SequentialIdGenerator, Tracker, TrackerSettings,
    };

    #[test]
    fn overall_line_names_configured_window() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let settings = TrackerSettings {
            mood_policy: MoodPolicy {
                retention_days: 30,
                trend_window_days: 3,
            },
            ..TrackerSettings::default()
        };
        let mut tracker = Tracker::open(
            MemoryKvStore::new(),
            SequentialIdGenerator::new(),
            ManualClock::new(today),
            settings,
        );
        tracker.change_mood(4).unwrap();

        assert_eq!(
            overall_line(&tracker.view()),
            "Average mood over the last 3 days: 4.0"
        );
    }
}
