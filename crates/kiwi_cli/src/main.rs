//! `kiwi` command-line front-end.
//!
//! # Responsibility
//! - Parse user intents and forward them to `kiwi_core::Tracker`.
//! - Render tracker projections as plain text.
//!
//! # Invariants
//! - Every mutation goes through the tracker; this crate holds no state.
//! - Validation errors exit non-zero without touching storage.

mod render;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use kiwi_core::db::open_db;
use kiwi_core::suggest::GeminiTransport;
use kiwi_core::{
    init_logging, AppConfig, MoodScore, Priority, SqliteKvStore, SuggestionClient,
    SuggestionDispatcher, SuggestionOutcome, SystemClock, TaskDraft, Tracker, UuidIdGenerator,
};
use log::{info, warn};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

type CliResult = Result<(), Box<dyn Error>>;
type CliTracker<'conn> = Tracker<SqliteKvStore<'conn>, UuidIdGenerator, SystemClock>;

#[derive(Parser)]
#[command(name = "kiwi", version, about = "Tasks, moods and wellness nudges")]
struct Cli {
    /// Configuration file (defaults to the per-user kiwi.toml).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Database file, overriding configuration.
    #[arg(long, global = true, value_name = "FILE")]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage tasks.
    #[command(subcommand)]
    Task(TaskCommand),
    /// Log and review moods.
    #[command(subcommand)]
    Mood(MoodCommand),
    /// Ask Dr Kiwi for wellness tasks.
    Suggest {
        /// Mood to base suggestions on (defaults to today's latest entry).
        #[arg(long, value_name = "1-5")]
        mood: Option<i64>,
        /// Add the suggestions with these 1-based positions as tasks.
        #[arg(long, value_name = "N", num_args = 1..)]
        accept: Vec<usize>,
    },
    /// Show or switch the colour theme.
    #[command(subcommand)]
    Theme(ThemeCommand),
    /// Print the core version.
    Version,
}

#[derive(Args)]
struct TaskFields {
    title: String,
    #[arg(short, long, default_value = "")]
    notes: String,
    #[arg(short, long, default_value_t = 3, value_name = "1-5")]
    priority: i64,
    #[arg(short, long, value_name = "YYYY-MM-DD")]
    due: Option<NaiveDate>,
}

impl TaskFields {
    fn into_draft(self) -> Result<TaskDraft, Box<dyn Error>> {
        Ok(TaskDraft::new(self.title)
            .notes(self.notes)
            .priority(Priority::new(self.priority)?)
            .due_date(self.due))
    }
}

#[derive(Subcommand)]
enum TaskCommand {
    Add(TaskFields),
    /// Add a task from a title only.
    Quick { title: String },
    Edit {
        id: String,
        #[command(flatten)]
        fields: TaskFields,
    },
    Delete { id: String },
    Toggle { id: String },
    List {
        /// Also show completed tasks.
        #[arg(short, long)]
        all: bool,
    },
}

#[derive(Subcommand)]
enum MoodCommand {
    /// Log a mood (1-5) for today.
    Log {
        value: i64,
        /// Fetch suggestions for the new mood afterwards.
        #[arg(long)]
        suggest: bool,
    },
    /// Show the daily mood trend.
    Trend,
}

#[derive(Subcommand)]
enum ThemeCommand {
    Show,
    Toggle,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult {
    if let Command::Version = cli.command {
        println!("kiwi_core version={}", kiwi_core::core_version());
        return Ok(());
    }

    let cfg = AppConfig::load(cli.config.as_deref())?;
    if let Err(err) = init_logging(&cfg.logging.level, cfg.log_dir()) {
        eprintln!("warning: logging disabled: {err}");
    }

    let db_path = cli.db.clone().unwrap_or_else(|| cfg.db_path());
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = open_db(&db_path)?;
    let kv = SqliteKvStore::try_new(&conn)?;
    let mut tracker = Tracker::open(kv, UuidIdGenerator, SystemClock, cfg.tracker_settings()?);

    match cli.command {
        Command::Task(command) => run_task(&mut tracker, command),
        Command::Mood(MoodCommand::Log { value, suggest }) => {
            let request = tracker.change_mood(value)?;
            println!(
                "Logged mood {} {}",
                request.mood.value(),
                request.mood.emoji()
            );
            render::print_trend(&tracker.view());
            if suggest {
                suggest_and_accept(&mut tracker, &cfg, &[]).await?;
            }
            Ok(())
        }
        Command::Mood(MoodCommand::Trend) => {
            render::print_trend(&tracker.view());
            Ok(())
        }
        Command::Suggest { mood, accept } => {
            let mood = match mood {
                Some(value) => Some(MoodScore::new(value)?),
                None => latest_mood_today(&tracker),
            };
            if let Some(mood) = mood {
                tracker.set_current_mood(mood);
            }
            suggest_and_accept(&mut tracker, &cfg, &accept).await
        }
        Command::Theme(ThemeCommand::Show) => {
            println!("{}", tracker.theme());
            Ok(())
        }
        Command::Theme(ThemeCommand::Toggle) => {
            println!("{}", tracker.toggle_theme()?);
            Ok(())
        }
        Command::Version => Ok(()),
    }
}

fn run_task(tracker: &mut CliTracker<'_>, command: TaskCommand) -> CliResult {
    match command {
        TaskCommand::Add(fields) => {
            let task = tracker.tasks_mut().add(fields.into_draft()?)?;
            println!("Added {}", task.id);
        }
        TaskCommand::Quick { title } => {
            let task = tracker.tasks_mut().quick_add(title)?;
            println!("Added {}", task.id);
        }
        TaskCommand::Edit { id, fields } => {
            if tracker.tasks_mut().update(&id, fields.into_draft()?)? {
                println!("Updated {id}");
            } else {
                println!("No task {id}");
            }
        }
        TaskCommand::Delete { id } => {
            if tracker.tasks_mut().delete(&id)? {
                println!("Deleted {id}");
            } else {
                println!("No task {id}");
            }
        }
        TaskCommand::Toggle { id } => {
            if tracker.tasks_mut().toggle_completion(&id)? {
                println!("Toggled {id}");
            } else {
                println!("No task {id}");
            }
        }
        TaskCommand::List { all } => render::print_tasks(&tracker.view(), all),
    }
    Ok(())
}

fn latest_mood_today(tracker: &CliTracker<'_>) -> Option<MoodScore> {
    let today = tracker.moods().today();
    tracker
        .moods()
        .entries()
        .iter()
        .rev()
        .find(|entry| entry.date == today)
        .map(|entry| entry.mood)
}

async fn suggest_and_accept(
    tracker: &mut CliTracker<'_>,
    cfg: &AppConfig,
    accept: &[usize],
) -> CliResult {
    let transport = match GeminiTransport::new(&cfg.gemini_settings()) {
        Ok(transport) => transport,
        Err(err) => {
            warn!("event=suggest_setup module=cli status=error error={err}");
            render::print_suggestions(&SuggestionOutcome::Failed(err));
            return Ok(());
        }
    };

    let (mut dispatcher, mut updates) = SuggestionDispatcher::new(SuggestionClient::new(transport));
    dispatcher.dispatch(tracker.suggestion_request());
    let Some(update) = updates.recv().await else {
        return Ok(());
    };
    render::print_suggestions(&update.outcome);

    let suggestions = update.outcome.suggestions();
    for position in accept {
        match position.checked_sub(1).and_then(|index| suggestions.get(index)) {
            Some(suggestion) => {
                let task = tracker.accept_suggestion(suggestion)?;
                info!("event=suggest_accept module=cli status=ok task_id={}", task.id);
                println!("Added {} from suggestion {position}", task.id);
            }
            None => println!("No suggestion {position}"),
        }
    }
    Ok(())
}
