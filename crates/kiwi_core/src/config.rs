//! Layered application configuration.
//!
//! # Responsibility
//! - Merge built-in defaults, an optional TOML file and `KIWI__*` env vars.
//! - Convert raw settings into typed store/suggestion settings.
//!
//! # Invariants
//! - Loading never panics; every failure is a `ConfigError`.
//! - A missing default config file is not an error; a missing explicit one is.

use crate::model::task::Priority;
use crate::model::theme::Theme;
use crate::service::mood_store::{MoodPolicy, DEFAULT_RETENTION_DAYS, DEFAULT_TREND_WINDOW_DAYS};
use crate::service::tracker::TrackerSettings;
use crate::suggest::GeminiSettings;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "kiwi";
const CONFIG_FILE_NAME: &str = "kiwi.toml";
const DB_FILE_NAME: &str = "kiwi.sqlite3";
const ENV_PREFIX: &str = "KIWI";
const ENV_SEPARATOR: &str = "__";
/// Conventional variable consulted when no API key is configured.
const API_KEY_FALLBACK_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug)]
pub enum ConfigError {
    Load(config::ConfigError),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "failed to load configuration: {err}"),
            Self::Invalid(details) => write!(f, "invalid configuration: {details}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(value: config::ConfigError) -> Self {
        Self::Load(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub suggestions: SuggestionConfig,
    pub tasks: TasksConfig,
    pub mood: MoodConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: crate::logging::default_log_level().to_string(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        let defaults = GeminiSettings::default();
        Self {
            endpoint: defaults.endpoint,
            model: defaults.model,
            api_key: None,
            timeout_secs: defaults.timeout.as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TasksConfig {
    pub quick_add_priority: i64,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            quick_add_priority: i64::from(Priority::QUICK_ADD.value()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MoodConfig {
    pub retention_days: u32,
    pub trend_window_days: u32,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            retention_days: DEFAULT_RETENTION_DAYS,
            trend_window_days: DEFAULT_TREND_WINDOW_DAYS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Stand-in for the OS colour-scheme preference.
    pub system_theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            system_theme: Theme::Light.as_str().to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from `explicit_path` (required) or the default
    /// per-user location (optional), then applies `KIWI__SECTION__KEY` env
    /// overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        match explicit_path {
            Some(path) => {
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                if let Some(path) = default_config_path() {
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR),
            )
            .build()?;
        Ok(settings.try_deserialize::<AppConfig>()?)
    }

    /// Database file location; falls back to the per-user data directory.
    pub fn db_path(&self) -> PathBuf {
        self.storage
            .db_path
            .clone()
            .unwrap_or_else(|| app_dir(dirs::data_dir()).join(DB_FILE_NAME))
    }

    /// Absolute log directory; falls back to the per-user local data dir.
    pub fn log_dir(&self) -> PathBuf {
        self.logging
            .dir
            .clone()
            .unwrap_or_else(|| app_dir(dirs::data_local_dir()).join("logs"))
    }

    pub fn tracker_settings(&self) -> Result<TrackerSettings, ConfigError> {
        let quick_add_priority = Priority::new(self.tasks.quick_add_priority)
            .map_err(|err| ConfigError::Invalid(format!("tasks.quick_add_priority: {err}")))?;
        if self.mood.trend_window_days == 0 {
            return Err(ConfigError::Invalid(
                "mood.trend_window_days must be at least 1".to_string(),
            ));
        }
        let system_theme = self
            .ui
            .system_theme
            .parse::<Theme>()
            .map_err(|err| ConfigError::Invalid(format!("ui.system_theme: {err}")))?;

        Ok(TrackerSettings {
            quick_add_priority,
            mood_policy: MoodPolicy {
                retention_days: self.mood.retention_days,
                trend_window_days: self.mood.trend_window_days,
            },
            system_theme,
        })
    }

    /// Gemini settings; the API key falls back to `GEMINI_API_KEY`.
    pub fn gemini_settings(&self) -> GeminiSettings {
        let api_key = self
            .suggestions
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_FALLBACK_ENV).ok());
        GeminiSettings {
            endpoint: self.suggestions.endpoint.clone(),
            model: self.suggestions.model.clone(),
            api_key,
            timeout: Duration::from_secs(self.suggestions.timeout_secs),
        }
    }
}

/// `$CONFIG_DIR/kiwi/kiwi.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
}

fn app_dir(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(std::env::temp_dir).join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError};
    use crate::model::theme::Theme;
    use std::path::PathBuf;

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kiwi.toml");
        std::fs::write(
            &path,
            r#"
[storage]
db_path = "/tmp/kiwi-test.sqlite3"

[tasks]
quick_add_priority = 5

[mood]
retention_days = 14

[ui]
system_theme = "dark"
"#,
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.db_path(), PathBuf::from("/tmp/kiwi-test.sqlite3"));

        let settings = cfg.tracker_settings().unwrap();
        assert_eq!(settings.quick_add_priority.value(), 5);
        assert_eq!(settings.mood_policy.retention_days, 14);
        assert_eq!(settings.mood_policy.trend_window_days, 7);
        assert_eq!(settings.system_theme, Theme::Dark);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn out_of_range_quick_add_priority_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.tasks.quick_add_priority = 0;
        assert!(matches!(
            cfg.tracker_settings(),
            Err(ConfigError::Invalid(_))
        ));
    }
}
