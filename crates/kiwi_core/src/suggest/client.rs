//! Suggestion client: prompt → transport → parsed suggestions.

use super::prompt::{build_prompt, response_schema};
use super::{GenerationRequest, SuggestionFetchError, SuggestionRequest, SuggestionTransport};
use crate::model::suggestion::SuggestedTask;
use crate::model::task::Priority;
use log::{debug, info, warn};
use serde::Deserialize;
use std::time::Instant;

/// Result of one suggestion request as seen by the presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    Loaded(Vec<SuggestedTask>),
    Failed(SuggestionFetchError),
}

impl SuggestionOutcome {
    /// Suggestions to render; empty on failure.
    pub fn suggestions(&self) -> &[SuggestedTask] {
        match self {
            Self::Loaded(items) => items,
            Self::Failed(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&SuggestionFetchError> {
        match self {
            Self::Loaded(_) => None,
            Self::Failed(err) => Some(err),
        }
    }
}

impl From<Result<Vec<SuggestedTask>, SuggestionFetchError>> for SuggestionOutcome {
    fn from(value: Result<Vec<SuggestedTask>, SuggestionFetchError>) -> Self {
        match value {
            Ok(items) => Self::Loaded(items),
            Err(err) => Self::Failed(err),
        }
    }
}

pub struct SuggestionClient<T: SuggestionTransport> {
    transport: T,
}

impl<T: SuggestionTransport> SuggestionClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Requests suggestions for the given mood and task titles.
    ///
    /// The returned list may hold more or fewer than `SUGGESTION_COUNT` items.
    pub async fn fetch(
        &self,
        request: &SuggestionRequest,
    ) -> Result<Vec<SuggestedTask>, SuggestionFetchError> {
        let started_at = Instant::now();
        let generation = GenerationRequest {
            prompt: build_prompt(request),
            response_schema: response_schema(),
        };
        info!(
            "event=suggest_fetch module=suggest status=start mood={} task_count={}",
            request.mood.value(),
            request.task_titles.len()
        );

        let result = self
            .transport
            .generate(&generation)
            .await
            .and_then(|text| parse_suggestions(&text));

        match &result {
            Ok(items) => info!(
                "event=suggest_fetch module=suggest status=ok count={} duration_ms={}",
                items.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=suggest_fetch module=suggest status=error duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        result
    }

    /// Same as `fetch`, folded into a renderable outcome.
    pub async fn fetch_outcome(&self, request: &SuggestionRequest) -> SuggestionOutcome {
        self.fetch(request).await.into()
    }
}

#[derive(Debug, Deserialize)]
struct SuggestionEnvelope {
    #[serde(alias = "suggestions")]
    sugestie: Vec<WireSuggestion>,
}

#[derive(Debug, Deserialize)]
struct WireSuggestion {
    #[serde(alias = "title")]
    tytul: String,
    #[serde(default, alias = "notes")]
    notatki: String,
    #[serde(alias = "priority")]
    priorytet: i64,
}

/// Parses the model's JSON text into suggestions.
///
/// Rules:
/// - Entries with a blank title are dropped.
/// - Missing notes become empty; priorities are clamped into `1..=5`.
pub fn parse_suggestions(text: &str) -> Result<Vec<SuggestedTask>, SuggestionFetchError> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|err| SuggestionFetchError::MalformedJson(err.to_string()))?;
    let envelope: SuggestionEnvelope = serde_json::from_value(value)
        .map_err(|err| SuggestionFetchError::SchemaMismatch(err.to_string()))?;

    let total = envelope.sugestie.len();
    let items: Vec<SuggestedTask> = envelope
        .sugestie
        .into_iter()
        .filter_map(|wire| {
            let title = wire.tytul.trim();
            if title.is_empty() {
                return None;
            }
            Some(SuggestedTask {
                title: title.to_string(),
                notes: wire.notatki.trim().to_string(),
                priority: Priority::clamped(wire.priorytet),
            })
        })
        .collect();

    if items.len() != total {
        debug!(
            "event=suggest_parse module=suggest status=ok dropped={}",
            total - items.len()
        );
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::parse_suggestions;
    use crate::suggest::SuggestionFetchError;

    #[test]
    fn parses_polish_wire_names() {
        let text = r#"{"sugestie":[
            {"tytul":"Wypij wodę 💧","notatki":"Szklanka teraz","priorytet":4},
            {"tytul":"Spacer","priorytet":2}
        ]}"#;
        let items = parse_suggestions(text).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Wypij wodę 💧");
        assert_eq!(items[0].priority.value(), 4);
        assert_eq!(items[1].notes, "");
    }

    #[test]
    fn accepts_english_aliases_and_clamps_priority() {
        let text = r#"{"suggestions":[{"title":"Stretch","notes":"","priority":11}]}"#;
        let items = parse_suggestions(text).unwrap();
        assert_eq!(items[0].priority.value(), 5);
    }

    #[test]
    fn drops_blank_titles() {
        let text = r#"{"sugestie":[{"tytul":"  ","priorytet":3},{"tytul":"Sen","priorytet":3}]}"#;
        let items = parse_suggestions(text).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Sen");
    }

    #[test]
    fn classifies_malformed_and_mismatched_payloads() {
        assert!(matches!(
            parse_suggestions("not json"),
            Err(SuggestionFetchError::MalformedJson(_))
        ));
        assert!(matches!(
            parse_suggestions(r#"{"sugestie":[{"tytul":1,"priorytet":"high"}]}"#),
            Err(SuggestionFetchError::SchemaMismatch(_))
        ));
        assert!(matches!(
            parse_suggestions(r#"[]"#),
            Err(SuggestionFetchError::SchemaMismatch(_))
        ));
    }
}
