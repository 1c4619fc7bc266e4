//! AI wellness task suggestions.
//!
//! # Responsibility
//! - Build the coaching prompt and structured-output schema.
//! - Call a text-generation transport and parse its JSON answer.
//! - Run requests asynchronously so only the newest one reaches the UI.
//!
//! # Invariants
//! - Failures never touch task or mood state; they surface as
//!   `SuggestionFetchError` and an empty suggestion list.
//! - No automatic retries.

use crate::model::mood::MoodScore;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod client;
mod dispatcher;
mod gemini;
mod prompt;

pub use client::{parse_suggestions, SuggestionClient, SuggestionOutcome};
pub use dispatcher::{SuggestionDispatcher, SuggestionUpdate};
pub use gemini::{extract_candidate_text, GeminiSettings, GeminiTransport};
pub use prompt::{build_prompt, response_schema, SUGGESTION_COUNT};

/// Inputs for one suggestion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub mood: MoodScore,
    pub task_titles: Vec<String>,
}

/// Prompt plus the JSON schema the model must answer with.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub response_schema: serde_json::Value,
}

/// Any failure while fetching suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionFetchError {
    /// Transport unavailable or misconfigured (e.g. no API key).
    NotConfigured(String),
    /// Network-level failure or timeout.
    Network(String),
    /// Service answered with a non-success HTTP status.
    Status(u16),
    /// Response body or model text is not valid JSON.
    MalformedJson(String),
    /// JSON is valid but does not match the suggestion schema.
    SchemaMismatch(String),
}

impl Display for SuggestionFetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConfigured(details) => write!(f, "suggestion service not configured: {details}"),
            Self::Network(details) => write!(f, "suggestion request failed: {details}"),
            Self::Status(code) => write!(f, "suggestion service returned HTTP {code}"),
            Self::MalformedJson(details) => write!(f, "suggestion response is not valid JSON: {details}"),
            Self::SchemaMismatch(details) => {
                write!(f, "suggestion response does not match schema: {details}")
            }
        }
    }
}

impl Error for SuggestionFetchError {}

/// Text-generation backend returning the model's raw JSON text.
#[async_trait]
pub trait SuggestionTransport: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, SuggestionFetchError>;
}
