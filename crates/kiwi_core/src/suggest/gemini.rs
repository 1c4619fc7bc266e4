//! Gemini `generateContent` REST transport.

use super::{GenerationRequest, SuggestionFetchError, SuggestionTransport};
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the Gemini API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiSettings {
    /// Base URL without trailing slash, e.g. `.../v1beta`.
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

pub struct GeminiTransport {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl GeminiTransport {
    /// Builds a transport; fails when no API key is configured.
    pub fn new(settings: &GeminiSettings) -> Result<Self, SuggestionFetchError> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| SuggestionFetchError::NotConfigured("missing API key".to_string()))?
            .to_string();

        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|err| SuggestionFetchError::NotConfigured(err.to_string()))?;

        Ok(Self {
            http,
            url: format!(
                "{}/models/{}:generateContent",
                settings.endpoint.trim_end_matches('/'),
                settings.model
            ),
            api_key,
        })
    }
}

#[async_trait]
impl SuggestionTransport for GeminiTransport {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, SuggestionFetchError> {
        let body = GenerateContentBody {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: request.response_schema.clone(),
            },
        };

        let response = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| SuggestionFetchError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SuggestionFetchError::Status(status.as_u16()));
        }

        let payload = response
            .text()
            .await
            .map_err(|err| SuggestionFetchError::Network(err.to_string()))?;
        debug!(
            "event=gemini_response module=suggest status=ok bytes={}",
            payload.len()
        );
        extract_candidate_text(&payload)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Pulls the model text out of a `generateContent` response body.
///
/// Concatenates all text parts of the first candidate.
pub fn extract_candidate_text(payload: &str) -> Result<String, SuggestionFetchError> {
    let response: GenerateContentResponse = serde_json::from_str(payload)
        .map_err(|err| SuggestionFetchError::MalformedJson(err.to_string()))?;

    let content = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .ok_or_else(|| SuggestionFetchError::SchemaMismatch("no candidates".to_string()))?;

    let text: String = content.parts.into_iter().map(|part| part.text).collect();
    if text.trim().is_empty() {
        return Err(SuggestionFetchError::SchemaMismatch(
            "candidate has no text".to_string(),
        ));
    }
    Ok(text)
}
