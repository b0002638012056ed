//! Gemini client, the single point of entry for all text generation calls.
//!
//! No other module may call the generation service directly; handlers depend on
//! the `TextGenerator` trait carried in `AppState`.
//!
//! One prompt in, one completion out. There are no retries and no client-side
//! timeout: a failed call is reported back to the user, who re-invokes it.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Value shipped in the sample `.env`; treated the same as no key at all.
const PLACEHOLDER_API_KEY: &str = "your_gemini_api_key";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Gemini API key is missing")]
    MissingKey,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Authentication failed (status {status})")]
    Unauthorized { status: u16 },

    #[error("Model not found: {0}")]
    NotFound(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl GenerationError {
    /// The warning shown to the user in place of generated text.
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::MissingKey => "⚠️ Gemini API key is missing. \
                Please set GEMINI_API_KEY and restart the service."
                .to_string(),
            GenerationError::BadRequest(message) => {
                format!("⚠️ Bad Request (400): {message}")
            }
            GenerationError::Unauthorized { status } => format!(
                "⚠️ Authentication Error ({status}): Invalid API key or insufficient permissions. \
                Please verify your API key."
            ),
            GenerationError::NotFound(_) => "⚠️ Not Found (404): Model not available. \
                Please check that your API key has access to the configured model."
                .to_string(),
            GenerationError::RateLimited => {
                "⚠️ Rate Limit (429): Too many requests. Please wait a moment and try again."
                    .to_string()
            }
            GenerationError::Api { message, .. } => format!(
                "⚠️ API Error: {message}. Please check your API key and permissions."
            ),
            GenerationError::Http(e) => {
                format!("⚠️ Error: {e}. Please check your API key and try again.")
            }
        }
    }
}

/// Anything that can turn a prompt into a completion.
///
/// `Ok(None)` means the service answered but produced no text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Option<String>, GenerationError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
    error: Option<ErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorBody {
    code: Option<u16>,
    message: Option<String>,
    status: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate's first text part.
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|content| content.parts.into_iter().find_map(|p| p.text))
    }
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    api_base: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: String, api_base: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            api_base,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }

    /// The configured key, unless it is blank or still the placeholder.
    fn usable_key(&self) -> Result<&str, GenerationError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != PLACEHOLDER_API_KEY)
            .ok_or(GenerationError::MissingKey)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Option<String>, GenerationError> {
        let key = self.usable_key()?;

        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", key)])
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| ErrorBody {
                    message: Some(body),
                    ..ErrorBody::default()
                });
            let err = classify_http_error(status, error);
            warn!("Gemini API returned {status}: {err}");
            return Err(err);
        }

        let payload: GenerateContentResponse = response.json().await?;

        if let Some(error) = payload.error {
            let err = classify_envelope_error(error);
            warn!("Gemini API reported an error in a {status} response: {err}");
            return Err(err);
        }

        let text = payload.into_text();
        if text.is_none() {
            warn!("Gemini API returned no candidates for model {}", self.model);
        } else {
            debug!("Gemini call succeeded (model: {})", self.model);
        }
        Ok(text)
    }
}

fn classify_http_error(status: StatusCode, error: ErrorBody) -> GenerationError {
    let message = error
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });
    match status.as_u16() {
        400 => GenerationError::BadRequest(message),
        401 | 403 => GenerationError::Unauthorized {
            status: status.as_u16(),
        },
        404 => GenerationError::NotFound(message),
        429 => GenerationError::RateLimited,
        code => GenerationError::Api {
            status: code,
            message,
        },
    }
}

/// Maps an error envelope found in an otherwise successful response.
/// The gRPC-style status string wins over the numeric code.
fn classify_envelope_error(error: ErrorBody) -> GenerationError {
    let message = error
        .message
        .unwrap_or_else(|| "Unknown error".to_string());
    let code = error.code.unwrap_or(0);
    match error.status.as_deref() {
        Some("INVALID_ARGUMENT") | Some("FAILED_PRECONDITION") => {
            GenerationError::BadRequest(message)
        }
        Some("UNAUTHENTICATED") => GenerationError::Unauthorized { status: 401 },
        Some("PERMISSION_DENIED") => GenerationError::Unauthorized { status: 403 },
        Some("NOT_FOUND") => GenerationError::NotFound(message),
        Some("RESOURCE_EXHAUSTED") => GenerationError::RateLimited,
        _ => match code {
            400 => GenerationError::BadRequest(message),
            401 | 403 => GenerationError::Unauthorized { status: code },
            404 => GenerationError::NotFound(message),
            429 => GenerationError::RateLimited,
            _ => GenerationError::Api {
                status: code,
                message,
            },
        },
    }
}
