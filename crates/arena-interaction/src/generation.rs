//! GeminiClient - Direct REST API implementation for Gemini.
//!
//! This client calls the Gemini REST API directly and is the only component
//! that talks to the network. It applies the timeout/retry policy: transient
//! transport failures and 429/5xx responses are retried with exponential
//! backoff up to a small fixed bound; 4xx application errors are not. A
//! well-formed envelope with no usable content maps to `EmptyResponse`,
//! which callers treat as a soft failure.

use arena_core::error::{ArenaError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_BASE_BACKOFF: Duration = Duration::from_millis(500);

/// A generative text backend.
///
/// The single seam between the pipeline and the external service. When
/// `output_schema` is supplied the backend is asked to conform its own
/// output to that schema; this is the preferred path wherever the service
/// supports it, since it removes most of the sanitizer/validator burden
/// downstream.
#[async_trait]
pub trait GenerativeAgent: Send + Sync {
    /// Generates raw text for a composed prompt.
    async fn generate(&self, prompt: &str, output_schema: Option<&Value>) -> Result<String>;
}

/// Client for the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    timeout: Duration,
    max_retries: u32,
    base_backoff: Duration,
}

impl GeminiClient {
    /// Creates a new client with the provided API key and the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            base_backoff: DEFAULT_BASE_BACKOFF,
        }
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the retry bound for transient failures.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    async fn send_request(
        &self,
        body: &GenerateContentRequest,
    ) -> std::result::Result<String, SendFailure> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|err| SendFailure {
                error: ArenaError::upstream(None, format!("Gemini API request failed: {err}")),
                retryable: err.is_connect() || err.is_timeout(),
                retry_after: None,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|err| SendFailure {
                error: ArenaError::internal(format!("Failed to parse Gemini response: {err}")),
                retryable: false,
                retry_after: None,
            })?;

        extract_text_response(parsed).ok_or(SendFailure {
            error: ArenaError::EmptyResponse,
            retryable: false,
            retry_after: None,
        })
    }
}

#[async_trait]
impl GenerativeAgent for GeminiClient {
    async fn generate(&self, prompt: &str, output_schema: Option<&Value>) -> Result<String> {
        let request = GenerateContentRequest::new(prompt, output_schema);

        let mut attempt: u32 = 0;
        loop {
            match self.send_request(&request).await {
                Ok(text) => return Ok(text),
                Err(failure) if failure.retryable && attempt < self.max_retries => {
                    let delay = failure
                        .retry_after
                        .unwrap_or_else(|| self.base_backoff * 2u32.pow(attempt));
                    attempt += 1;
                    tracing::warn!(
                        "[GeminiClient] transient failure ({}), retry {}/{} in {:?}",
                        failure.error,
                        attempt,
                        self.max_retries,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(failure) => return Err(failure.error),
            }
        }
    }
}

/// A failed send, classified for the retry loop.
struct SendFailure {
    error: ArenaError,
    retryable: bool,
    retry_after: Option<Duration>,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(
        rename = "generationConfig",
        skip_serializing_if = "Option::is_none"
    )]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    fn new(prompt: &str, output_schema: Option<&Value>) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: output_schema.map(|schema| GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema.clone(),
            }),
        }
    }
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Option<Vec<PartResponse>>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

/// Pulls the first usable text part out of a response envelope.
///
/// An empty or missing candidates list is a valid, non-error response;
/// `None` here becomes `EmptyResponse` upstream.
fn extract_text_response(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .and_then(|mut candidates| {
            if candidates.is_empty() {
                None
            } else {
                Some(candidates.remove(0))
            }
        })
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts)
        .and_then(|parts| parts.into_iter().find_map(|part| part.text))
        .filter(|text| !text.trim().is_empty())
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> SendFailure {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper
                .error
                .message
                .or_else(|| wrapper.error.code.map(|c| format!("error code {c}")))
                .unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    SendFailure {
        error: ArenaError::upstream(Some(status.as_u16()), message),
        retryable,
        retry_after,
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    // Retry-After HTTP-date parsing is omitted for simplicity
    None
}
