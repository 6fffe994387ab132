//! HTTP client for the external generative-text service.
//!
//! Wraps a Gemini-style `generateContent` endpoint behind the
//! `GenerateText` seam. Responses are shaped before parsing: bullet
//! markers stripped and newline runs collapsed, so the section parser
//! only ever sees "Title: body" style lines.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::InsightError;
use crate::config;

/// Text generation seam for the insight pipeline.
///
/// Sync by design: stage calls run under `spawn_blocking` so the
/// orchestrator's timers keep ticking while a request is in flight.
pub trait GenerateText: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, InsightError>;
}

/// HTTP client for a Gemini-compatible generation endpoint.
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    /// Create a client with explicit endpoint and credentials.
    pub fn new(base_url: &str, api_key: &str, model: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        }
    }

    /// Client configured from the environment, with a 60s timeout.
    ///
    /// Returns `None` when no API key is configured; the caller
    /// decides whether that is fatal.
    pub fn from_env() -> Option<Self> {
        let key = config::generation_api_key()?;
        Some(Self::new(
            &config::generation_base_url(),
            &key,
            config::GENERATION_MODEL,
            60,
        ))
    }

    /// The model name being requested.
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Request body for `models/{model}:generateContent`
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Response body from `models/{model}:generateContent`
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateText for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                InsightError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                InsightError::Generation(format!(
                    "request timed out after {}s",
                    self.timeout_secs
                ))
            } else {
                InsightError::Generation(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(InsightError::ServiceStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| InsightError::Generation(e.to_string()))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(InsightError::NoResponse)?;

        Ok(sanitize_generated(&text))
    }
}

/// Shape raw generated text for the section parser.
///
/// Strips `*` and `•` bullet/bold markers (with any trailing
/// whitespace) and collapses newline runs to single newlines, in that
/// order, matching what the renderer expects.
pub fn sanitize_generated(text: &str) -> String {
    static STAR: OnceLock<Regex> = OnceLock::new();
    static NEWLINES: OnceLock<Regex> = OnceLock::new();
    static BULLET: OnceLock<Regex> = OnceLock::new();

    let star = STAR.get_or_init(|| Regex::new(r"\*\s*").expect("star pattern"));
    let newlines = NEWLINES.get_or_init(|| Regex::new(r"\n+").expect("newline pattern"));
    let bullet = BULLET.get_or_init(|| Regex::new(r"•\s*").expect("bullet pattern"));

    let text = star.replace_all(text, "");
    let text = newlines.replace_all(&text, "\n");
    let text = bullet.replace_all(&text, "");
    text.into_owned()
}

/// Mock generator for testing — returns scripted responses in order.
pub struct MockGenerator {
    responses: Mutex<VecDeque<Result<String, String>>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue a successful response.
    pub fn respond_with(self, text: &str) -> Self {
        self.responses
            .lock()
            .expect("mock lock")
            .push_back(Ok(text.to_string()));
        self
    }

    /// Queue a failed stage call.
    pub fn fail_with(self, message: &str) -> Self {
        self.responses
            .lock()
            .expect("mock lock")
            .push_back(Err(message.to_string()));
        self
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerateText for MockGenerator {
    fn generate(&self, _prompt: &str) -> Result<String, InsightError> {
        match self.responses.lock().expect("mock lock").pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(InsightError::Generation(message)),
            None => Err(InsightError::NoResponse),
        }
    }
}
