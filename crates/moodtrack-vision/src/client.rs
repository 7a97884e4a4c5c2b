//! OpenAI-compatible vision client.
//!
//! Sends the image together with a fixed "describe the vibe" prompt to a
//! chat-completions endpoint and returns the model's prose. Transient
//! failures are retried with exponential backoff; anything else, including
//! a reply without text, surfaces as a [`VisionError`] so that no garbage
//! string ever reaches the ranking engine.

use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::{Config, DEFAULT_API_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_VISION_MODEL};
use crate::error::{VisionError, VisionResult};
use crate::image::ImageSource;

/// Instruction sent alongside every image.
pub const VIBE_PROMPT: &str =
    "Analyze this image vibe. Return descriptive text; mention colors, mood, scene, era, style.";

/// Longest provider error body kept in an error message.
const MAX_ERROR_MESSAGE_LEN: usize = 300;

/// Produces descriptive text for an image.
#[async_trait::async_trait]
pub trait VibeAnalyzer: Send + Sync {
    async fn describe(&self, image: &ImageSource) -> VisionResult<String>;
}

// ---------------------------------------------------------------------------
// Wire types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Debug, Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for an OpenAI-compatible chat-completions API with image input.
#[derive(Debug, Clone)]
pub struct VisionClient {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    max_retries: usize,
    min_retry_delay: Duration,
}

impl VisionClient {
    /// Create a client with default endpoint, model and limits.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>) -> VisionResult<Self> {
        Self::with_timeout(api_key, Duration::from_secs(60))
    }

    fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> VisionResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent("moodtrack/0.1.0 (https://github.com/oxur/moodtrack)")
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_VISION_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            max_retries: 2,
            min_retry_delay: Duration::from_secs(1),
        })
    }

    /// Create a client from configuration.
    ///
    /// # Errors
    /// Returns [`VisionError::MissingApiKey`] if no key is configured.
    pub fn from_config(config: &Config) -> VisionResult<Self> {
        let api_key = config.api_key().ok_or(VisionError::MissingApiKey)?;

        Ok(
            Self::with_timeout(api_key, Duration::from_secs(config.request_timeout_secs))?
                .with_base_url(&config.api_base_url)
                .with_model(&config.vision_model)
                .with_max_tokens(config.max_tokens)
                .with_max_retries(config.max_retries),
        )
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Initial backoff delay; doubles on every retry.
    #[must_use]
    pub fn with_min_retry_delay(mut self, delay: Duration) -> Self {
        self.min_retry_delay = delay;
        self
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn request_body<'a>(&'a self, image_url: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text { text: VIBE_PROMPT },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: image_url },
                    },
                ],
            }],
            max_tokens: self.max_tokens,
        }
    }

    async fn send_once(&self, body: &ChatRequest<'_>) -> VisionResult<String> {
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(VisionError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(VisionError::Http {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| VisionError::Parse(e.to_string()))?;

        extract_analysis(parsed)
    }
}

#[async_trait::async_trait]
impl VibeAnalyzer for VisionClient {
    async fn describe(&self, image: &ImageSource) -> VisionResult<String> {
        let url = image.to_url()?;
        let body = self.request_body(&url);

        log::info!("Analyzing {} with {}", image, self.model);

        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.min_retry_delay)
            .with_max_times(self.max_retries);

        let analysis = (|| async { self.send_once(&body).await })
            .retry(backoff)
            .when(VisionError::is_transient)
            .notify(|err: &VisionError, dur: Duration| {
                log::warn!("Vision request failed, retrying in {:?}: {}", dur, err);
            })
            .await?;

        log::debug!("Received {} characters of analysis", analysis.len());

        Ok(analysis)
    }
}

/// Pull the analysis text out of a chat-completions reply.
fn extract_analysis(response: ChatResponse) -> VisionResult<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(VisionError::EmptyResponse)
}

/// Prefer the provider's structured error message over the raw body.
fn error_message(body: &str) -> String {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    if message.chars().count() > MAX_ERROR_MESSAGE_LEN {
        let truncated: String = message.chars().take(MAX_ERROR_MESSAGE_LEN).collect();
        format!("{truncated}...")
    } else {
        message
    }
}
