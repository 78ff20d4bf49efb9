//! HTTP client for an OpenAI-compatible chat backend such as llama-server.

use std::time::Duration;

use petassist_core::{AssistSettings, RuntimeError, TextStream};
use reqwest::Client;
use tracing::{debug, info};

use super::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ModelList};
use super::sse;

/// Token returned by [`OpenAiClient::model_availability`] when the model is served.
pub const AVAILABLE: &str = "available";
/// Token returned when the backend is up but does not serve the model.
pub const UNAVAILABLE: &str = "unavailable";

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RuntimeError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RuntimeError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    pub fn from_settings(settings: &AssistSettings) -> Result<Self, RuntimeError> {
        Self::new(
            settings.effective_backend_url(),
            settings.effective_model(),
            Duration::from_secs(settings.effective_request_timeout_secs()),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Ask the backend whether it serves the configured model.
    ///
    /// Returns [`AVAILABLE`] or [`UNAVAILABLE`]; an unreachable backend is an error.
    pub async fn model_availability(&self) -> Result<&'static str, RuntimeError> {
        let response = self
            .http
            .get(self.url("/v1/models"))
            .send()
            .await
            .map_err(|e| RuntimeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RuntimeError::Transport(format!(
                "GET /v1/models returned {status}"
            )));
        }

        let models: ModelList = response
            .json()
            .await
            .map_err(|e| RuntimeError::UnexpectedResponse(e.to_string()))?;
        let ids: Vec<&str> = models.data.iter().map(|m| m.id.as_str()).collect();
        debug!(?ids, model = %self.model, "Backend models listed");

        Ok(if serves_model(&ids, &self.model) {
            AVAILABLE
        } else {
            UNAVAILABLE
        })
    }

    /// Fail unless the backend currently serves the model.
    pub async fn ensure_ready(&self) -> Result<(), RuntimeError> {
        match self.model_availability().await {
            Ok(AVAILABLE) => {
                info!(base_url = %self.base_url, model = %self.model, "Backend ready");
                Ok(())
            }
            Ok(_) => Err(RuntimeError::SessionCreation(format!(
                "model '{}' is not served by {}",
                self.model, self.base_url
            ))),
            Err(e) => Err(RuntimeError::SessionCreation(e.to_string())),
        }
    }

    fn request(&self, messages: Vec<ChatMessage>, stream: bool) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            stream,
            temperature: None,
        }
    }

    async fn post_chat(&self, body: &ChatCompletionRequest) -> Result<reqwest::Response, RuntimeError> {
        let response = self
            .http
            .post(self.url("/v1/chat/completions"))
            .json(body)
            .send()
            .await
            .map_err(|e| RuntimeError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response.text().await.unwrap_or_default();
        Err(RuntimeError::Invocation(format!(
            "chat completion returned {status}: {}",
            detail.trim()
        )))
    }

    /// Single-shot completion returning the assistant message text.
    pub async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, RuntimeError> {
        let body = self.request(messages, false);
        let response: ChatCompletionResponse = self
            .post_chat(&body)
            .await?
            .json()
            .await
            .map_err(|e| RuntimeError::UnexpectedResponse(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| RuntimeError::UnexpectedResponse("completion had no content".into()))
    }

    /// Streaming completion yielding content deltas.
    pub async fn complete_streaming(&self, messages: Vec<ChatMessage>) -> Result<TextStream, RuntimeError> {
        let body = self.request(messages, true);
        let response = self.post_chat(&body).await?;
        Ok(sse::content_deltas(response.bytes_stream()))
    }
}

/// llama-server lists whatever it loaded; `default` accepts any single model.
fn serves_model(ids: &[&str], model: &str) -> bool {
    if model == petassist_core::DEFAULT_MODEL {
        return !ids.is_empty();
    }
    ids.iter().any(|id| *id == model || id.rsplit('/').next() == Some(model))
}
