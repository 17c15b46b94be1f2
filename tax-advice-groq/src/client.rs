use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tax_core::advice::{AdviceError, AdviceProvider, AdviceRequest};
use tracing::{debug, error};

pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

const MAX_TOKENS: u32 = 4000;
const TEMPERATURE: f32 = 0.1;

/// Connection-pooled client for the Groq chat-completions API.
pub struct GroqAdvisor {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GroqAdvisor {
    /// # Errors
    ///
    /// [`AdviceError::Configuration`] when the key is empty or the HTTP client
    /// cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, AdviceError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AdviceError::Configuration(
                "GROQ_API_KEY not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| AdviceError::Configuration(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            model: model.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        })
    }

    /// Point at an OpenAI-compatible endpoint other than Groq's.
    pub fn with_endpoint(
        mut self,
        endpoint: impl Into<String>,
    ) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn chat_request<'a>(
        &'a self,
        request: &'a AdviceRequest,
    ) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

#[async_trait]
impl AdviceProvider for GroqAdvisor {
    fn name(&self) -> &str {
        "groq"
    }

    async fn generate(
        &self,
        request: &AdviceRequest,
    ) -> Result<String, AdviceError> {
        debug!(model = %self.model, "calling Groq chat completions");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.chat_request(request))
            .send()
            .await
            .map_err(|e| {
                error!("Groq request failed: {}", e);
                AdviceError::Request(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "Groq error response");
            return Err(AdviceError::Response(format!(
                "HTTP {status}: {}",
                error_message(&body)
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AdviceError::Response(format!("unreadable body: {e}")))?;

        first_choice_text(chat)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn first_choice_text(chat: ChatResponse) -> Result<String, AdviceError> {
    chat.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| AdviceError::Response("no choices in response".to_string()))
}

/// OpenAI-style `{"error": {"message": ...}}`, else the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
