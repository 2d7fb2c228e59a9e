use crate::analysis::Analyst;
use crate::llm::config::LlmConfig;
use crate::llm::error::LlmError;
use crate::llm::parse::{parse_response, ParsedContent};
use crate::llm::prompts::{extraction_prompt, suggestion_prompt, ExtractionFocus};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Client for a chat-completions endpoint speaking the OpenAI wire format
pub struct LlmClient {
    http: reqwest::Client,
    config: LlmConfig,
    api_key: String,
    focus: ExtractionFocus,
}

impl LlmClient {
    /// Create a client. Fails only when the configuration is unusable, most
    /// commonly because no credential was resolved.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Configuration)?;

        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| LlmError::Configuration("API key is missing".to_string()))?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            config,
            api_key,
            focus: ExtractionFocus::default(),
        })
    }

    /// Replace the underlying HTTP client, e.g. to tune proxies or TLS
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn with_focus(mut self, focus: ExtractionFocus) -> Self {
        self.focus = focus;
        self
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Stage one: pull structured data out of free text
    pub async fn extract_data(&self, text: &str) -> Result<Value, LlmError> {
        self.extract_content(text).await.map(ParsedContent::into_value)
    }

    /// Stage two: ask for a chart or summary-card representation of extracted data
    pub async fn suggest_visualization(&self, extracted_data: &Value) -> Result<Value, LlmError> {
        self.suggest_content(extracted_data)
            .await
            .map(ParsedContent::into_value)
    }

    /// Like [`extract_data`](Self::extract_data), keeping whether the completion was JSON
    pub async fn extract_content(&self, text: &str) -> Result<ParsedContent, LlmError> {
        if text.trim().is_empty() {
            return Err(LlmError::EmptyInput);
        }

        let prompt = extraction_prompt(text, self.focus);
        let content = self.complete(&prompt).await?;
        Ok(parse_response(&content))
    }

    pub async fn suggest_content(&self, extracted_data: &Value) -> Result<ParsedContent, LlmError> {
        let prompt = suggestion_prompt(extracted_data);
        let content = self.complete(&prompt).await?;
        Ok(parse_response(&content))
    }

    /// Send one prompt as a single user message and return the completion text
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        if self.config.debug {
            debug!(
                "Sending request to {}: model={}, prompt_length={}",
                self.config.api_base,
                self.config.model,
                prompt.len()
            );
        }

        let exchange = async {
            let response = self
                .http
                .post(&self.config.api_base)
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let timeout_secs = self.config.timeout_secs;
        let (status, body) = tokio::time::timeout(Duration::from_secs(timeout_secs), exchange)
            .await
            .map_err(|_| LlmError::Timeout(timeout_secs))?
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(timeout_secs)
                } else {
                    LlmError::Request(e.to_string())
                }
            })?;

        if !status.is_success() {
            return Err(LlmError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::ResponseParse(format!("malformed response envelope: {}", e)))?;

        let content = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::ResponseParse("No response content".to_string()))?;

        if self.config.debug {
            debug!("Received response: {} chars", content.len());
        }

        Ok(content)
    }
}

#[async_trait]
impl Analyst for LlmClient {
    async fn extract_data(&self, text: &str) -> Result<ParsedContent, LlmError> {
        self.extract_content(text).await
    }

    async fn suggest_visualization(&self, extracted_data: &Value) -> Result<ParsedContent, LlmError> {
        self.suggest_content(extracted_data).await
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn focus(&self) -> ExtractionFocus {
        self.focus
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
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
