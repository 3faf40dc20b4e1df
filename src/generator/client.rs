//! Generator backed by an OpenAI-compatible chat completions endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::parse::parse_quiz_output;
use super::prompt::{render_prompt, system_prompt};
use super::{GenerateError, GenerationRequest, QuestionGenerator};
use crate::models::GeneratedQuiz;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const TEMPERATURE: f32 = 0.7;
/// Longest slice of an error body kept in [`GenerateError::Api`].
const ERROR_BODY_LIMIT: usize = 500;

/// Connection settings for the AI service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

pub struct ChatCompletionsGenerator {
    client: Client,
    config: GeneratorConfig,
}

impl ChatCompletionsGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerateError> {
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        if config.api_key.is_none() {
            warn!("no API key configured, requests are sent without authorization");
        }

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl QuestionGenerator for ChatCompletionsGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedQuiz, GenerateError> {
        let system = system_prompt();
        let user = render_prompt(request);
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &system,
                },
                ChatMessage {
                    role: "user",
                    content: &user,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: TEMPERATURE,
        };

        let endpoint = self.endpoint();
        debug!(%endpoint, model = %self.config.model, "sending chat completion request");

        let mut builder = self.client.post(&endpoint).json(&body);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            warn!(status = status.as_u16(), "AI service rejected the request");
            return Err(GenerateError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(GenerateError::EmptyOutput)?;

        let quiz = parse_quiz_output(&content)?;
        info!(questions = quiz.questions.len(), "received generated questions");
        Ok(quiz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let generator = ChatCompletionsGenerator::new(GeneratorConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            ..GeneratorConfig::default()
        })
        .unwrap();
        assert_eq!(
            generator.endpoint(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            model: "m",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "s",
                },
                ChatMessage {
                    role: "user",
                    content: "u",
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: TEMPERATURE,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["response_format"]["type"], "json_object");
        assert_eq!(value["messages"][1]["role"], "user");
    }
}
