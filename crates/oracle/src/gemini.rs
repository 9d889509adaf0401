//! Gemini provider
//!
//! Thin HTTP client for the generative-language API. One non-streaming
//! call per oracle operation, plus a server-sent-events stream for chat.

use async_trait::async_trait;
use reqwest::Client;

use crate::prompts::{
    self, EXPLAINER_INSTRUCTION, NO_OUTPUT, RUNNER_INSTRUCTION, TUTOR_INSTRUCTION,
};
use crate::{ChatTurn, FragmentStream, Oracle, OracleError, TurnRole};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini-backed oracle
pub struct GeminiOracle {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiOracle {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn from_env() -> Result<Self, OracleError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| OracleError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }

    fn request_body(system: &str, turns: &[ChatTurn]) -> serde_json::Value {
        let contents: Vec<_> = turns
            .iter()
            .map(|turn| {
                serde_json::json!({
                    "role": match turn.role {
                        TurnRole::User => "user",
                        TurnRole::Model => "model",
                    },
                    "parts": [{ "text": turn.text }],
                })
            })
            .collect();

        serde_json::json!({
            "system_instruction": { "parts": [{ "text": system }] },
            "contents": contents,
        })
    }

    /// One-shot generation with a system instruction and a single user turn
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, OracleError> {
        let body = Self::request_body(system, &[ChatTurn::user(prompt)]);

        let response = self
            .client
            .post(format!("{API_BASE}/{}:generateContent", self.model))
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let json: serde_json::Value = response.json().await?;
        extract_text(&json).ok_or(OracleError::MalformedResponse)
    }
}

/// Pull the first candidate's text out of a response payload
fn extract_text(json: &serde_json::Value) -> Option<String> {
    json["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(String::from)
}

#[async_trait]
impl Oracle for GeminiOracle {
    async fn simulate_run(&self, code: &str) -> Result<String, OracleError> {
        tracing::debug!(bytes = code.len(), "posting code to run simulation");
        let output = self.generate(RUNNER_INSTRUCTION, code).await?;
        if output.is_empty() {
            Ok(NO_OUTPUT.to_string())
        } else {
            Ok(output)
        }
    }

    async fn diagnose(&self, code: &str, failure: &str) -> Result<String, OracleError> {
        self.generate(TUTOR_INSTRUCTION, &prompts::diagnose_prompt(code, failure))
            .await
    }

    async fn explain(&self, code: &str) -> Result<String, OracleError> {
        self.generate(EXPLAINER_INSTRUCTION, &prompts::explain_prompt(code))
            .await
    }

    async fn chat_stream(&self, turns: &[ChatTurn]) -> Result<FragmentStream, OracleError> {
        use async_stream::stream;
        use futures::StreamExt;

        let body = Self::request_body(TUTOR_INSTRUCTION, turns);

        let response = self
            .client
            .post(format!(
                "{API_BASE}/{}:streamGenerateContent?alt=sse",
                self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let stream = stream! {
            let mut bytes = response.bytes_stream();

            while let Some(chunk) = bytes.next().await {
                match chunk {
                    Ok(bytes) => {
                        let text = String::from_utf8_lossy(&bytes);
                        for line in text.lines() {
                            let Some(data) = line.strip_prefix("data: ") else {
                                continue;
                            };
                            if let Ok(json) = serde_json::from_str::<serde_json::Value>(data) {
                                if let Some(fragment) = extract_text(&json) {
                                    yield Ok(fragment);
                                }
                            }
                        }
                    }
                    Err(e) => yield Err(OracleError::Transport(e)),
                }
            }
        };

        Ok(Box::pin(stream))
    }
}
