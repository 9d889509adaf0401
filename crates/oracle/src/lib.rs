//! # Beaker Oracle
//!
//! Client layer for the external generative-language service that
//! simulates code execution, diagnoses failures, and produces the
//! tutor's explanations.
//!
//! The service is an opaque, fallible remote function: every judgment
//! about code comes from it, never from this crate. Transport failures
//! degrade to fixed fallback strings at the call sites; nothing here is
//! fatal to the process.

pub mod gemini;
pub mod prompts;
pub mod session;

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};

pub use gemini::GeminiOracle;
pub use prompts::{
    EXPLAINER_INSTRUCTION, EXPLAIN_FALLBACK, NO_OUTPUT, RUNNER_INSTRUCTION, RUN_FALLBACK,
    STREAM_FALLBACK, TUTOR_INSTRUCTION,
};
pub use session::ChatSession;

/// Stream of incremental reply fragments
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, OracleError>> + Send>>;

/// Oracle failure taxonomy
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed oracle response")]
    MalformedResponse,
    #[error("api key not configured")]
    MissingApiKey,
}

/// Role of one conversation turn on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Model,
}

/// One conversation turn sent to the chat endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Model,
            text: text.into(),
        }
    }
}

/// The external generative service, seen as a remote function
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Simulate running `code`; returns raw console-equivalent text
    async fn simulate_run(&self, code: &str) -> Result<String, OracleError>;

    /// Short remediation text for a failed simulated run
    async fn diagnose(&self, code: &str, failure: &str) -> Result<String, OracleError>;

    /// Explain what `code` does, in the tutor's voice
    async fn explain(&self, code: &str) -> Result<String, OracleError>;

    /// Stream a tutor chat reply for `turns` (history plus new message)
    async fn chat_stream(&self, turns: &[ChatTurn]) -> Result<FragmentStream, OracleError>;
}
