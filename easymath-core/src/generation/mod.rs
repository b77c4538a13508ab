//! Generation collaborator interface
//!
//! The collection manager only depends on [`ProblemGenerator`]. The real
//! implementation prompts a chat model ([`LlmGenerator`]); tests script
//! responses with [`MockGenerator`].

mod llm;
mod mock;

use async_trait::async_trait;

pub use llm::{LlmGenerator, parse_statements};
pub use mock::MockGenerator;

use crate::error::GenerationError;

/// Model used when nothing else is configured
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Parameters forwarded to the generator on every call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    /// Sampling temperature for proofs. Statements use the model default.
    pub proof_temperature: f32,
}

impl GenerationParams {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn proof_temperature(mut self, temperature: f32) -> Self {
        self.proof_temperature = temperature;
        self
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            proof_temperature: 0.0,
        }
    }
}

/// Source of problem statements and proofs
#[async_trait]
pub trait ProblemGenerator: Send + Sync {
    /// Produce up to `count` candidate statements for a topic, in order
    async fn generate_statements(
        &self,
        topic: &str,
        count: usize,
        params: &GenerationParams,
    ) -> Result<Vec<String>, GenerationError>;

    /// Produce a proof for one statement
    ///
    /// Implementations may return a human-readable placeholder instead of an
    /// error when the model answers with nothing.
    async fn generate_proof(
        &self,
        topic: &str,
        statement: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError>;
}
