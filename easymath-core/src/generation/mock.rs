//! Deterministic generator for tests
//!
//! Statements are scripted per topic and proofs are derived from the
//! statement text, so collection logic can be exercised without a model.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{GenerationParams, ProblemGenerator};
use crate::error::GenerationError;

/// Scripted implementation of [`ProblemGenerator`]
///
/// Topics without a script yield no statements.
#[derive(Debug, Default)]
pub struct MockGenerator {
    statements: HashMap<String, Vec<String>>,
    failing_topics: HashSet<String>,
    failing_proofs: HashSet<String>,
    proof_calls: Mutex<Vec<String>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the statements returned for a topic
    pub fn with_statements<I, S>(mut self, topic: impl Into<String>, statements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.statements
            .insert(topic.into(), statements.into_iter().map(Into::into).collect());
        self
    }

    /// Make statement generation fail for a topic
    pub fn failing_topic(mut self, topic: impl Into<String>) -> Self {
        self.failing_topics.insert(topic.into());
        self
    }

    /// Make proof generation fail for a statement
    pub fn failing_proof(mut self, statement: impl Into<String>) -> Self {
        self.failing_proofs.insert(statement.into());
        self
    }

    /// Statements a proof was requested for, in call order
    pub fn proof_calls(&self) -> Vec<String> {
        self.proof_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ProblemGenerator for MockGenerator {
    async fn generate_statements(
        &self,
        topic: &str,
        count: usize,
        _params: &GenerationParams,
    ) -> Result<Vec<String>, GenerationError> {
        if self.failing_topics.contains(topic) {
            return Err(GenerationError::Failed(format!(
                "scripted failure for {}",
                topic
            )));
        }
        Ok(self
            .statements
            .get(topic)
            .map(|statements| statements.iter().take(count).cloned().collect())
            .unwrap_or_default())
    }

    async fn generate_proof(
        &self,
        _topic: &str,
        statement: &str,
        _params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        if let Ok(mut calls) = self.proof_calls.lock() {
            calls.push(statement.to_string());
        }
        if self.failing_proofs.contains(statement) {
            return Err(GenerationError::Failed(format!(
                "scripted proof failure for {}",
                statement
            )));
        }
        Ok(format!("Proof of: {}", statement))
    }
}
