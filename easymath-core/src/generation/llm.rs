//! Chat-model backed generator using few-shot prompts.

use std::sync::Arc;

use async_trait::async_trait;
use easymath_models::providers::{ChatRequest, Message, ModelProvider};
use tracing::{debug, warn};

use super::{GenerationParams, ProblemGenerator};
use crate::error::GenerationError;

const STATEMENT_SYSTEM_PROMPT: &str = "You are an expert mathematician. Your task is to create \
trivial, easy and obvious mathematical statements based on given topics. From the given topic, \
give a variety of statements covering different aspects of the topic. Do not write the proof, \
just the problem statement. Enclose each problem statement in <p> and </p> tags.";

const STATEMENT_EXAMPLE_REQUEST: &str = "Create 5 problems on Number Theory.";

const STATEMENT_EXAMPLE_RESPONSE: &str = "<p>The product of two consecutive natural numbers is \
even.</p><p>The sum of two odd numbers is even.</p><p>A prime number has exactly two distinct \
positive divisors: 1 and itself.</p><p>Every natural number is either odd or even.</p><p>A \
number is divisible by 10 if and only if its last digit is 0.</p>";

const PROOF_SYSTEM_PROMPT: &str = "You are an expert mathematician. You are asked to provide \
mathematically correct proof of a mathematical statement given to you from given topic. Write \
the proof in Latex and use `$` to enclose LaTeX formulas.";

const PROOF_EXAMPLE_REQUEST: &str =
    "Number Theory: Product of consecutive natural numbers is even.";

const PROOF_EXAMPLE_RESPONSE: &str = "Let the two consecutive natural numbers be $n$ and $n+1$. \
Since natural numbers alternate between odd and even, either $n$ or $n+1$ must be even. If $n$ \
is even, then $n = 2k$ for some integer $k$, and their product is $n(n+1) = 2k(n+1)$, which is \
even. If $n$ is odd, then $n+1 = 2k$ for some integer $k$, and their product is \
$n(n+1) = n \\cdot 2k = 2(n \\cdot k)$, which is also even. Thus, in all cases, the product of \
two consecutive natural numbers is even.";

/// Split a `<p>`-tagged model answer into trimmed, non-empty statements
pub fn parse_statements(text: &str) -> Vec<String> {
    text.split("<p>")
        .map(|chunk| chunk.replace("</p>", "").trim().to_string())
        .filter(|statement| !statement.is_empty())
        .collect()
}

/// Generator that prompts a chat model
pub struct LlmGenerator {
    provider: Arc<dyn ModelProvider>,
}

impl LlmGenerator {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    fn statements_request(topic: &str, count: usize, params: &GenerationParams) -> ChatRequest {
        ChatRequest::new(
            params.model.clone(),
            vec![
                Message::system(STATEMENT_SYSTEM_PROMPT),
                Message::user(STATEMENT_EXAMPLE_REQUEST),
                Message::assistant(STATEMENT_EXAMPLE_RESPONSE),
                Message::user(format!("Create {} problems on {}", count, topic)),
            ],
        )
    }

    fn proof_request(topic: &str, statement: &str, params: &GenerationParams) -> ChatRequest {
        ChatRequest::new(
            params.model.clone(),
            vec![
                Message::system(PROOF_SYSTEM_PROMPT),
                Message::user(PROOF_EXAMPLE_REQUEST),
                Message::assistant(PROOF_EXAMPLE_RESPONSE),
                Message::user(format!("{}: {}", topic, statement)),
            ],
        )
        .temperature(params.proof_temperature)
    }
}

#[async_trait]
impl ProblemGenerator for LlmGenerator {
    async fn generate_statements(
        &self,
        topic: &str,
        count: usize,
        params: &GenerationParams,
    ) -> Result<Vec<String>, GenerationError> {
        let request = Self::statements_request(topic, count, params);
        let response = self.provider.chat(request).await?;

        let Some(text) = response.text() else {
            return Err(GenerationError::EmptyResponse(params.model.clone()));
        };

        let statements = parse_statements(text);
        if statements.len() > count {
            warn!(
                topic,
                requested = count,
                received = statements.len(),
                "model returned extra statements"
            );
        }
        debug!(
            topic,
            received = statements.len(),
            tokens = response.usage.total(),
            "generated statements"
        );
        Ok(statements)
    }

    async fn generate_proof(
        &self,
        topic: &str,
        statement: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        let request = Self::proof_request(topic, statement, params);
        let response = self.provider.chat(request).await?;

        if response.truncated {
            warn!(topic, model = %params.model, "proof was cut off at the token limit");
        }

        match response.text() {
            Some(text) => Ok(text.to_string()),
            None => {
                warn!(topic, model = %params.model, "model returned an empty proof");
                Ok(GenerationError::EmptyResponse(params.model.clone()).to_string())
            }
        }
    }
}
