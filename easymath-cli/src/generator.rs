//! Generator built from configuration on first use
//!
//! Commands that may never call the model (a manual add with a given
//! proof) should not require credentials, so the provider is resolved
//! lazily. Commands that always need it call [`ConfiguredGenerator::ensure_ready`]
//! up front to fail fast.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use easymath_core::{GenerationError, GenerationParams, LlmGenerator, ProblemGenerator};
use easymath_models::auth::KeyStore;
use easymath_models::providers::{ModelProvider, OllamaProvider, OpenAiProvider};
use tracing::debug;

use crate::config::{EasyMathConfig, ProviderKind};

/// Keyring service name for stored API keys
pub const CREDENTIAL_SERVICE: &str = "easymath";

pub struct ConfiguredGenerator {
    provider: ProviderKind,
    openai_base_url: String,
    ollama_host: String,
    inner: OnceLock<LlmGenerator>,
}

impl ConfiguredGenerator {
    pub fn new(config: &EasyMathConfig) -> Self {
        Self {
            provider: config.generation.provider,
            openai_base_url: config.providers.openai_base_url.clone(),
            ollama_host: config.providers.ollama_host.clone(),
            inner: OnceLock::new(),
        }
    }

    /// Resolve the provider now, surfacing missing credentials
    pub fn ensure_ready(&self) -> easymath_models::Result<&LlmGenerator> {
        if let Some(generator) = self.inner.get() {
            return Ok(generator);
        }
        let generator = LlmGenerator::new(self.build_provider()?);
        debug!(provider = generator.provider_name(), "model provider ready");
        Ok(self.inner.get_or_init(|| generator))
    }

    fn build_provider(&self) -> easymath_models::Result<Arc<dyn ModelProvider>> {
        match self.provider {
            ProviderKind::OpenAi => {
                let key = KeyStore::new(CREDENTIAL_SERVICE).get("openai")?;
                Ok(Arc::new(OpenAiProvider::with_base_url(
                    &self.openai_base_url,
                    key,
                )))
            }
            ProviderKind::Ollama => Ok(Arc::new(OllamaProvider::with_base_url(&self.ollama_host))),
        }
    }
}

#[async_trait]
impl ProblemGenerator for ConfiguredGenerator {
    async fn generate_statements(
        &self,
        topic: &str,
        count: usize,
        params: &GenerationParams,
    ) -> Result<Vec<String>, GenerationError> {
        self.ensure_ready()?
            .generate_statements(topic, count, params)
            .await
    }

    async fn generate_proof(
        &self,
        topic: &str,
        statement: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        self.ensure_ready()?
            .generate_proof(topic, statement, params)
            .await
    }
}
