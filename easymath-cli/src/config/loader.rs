use super::types::{
    DatasetConfig, EasyMathConfig, GenerationConfig, ProvidersConfig, RawDatasetConfig,
    RawEasyMathConfig, RawGenerationConfig, RawProvidersConfig,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<EasyMathConfig> {
        let layers = [Self::user_config_path(), Self::project_config_path()];
        Self::load_layers(&layers)
    }

    /// Merge the given files in order; later files override earlier ones.
    /// Missing files are skipped.
    pub fn load_layers<'a>(paths: impl IntoIterator<Item = &'a PathBuf>) -> Result<EasyMathConfig> {
        let mut raw = RawEasyMathConfig::default();
        for path in paths {
            if let Some(layer) = Self::read_layer(path)? {
                raw = Self::merge_raw(raw, layer);
            }
        }

        // Environment beats any file for the Ollama host
        if let Ok(host) = std::env::var("OLLAMA_HOST")
            && !host.is_empty()
        {
            raw.providers.ollama_host = Some(host);
        }

        Ok(Self::finalize(raw))
    }

    /// Get user config path
    pub fn user_config_path() -> PathBuf {
        easymath_paths::config_dir().join("config.toml")
    }

    /// Get project config path
    /// Can be overridden with EASYMATH_PROJECT_CONFIG_DIR env var (useful for isolated e2e tests)
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("EASYMATH_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".easymath/config.toml")
        }
    }

    fn read_layer(path: &Path) -> Result<Option<RawEasyMathConfig>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let layer = toml::from_str(&contents)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(Some(layer))
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawEasyMathConfig, overlay: RawEasyMathConfig) -> RawEasyMathConfig {
        RawEasyMathConfig {
            dataset: RawDatasetConfig {
                path: overlay.dataset.path.or(base.dataset.path),
                on_corrupt: overlay.dataset.on_corrupt.or(base.dataset.on_corrupt),
            },
            generation: RawGenerationConfig {
                provider: overlay.generation.provider.or(base.generation.provider),
                model: overlay.generation.model.or(base.generation.model),
                problems_per_topic: overlay
                    .generation
                    .problems_per_topic
                    .or(base.generation.problems_per_topic),
                proof_temperature: overlay
                    .generation
                    .proof_temperature
                    .or(base.generation.proof_temperature),
                topics: overlay.generation.topics.or(base.generation.topics),
            },
            providers: RawProvidersConfig {
                openai_base_url: overlay
                    .providers
                    .openai_base_url
                    .or(base.providers.openai_base_url),
                ollama_host: overlay.providers.ollama_host.or(base.providers.ollama_host),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawEasyMathConfig) -> EasyMathConfig {
        let dataset = DatasetConfig::default();
        let generation = GenerationConfig::default();
        let providers = ProvidersConfig::default();

        EasyMathConfig {
            dataset: DatasetConfig {
                path: raw.dataset.path.unwrap_or(dataset.path),
                on_corrupt: raw.dataset.on_corrupt.unwrap_or(dataset.on_corrupt),
            },
            generation: GenerationConfig {
                provider: raw.generation.provider.unwrap_or(generation.provider),
                model: raw.generation.model.unwrap_or(generation.model),
                problems_per_topic: raw
                    .generation
                    .problems_per_topic
                    .unwrap_or(generation.problems_per_topic),
                proof_temperature: raw
                    .generation
                    .proof_temperature
                    .unwrap_or(generation.proof_temperature),
                topics: raw.generation.topics.unwrap_or(generation.topics),
            },
            providers: ProvidersConfig {
                openai_base_url: raw
                    .providers
                    .openai_base_url
                    .unwrap_or(providers.openai_base_url),
                ollama_host: raw.providers.ollama_host.unwrap_or(providers.ollama_host),
            },
        }
    }
}
