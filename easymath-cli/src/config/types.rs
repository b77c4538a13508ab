use easymath_core::CorruptPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawEasyMathConfig {
    #[serde(default)]
    pub dataset: RawDatasetConfig,

    #[serde(default)]
    pub generation: RawGenerationConfig,

    #[serde(default)]
    pub providers: RawProvidersConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawDatasetConfig {
    pub path: Option<PathBuf>,
    pub on_corrupt: Option<CorruptPolicy>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawGenerationConfig {
    pub provider: Option<ProviderKind>,
    pub model: Option<String>,
    pub problems_per_topic: Option<usize>,
    pub proof_temperature: Option<f32>,
    pub topics: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawProvidersConfig {
    pub openai_base_url: Option<String>,
    pub ollama_host: Option<String>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EasyMathConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Backing JSON file
    pub path: PathBuf,

    /// Behavior when the backing file does not parse
    pub on_corrupt: CorruptPolicy,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: easymath_paths::default_dataset_path(),
            on_corrupt: CorruptPolicy::default(),
        }
    }
}

/// Which model backend generates statements and proofs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    OpenAi,
    Ollama,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub provider: ProviderKind,
    pub model: String,
    pub problems_per_topic: usize,
    pub proof_temperature: f32,
    /// Topics visited by `easymath generate` when none are given
    pub topics: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: easymath_core::DEFAULT_MODEL.to_string(),
            problems_per_topic: DEFAULT_PROBLEMS_PER_TOPIC,
            proof_temperature: 0.0,
            topics: default_topics(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    pub openai_base_url: String,
    pub ollama_host: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openai_base_url: easymath_models::providers::OPENAI_DEFAULT_BASE_URL.to_string(),
            ollama_host: easymath_models::providers::OLLAMA_DEFAULT_HOST.to_string(),
        }
    }
}

/// Problems requested per topic in one generation batch
pub const DEFAULT_PROBLEMS_PER_TOPIC: usize = 15;

pub const DEFAULT_TOPICS: &[&str] = &[
    "Linear Algebra",
    "Algebra",
    "Geometry",
    "Calculus",
    "Number Theory",
    "Statistics",
    "Trigonometry",
    "Probability",
    "Combinatorics",
    "Logic",
    "Set Theory",
    "Graph Theory",
    "Topology",
    "Real Analysis",
    "Differential Equations",
    "Abstract Algebra",
    "Group Theory",
    "Complex Analysis",
    "Vector Calculus",
];

pub fn default_topics() -> Vec<String> {
    DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect()
}
