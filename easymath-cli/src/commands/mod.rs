pub mod add;
pub mod auth;
pub mod config;
pub mod export;
pub mod generate;
pub mod remove;
pub mod show;
pub mod summary;

use anyhow::{Context, Result};
use easymath_core::{GenerationParams, RecordStore};

use crate::config::EasyMathConfig;

/// Open the configured dataset, honoring the corrupt-file policy
pub(crate) fn open_store(config: &EasyMathConfig) -> Result<RecordStore> {
    let path = &config.dataset.path;
    RecordStore::open(path, config.dataset.on_corrupt)
        .with_context(|| format!("Failed to open dataset at {}", path.display()))
}

/// Generation parameters from config, with an optional model override
pub(crate) fn generation_params(
    config: &EasyMathConfig,
    model: Option<String>,
) -> GenerationParams {
    GenerationParams::new(model.unwrap_or_else(|| config.generation.model.clone()))
        .proof_temperature(config.generation.proof_temperature)
}
