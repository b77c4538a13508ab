//! Text-generation providers for easymath.
//!
//! - [`providers::ModelProvider`]: one chat completion per call
//! - [`providers::OpenAiProvider`] for OpenAI-compatible APIs and
//!   [`providers::OllamaProvider`] for local models
//! - [`auth::KeyStore`]: API keys from the system keyring or environment
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │            ModelProvider             │
//! │  ┌──────────────┐  ┌──────────────┐  │
//! │  │    OpenAI    │  │    Ollama    │  │
//! │  └──────┬───────┘  └──────────────┘  │
//! └─────────┼────────────────────────────┘
//!           │ ApiKey
//!           ▼
//! ┌──────────────────────────────────────┐
//! │               KeyStore               │
//! │        (keyring, then env var)       │
//! └──────────────────────────────────────┘
//! ```

mod error;

pub mod auth;
pub mod providers;

pub use error::{Error, Result};
