//! API keys for hosted providers.
//!
//! A key is looked up in the system keyring first and then in the provider's
//! environment variable. Only the keyring is ever written.
//!
//! ```ignore
//! use easymath_models::auth::KeyStore;
//!
//! let keys = KeyStore::new("easymath");
//! keys.store("openai", "sk-...")?;
//! let key = keys.get("openai")?;
//! ```

use std::env;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::{Error, Result};

/// Providers that authenticate with an API key, with their environment variable
const KEYED_PROVIDERS: &[(&str, &str)] = &[("openai", "OPENAI_API_KEY")];

/// Environment variable holding the key for `provider`, if it takes one
pub fn env_var(provider: &str) -> Option<&'static str> {
    KEYED_PROVIDERS
        .iter()
        .find(|(name, _)| *name == provider)
        .map(|(_, var)| *var)
}

/// An API key that never shows up in `Debug` output or logs
#[derive(Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretString::from(key.into()))
    }

    /// Only for building the outgoing request
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Where a key was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Keyring,
    /// Read from this environment variable
    Environment(&'static str),
}

pub struct KeyStore {
    service: String,
    read_env: bool,
}

impl KeyStore {
    /// Key store for a keyring service, with environment fallback enabled
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            read_env: true,
        }
    }

    /// Ignore environment variables
    pub fn keyring_only(mut self) -> Self {
        self.read_env = false;
        self
    }

    /// Find the key for `provider` and report where it came from
    pub fn resolve(&self, provider: &str) -> Option<(ApiKey, KeySource)> {
        if let Some(key) = self.from_keyring(provider) {
            return Some((key, KeySource::Keyring));
        }
        if !self.read_env {
            return None;
        }
        let var = env_var(provider)?;
        let value = env::var(var).ok()?;
        let value = value.trim();
        (!value.is_empty()).then(|| (ApiKey::new(value), KeySource::Environment(var)))
    }

    /// The key for `provider`, or [`Error::MissingKey`]
    pub fn get(&self, provider: &str) -> Result<ApiKey> {
        let (key, source) = self
            .resolve(provider)
            .ok_or_else(|| Error::MissingKey(provider.to_string()))?;
        debug!(provider, ?source, "resolved API key");
        Ok(key)
    }

    pub fn source(&self, provider: &str) -> Option<KeySource> {
        self.resolve(provider).map(|(_, source)| source)
    }

    /// Keyed providers that currently have a key, in name order
    pub fn configured(&self) -> Vec<(&'static str, KeySource)> {
        let mut found: Vec<_> = KEYED_PROVIDERS
            .iter()
            .filter_map(|(name, _)| self.source(name).map(|source| (*name, source)))
            .collect();
        found.sort_by_key(|(name, _)| *name);
        found
    }

    /// Save a key in the keyring
    pub fn store(&self, provider: &str, key: &str) -> Result<()> {
        self.entry(provider)?.set_password(key)?;
        debug!(provider, service = %self.service, "stored API key in keyring");
        Ok(())
    }

    /// Remove a key from the keyring. Environment variables are untouched.
    pub fn forget(&self, provider: &str) -> Result<()> {
        match self.entry(provider)?.delete_credential() {
            Ok(()) => {
                debug!(provider, "deleted API key from keyring");
                Ok(())
            }
            Err(keyring::Error::NoEntry) => Err(Error::MissingKey(provider.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    fn entry(&self, provider: &str) -> Result<keyring::Entry> {
        Ok(keyring::Entry::new(&self.service, provider)?)
    }

    fn from_keyring(&self, provider: &str) -> Option<ApiKey> {
        let password = self.entry(provider).ok()?.get_password().ok()?;
        Some(ApiKey::new(password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_debug_hides_value() {
        let key = ApiKey::new("sk-secret-key-12345");
        let debug = format!("{:?}", key);
        assert_eq!(debug, "ApiKey(***)");
        assert_eq!(key.expose_secret(), "sk-secret-key-12345");
    }

    #[test]
    fn env_var_only_for_keyed_providers() {
        assert_eq!(env_var("openai"), Some("OPENAI_API_KEY"));
        assert_eq!(env_var("ollama"), None);
    }

    #[test]
    fn environment_fallback_and_keyring_only() {
        // SAFETY: the only test touching OPENAI_API_KEY
        unsafe { env::set_var("OPENAI_API_KEY", "  sk-from-env\n") };

        let keys = KeyStore::new("easymath-test-nonexistent");
        let key = keys.get("openai");
        let source = keys.source("openai");
        let configured = keys.configured();
        let strict = KeyStore::new("easymath-test-nonexistent")
            .keyring_only()
            .get("openai");

        // SAFETY: see above
        unsafe { env::remove_var("OPENAI_API_KEY") };

        assert_eq!(key.unwrap().expose_secret(), "sk-from-env");
        assert_eq!(source, Some(KeySource::Environment("OPENAI_API_KEY")));
        assert_eq!(configured, vec![("openai", KeySource::Environment("OPENAI_API_KEY"))]);
        assert!(matches!(strict, Err(Error::MissingKey(p)) if p == "openai"));
    }

    #[test]
    fn unknown_provider_has_no_key() {
        let keys = KeyStore::new("easymath-test-nonexistent");
        assert!(matches!(keys.get("mistral"), Err(Error::MissingKey(_))));
        assert!(keys.source("mistral").is_none());
    }
}
