use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;

use super::{AdviceError, AdviceProvider};

/// Backend-agnostic advisor settings.
///
/// `backend` must match the [`AdviceProviderFactory::backend_name`] of a
/// registered factory. `api_key` and `model` are forwarded unchanged.
///
/// | backend | model default              |
/// |---------|----------------------------|
/// | `groq`  | `llama-3.3-70b-versatile`  |
#[derive(Clone, PartialEq, Eq)]
pub struct AdvisorConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"groq"`).
    pub backend: String,
    pub api_key: String,
    /// Backend default when `None`.
    pub model: Option<String>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            backend: "groq".to_string(),
            api_key: String::new(),
            model: None,
        }
    }
}

// Keeps the key out of logs.
impl fmt::Debug for AdvisorConfig {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("AdvisorConfig")
            .field("backend", &self.backend)
            .field("api_key", &if self.api_key.is_empty() { "<empty>" } else { "<redacted>" })
            .field("model", &self.model)
            .finish()
    }
}

/// One implementation per advice backend. Each backend crate exports a unit
/// struct that implements this trait and is registered with an
/// [`AdvisorRegistry`] at startup.
#[async_trait]
pub trait AdviceProviderFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Build a ready-to-use provider, rejecting unusable settings.
    async fn create(
        &self,
        config: &AdvisorConfig,
    ) -> Result<Box<dyn AdviceProvider>, AdviceError>;
}

/// Registry of [`AdviceProviderFactory`] instances, keyed by backend name.
pub struct AdvisorRegistry {
    factories: HashMap<&'static str, Box<dyn AdviceProviderFactory>>,
}

impl AdvisorRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory, replacing any with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn AdviceProviderFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend`.
    ///
    /// # Errors
    /// * [`AdviceError::Configuration`] when no factory is registered for
    ///   the requested backend.
    /// * Any error the chosen factory returns.
    pub async fn create(
        &self,
        config: &AdvisorConfig,
    ) -> Result<Box<dyn AdviceProvider>, AdviceError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                AdviceError::Configuration(format!(
                    "unknown advice backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for AdvisorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
