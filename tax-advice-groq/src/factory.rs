use async_trait::async_trait;
use tax_core::advice::{AdviceError, AdviceProvider, AdviceProviderFactory, AdvisorConfig};

use crate::client::{DEFAULT_MODEL, GroqAdvisor};

/// [`AdviceProviderFactory`] for Groq.
///
/// Register this with an [`AdvisorRegistry`](tax_core::advice::AdvisorRegistry)
/// to make the `"groq"` backend available:
///
/// ```rust,no_run
/// use tax_advice_groq::GroqAdvisorFactory;
/// use tax_core::advice::AdvisorRegistry;
///
/// let mut registry = AdvisorRegistry::new();
/// registry.register(Box::new(GroqAdvisorFactory));
/// ```
pub struct GroqAdvisorFactory;

#[async_trait]
impl AdviceProviderFactory for GroqAdvisorFactory {
    fn backend_name(&self) -> &'static str {
        "groq"
    }

    /// Uses `config.model` when set, otherwise [`DEFAULT_MODEL`].
    async fn create(
        &self,
        config: &AdvisorConfig,
    ) -> Result<Box<dyn AdviceProvider>, AdviceError> {
        let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);
        let advisor = GroqAdvisor::new(config.api_key.clone(), model)?;
        Ok(Box::new(advisor))
    }
}
