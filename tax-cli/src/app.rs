use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tax_advice_groq::GroqAdvisorFactory;
use tax_core::advice::{
    self, AdviceOutcome, AdviceProvider, AdvisedReport, AdvisorConfig, AdvisorRegistry,
};
use tax_core::{AssessmentYearConfig, FinancialProfile, TaxLiabilityReport};
use tax_data::{SlabTableLoader, TaxRulesFile};
use tracing::{info, warn};

/// Environment variable holding the Groq API key.
pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";

/// Registry with every advice backend compiled into the binary.
pub fn build_registry() -> AdvisorRegistry {
    let mut registry = AdvisorRegistry::new();
    registry.register(Box::new(GroqAdvisorFactory));
    registry
}

/// Built-in 2024-25 tables, then `rules`, then `slabs`. Rules go first so a
/// rules file that moves the assessment year selects which slab rows apply.
pub fn load_config(
    rules: Option<&Path>,
    slabs: Option<&Path>,
) -> Result<AssessmentYearConfig> {
    let mut config = AssessmentYearConfig::ay_2024_25();

    if let Some(path) = rules {
        TaxRulesFile::load(path)
            .and_then(|file| file.apply(&mut config))
            .with_context(|| format!("failed to apply rules from '{}'", path.display()))?;
        info!(path = %path.display(), "rules loaded");
    }

    if let Some(path) = slabs {
        let file = std::fs::File::open(path)
            .with_context(|| format!("cannot open slab table '{}'", path.display()))?;
        let records = SlabTableLoader::parse(file)
            .with_context(|| format!("failed to parse slab table '{}'", path.display()))?;
        let installed = SlabTableLoader::apply(&mut config, &records)
            .with_context(|| format!("failed to apply slab table '{}'", path.display()))?;
        info!(path = %path.display(), installed, "slab table loaded");
    }

    Ok(config)
}

/// Advice backend state for one run.
pub enum Advisor {
    /// No backend was asked for.
    Off,
    Ready(Box<dyn AdviceProvider>),
    /// A backend was asked for but could not be created.
    Unavailable(String),
}

impl Advisor {
    fn provider(&self) -> Option<&dyn AdviceProvider> {
        match self {
            Self::Ready(provider) => Some(provider.as_ref()),
            _ => None,
        }
    }

    /// Runs the advisor for one report. A missing or broken backend yields
    /// an outcome, never an error.
    pub async fn advise(
        &self,
        profile: &FinancialProfile,
        report: &TaxLiabilityReport,
        timeout: Duration,
    ) -> AdviceOutcome {
        match self {
            Self::Off => AdviceOutcome::NotRequested,
            Self::Ready(provider) => {
                advice::advise(provider.as_ref(), profile, report, timeout).await
            }
            Self::Unavailable(reason) => AdviceOutcome::Unavailable {
                reason: reason.clone(),
            },
        }
    }

    /// Same as [`advise`](Self::advise), keeping the report alongside.
    pub async fn advise_report(
        &self,
        profile: &FinancialProfile,
        report: TaxLiabilityReport,
        timeout: Duration,
    ) -> AdvisedReport {
        match self {
            Self::Unavailable(reason) => AdvisedReport {
                report,
                advice: AdviceOutcome::Unavailable {
                    reason: reason.clone(),
                },
            },
            _ => advice::advise_report(self.provider(), profile, report, timeout).await,
        }
    }
}

/// Builds the advisor for `backend`. Creation failures are logged and kept
/// as [`Advisor::Unavailable`] so the numeric report still goes out.
pub async fn connect_advisor(
    registry: &AdvisorRegistry,
    backend: Option<&str>,
    api_key: Option<String>,
    model: Option<String>,
) -> Advisor {
    let Some(backend) = backend else {
        return Advisor::Off;
    };
    let config = AdvisorConfig {
        backend: backend.to_string(),
        api_key: api_key.unwrap_or_default(),
        model,
    };

    match registry.create(&config).await {
        Ok(provider) => {
            info!(backend, "advice backend ready");
            Advisor::Ready(provider)
        }
        Err(e) => {
            warn!(backend, %e, "advice backend unavailable");
            Advisor::Unavailable(e.to_string())
        }
    }
}
