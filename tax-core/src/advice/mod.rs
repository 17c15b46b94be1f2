//! Optional free-text advice layered on top of a computed report.
//!
//! Advice comes from an external language-model backend behind the
//! [`AdviceProvider`] trait. The call may fail or time out; [`advise`] turns
//! every failure into [`AdviceOutcome::Unavailable`] so the numeric report
//! is always usable on its own.

pub mod factory;
pub mod prompt;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{FinancialProfile, TaxLiabilityReport};

pub use factory::{AdviceProviderFactory, AdvisorConfig, AdvisorRegistry};
pub use prompt::build_request;

/// Longest narrative kept, in characters. Longer text is cut and suffixed
/// with `...`.
pub const MAX_NARRATIVE_CHARS: usize = 500;

#[derive(Debug, Error)]
pub enum AdviceError {
    /// Bad or missing backend settings (unknown backend, empty API key...).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request never produced an HTTP response.
    #[error("Request error: {0}")]
    Request(String),

    /// The backend answered with an error status or an unusable body.
    #[error("Response error: {0}")]
    Response(String),
}

/// Prompts for one advice call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub system_prompt: String,
    pub user_prompt: String,
}

/// A backend that turns a prompt into narrative text.
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &str;

    async fn generate(
        &self,
        request: &AdviceRequest,
    ) -> Result<String, AdviceError>;
}

/// What happened to the advice call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdviceOutcome {
    Generated { narrative: String },
    Unavailable { reason: String },
    NotRequested,
}

impl AdviceOutcome {
    pub fn narrative(&self) -> Option<&str> {
        match self {
            Self::Generated { narrative } => Some(narrative.as_str()),
            _ => None,
        }
    }
}

/// Report plus the advice outcome, serialized side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisedReport {
    #[serde(flatten)]
    pub report: TaxLiabilityReport,
    pub advice: AdviceOutcome,
}

impl AdvisedReport {
    pub fn without_advice(report: TaxLiabilityReport) -> Self {
        Self {
            report,
            advice: AdviceOutcome::NotRequested,
        }
    }
}

/// Asks `provider` for narrative advice on `report`, bounded by `timeout`.
///
/// Never fails: errors, timeouts and empty answers become
/// [`AdviceOutcome::Unavailable`].
pub async fn advise(
    provider: &dyn AdviceProvider,
    profile: &FinancialProfile,
    report: &TaxLiabilityReport,
    timeout: Duration,
) -> AdviceOutcome {
    let request = build_request(profile, report);
    debug!(provider = provider.name(), ?timeout, "requesting advice");

    match tokio::time::timeout(timeout, provider.generate(&request)).await {
        Ok(Ok(text)) if text.trim().is_empty() => {
            warn!(provider = provider.name(), "advice backend returned empty text");
            AdviceOutcome::Unavailable {
                reason: "advice backend returned an empty response".to_string(),
            }
        }
        Ok(Ok(text)) => AdviceOutcome::Generated {
            narrative: truncate_narrative(text.trim()),
        },
        Ok(Err(e)) => {
            warn!(provider = provider.name(), %e, "advice unavailable");
            AdviceOutcome::Unavailable {
                reason: e.to_string(),
            }
        }
        Err(_) => {
            warn!(provider = provider.name(), ?timeout, "advice timed out");
            AdviceOutcome::Unavailable {
                reason: format!("advice timed out after {}s", timeout.as_secs_f64()),
            }
        }
    }
}

/// Computes advice for `report` if a provider is configured.
pub async fn advise_report(
    provider: Option<&dyn AdviceProvider>,
    profile: &FinancialProfile,
    report: TaxLiabilityReport,
    timeout: Duration,
) -> AdvisedReport {
    let advice = match provider {
        Some(provider) => advise(provider, profile, &report, timeout).await,
        None => AdviceOutcome::NotRequested,
    };
    AdvisedReport { report, advice }
}

fn truncate_narrative(text: &str) -> String {
    match text.char_indices().nth(MAX_NARRATIVE_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
