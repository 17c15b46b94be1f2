use serde::Serialize;
use tax_core::{TaxLiabilityEngine, TaxLiabilityReport};
use tracing::{info, warn};

use crate::profile_csv::{ProfileCsvError, ProfileRow};

/// Per-row result of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Computed { report: Box<TaxLiabilityReport> },
    Rejected { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    pub row: usize,
    pub label: Option<String>,
    #[serde(flatten)]
    pub outcome: BatchOutcome,
}

impl BatchEntry {
    pub fn report(&self) -> Option<&TaxLiabilityReport> {
        match &self.outcome {
            BatchOutcome::Computed { report } => Some(report),
            BatchOutcome::Rejected { .. } => None,
        }
    }
}

/// Runs every parsed row through `engine`. Rows are independent: a row that
/// failed to parse or to compute is recorded as rejected and the rest carry
/// on.
pub fn run_batch(
    engine: &TaxLiabilityEngine<'_>,
    rows: Vec<Result<ProfileRow, ProfileCsvError>>,
) -> Vec<BatchEntry> {
    let entries: Vec<BatchEntry> = rows
        .into_iter()
        .enumerate()
        .map(|(idx, parsed)| match parsed {
            Ok(ProfileRow {
                row,
                label,
                profile,
            }) => {
                let outcome = match engine.calculate(&profile) {
                    Ok(report) => BatchOutcome::Computed {
                        report: Box::new(report),
                    },
                    Err(e) => {
                        warn!(row, %e, "batch row rejected");
                        BatchOutcome::Rejected {
                            error: e.to_string(),
                        }
                    }
                };
                BatchEntry {
                    row,
                    label,
                    outcome,
                }
            }
            Err(e) => {
                warn!(row = idx + 1, %e, "batch row rejected");
                BatchEntry {
                    row: idx + 1,
                    label: None,
                    outcome: BatchOutcome::Rejected {
                        error: e.to_string(),
                    },
                }
            }
        })
        .collect();

    let computed = entries.iter().filter(|e| e.report().is_some()).count();
    info!(
        rows = entries.len(),
        computed,
        rejected = entries.len() - computed,
        "batch finished"
    );
    entries
}
