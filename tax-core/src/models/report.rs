use serde::{Deserialize, Serialize};

use super::{ComparisonResult, RecommendationSet, Regime, RegimeResult};

/// Complete numeric answer for one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLiabilityReport {
    pub assessment_year: String,
    pub old_regime: RegimeResult,
    pub new_regime: RegimeResult,
    pub comparison: ComparisonResult,
    pub recommendations: RecommendationSet,
}

impl TaxLiabilityReport {
    pub fn regime(
        &self,
        regime: Regime,
    ) -> &RegimeResult {
        match regime {
            Regime::Old => &self.old_regime,
            Regime::New => &self.new_regime,
        }
    }

    pub fn optimal(&self) -> &RegimeResult {
        self.regime(self.comparison.optimal_regime)
    }
}
