//! Entry point that runs both regimes, compares them and attaches
//! recommendations.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{AssessmentYearConfig, FinancialProfile, Regime, TaxLiabilityEngine};
//!
//! let config = AssessmentYearConfig::ay_2024_25();
//! let engine = TaxLiabilityEngine::new(&config);
//!
//! let profile = FinancialProfile {
//!     gross_annual_income: dec!(800000),
//!     section_80c_contribution: dec!(50000),
//!     health_insurance_premium: dec!(15000),
//!     home_loan_interest: dec!(80000),
//!     hra_claimed: dec!(0),
//! };
//! let report = engine.calculate(&profile).unwrap();
//!
//! assert_eq!(report.old_regime.total_tax, dec!(24440));
//! assert_eq!(report.new_regime.total_tax, dec!(31200));
//! assert_eq!(report.comparison.optimal_regime, Regime::Old);
//! assert_eq!(report.comparison.tax_savings, dec!(6760));
//! ```

use thiserror::Error;
use tracing::info;

use crate::calculations::{
    RegimeCalculator, RuleContext, build_strategy, compare_regimes, generate_recommendations,
};
use crate::models::{
    AssessmentYearConfig, FinancialProfile, ProfileError, Regime, RegimeConfigError,
    StrategyProfile, TaxLiabilityReport, TaxStrategy,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxLiabilityError {
    /// The caller's profile was rejected before any computation.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ProfileError),

    /// The rule tables are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] RegimeConfigError),
}

/// Stateless calculator over a borrowed, immutable rule set.
#[derive(Debug, Clone, Copy)]
pub struct TaxLiabilityEngine<'a> {
    config: &'a AssessmentYearConfig,
}

impl<'a> TaxLiabilityEngine<'a> {
    pub fn new(config: &'a AssessmentYearConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssessmentYearConfig {
        self.config
    }

    /// Computes both regimes, the comparison and the recommendations.
    ///
    /// # Errors
    ///
    /// * [`TaxLiabilityError::InvalidInput`] when a profile amount is negative
    ///   or above [`MAX_AMOUNT`](crate::models::MAX_AMOUNT).
    /// * [`TaxLiabilityError::InvalidConfig`] when the rule tables fail
    ///   validation.
    pub fn calculate(
        &self,
        profile: &FinancialProfile,
    ) -> Result<TaxLiabilityReport, TaxLiabilityError> {
        profile.validate()?;
        self.config.validate()?;

        let cess_rate = self.config.cess_rate_percent;
        let old_regime =
            RegimeCalculator::new(&self.config.old_regime, cess_rate).calculate(profile)?;
        let new_regime =
            RegimeCalculator::new(&self.config.new_regime, cess_rate).calculate(profile)?;

        let comparison =
            compare_regimes(&old_regime, &new_regime, profile.section_80c_contribution);
        let context = RuleContext::new(
            profile,
            self.config.regime(Regime::Old),
            comparison.optimal_regime,
            &self.config.assessment_year,
        )?;
        let recommendations = generate_recommendations(&context);

        info!(
            assessment_year = %self.config.assessment_year,
            gross_income = %profile.gross_annual_income,
            optimal = %comparison.optimal_regime,
            savings = %comparison.tax_savings,
            "tax liability computed"
        );

        Ok(TaxLiabilityReport {
            assessment_year: self.config.assessment_year.clone(),
            old_regime,
            new_regime,
            comparison,
            recommendations,
        })
    }

    /// Computes the report and wraps it in a year-long strategy.
    ///
    /// # Errors
    ///
    /// Same as [`calculate`](Self::calculate).
    pub fn strategy(
        &self,
        profile: &FinancialProfile,
        personal: &StrategyProfile,
    ) -> Result<TaxStrategy, TaxLiabilityError> {
        let report = self.calculate(profile)?;
        Ok(build_strategy(personal, report))
    }
}

/// Convenience wrapper around [`TaxLiabilityEngine::calculate`].
///
/// # Errors
///
/// See [`TaxLiabilityEngine::calculate`].
pub fn compute_tax_liability(
    config: &AssessmentYearConfig,
    profile: &FinancialProfile,
) -> Result<TaxLiabilityReport, TaxLiabilityError> {
    TaxLiabilityEngine::new(config).calculate(profile)
}
