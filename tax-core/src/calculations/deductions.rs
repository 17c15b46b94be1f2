//! Regime-specific deduction stacking.
//!
//! | Section  | Old regime                               | New regime |
//! |----------|------------------------------------------|------------|
//! | Standard | flat amount                              | flat amount |
//! | 80C      | `min(contribution, cap)`                 | n/a |
//! | 80D      | `min(premium, cap)`                      | n/a |
//! | 24B      | `min(home loan interest, cap)`           | n/a |
//! | HRA      | `min(claimed, gross × hra_income_share)` | n/a |
//!
//! Taxable income is `max(0, gross − total deductions)`.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::calculations::common::non_negative;
use crate::models::{DeductionSection, FinancialProfile, Regime, RegimeConfig, RegimeConfigError};

/// Applied deductions and the income left to tax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeductionSummary {
    pub by_section: BTreeMap<DeductionSection, Decimal>,
    pub total: Decimal,
    pub taxable_income: Decimal,
}

#[derive(Debug, Clone)]
pub struct DeductionCalculator<'a> {
    config: &'a RegimeConfig,
}

impl<'a> DeductionCalculator<'a> {
    pub fn new(config: &'a RegimeConfig) -> Self {
        Self { config }
    }

    /// # Errors
    ///
    /// Returns [`RegimeConfigError`] when an old-regime table lacks a cap or
    /// the HRA income share.
    pub fn calculate(
        &self,
        profile: &FinancialProfile,
    ) -> Result<DeductionSummary, RegimeConfigError> {
        let by_section = match self.config.regime {
            Regime::Old => self.old_regime_sections(profile)?,
            Regime::New => self.new_regime_sections(),
        };

        let total: Decimal = by_section.values().copied().sum();
        let taxable_income = non_negative(profile.gross_annual_income - total);

        Ok(DeductionSummary {
            by_section,
            total,
            taxable_income,
        })
    }

    fn old_regime_sections(
        &self,
        profile: &FinancialProfile,
    ) -> Result<BTreeMap<DeductionSection, Decimal>, RegimeConfigError> {
        Ok(BTreeMap::from([
            (DeductionSection::Standard, self.config.standard_deduction),
            (
                DeductionSection::Section80C,
                self.capped(DeductionSection::Section80C, profile.section_80c_contribution)?,
            ),
            (
                DeductionSection::Section80D,
                self.capped(DeductionSection::Section80D, profile.health_insurance_premium)?,
            ),
            (
                DeductionSection::Section24B,
                self.capped(DeductionSection::Section24B, profile.home_loan_interest)?,
            ),
            (DeductionSection::Hra, self.hra(profile)?),
        ]))
    }

    fn new_regime_sections(&self) -> BTreeMap<DeductionSection, Decimal> {
        BTreeMap::from([(DeductionSection::Standard, self.config.standard_deduction)])
    }

    fn capped(
        &self,
        section: DeductionSection,
        claimed: Decimal,
    ) -> Result<Decimal, RegimeConfigError> {
        let cap = self.config.required_cap(section)?;
        Ok(non_negative(claimed).min(cap))
    }

    /// Simplified HRA exemption: a fixed share of gross income bounds the claim.
    fn hra(
        &self,
        profile: &FinancialProfile,
    ) -> Result<Decimal, RegimeConfigError> {
        let share = self
            .config
            .hra_income_share
            .ok_or(RegimeConfigError::MissingHraIncomeShare(self.config.regime))?;
        let limit = non_negative(profile.gross_annual_income) * share;
        Ok(non_negative(profile.hra_claimed).min(limit))
    }
}
