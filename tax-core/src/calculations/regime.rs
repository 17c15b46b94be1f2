//! Full liability computation for a single regime.
//!
//! The pipeline runs in a fixed order:
//!
//! 1. Deductions by section ([`DeductionCalculator`])
//! 2. Taxable income (gross − deductions, floored at zero)
//! 3. Slab tax ([`SlabEvaluator`])
//! 4. Cess ([`apply_cess`])
//! 5. Effective rate (total tax ÷ gross income)
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::RegimeCalculator;
//! use tax_core::{AssessmentYearConfig, FinancialProfile};
//!
//! let config = AssessmentYearConfig::ay_2024_25();
//! let calculator = RegimeCalculator::new(&config.new_regime, config.cess_rate_percent);
//!
//! let result = calculator
//!     .calculate(&FinancialProfile::with_income(dec!(800000)))
//!     .unwrap();
//!
//! assert_eq!(result.taxable_income, dec!(750000));
//! assert_eq!(result.total_tax, dec!(31200));
//! assert_eq!(result.effective_rate_percent, dec!(3.90));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::cess::apply_cess;
use crate::calculations::common::percent_of;
use crate::calculations::deductions::DeductionCalculator;
use crate::calculations::slabs::SlabEvaluator;
use crate::models::{FinancialProfile, RegimeConfig, RegimeConfigError, RegimeResult};

#[derive(Debug, Clone)]
pub struct RegimeCalculator<'a> {
    config: &'a RegimeConfig,
    cess_rate_percent: Decimal,
}

impl<'a> RegimeCalculator<'a> {
    pub fn new(
        config: &'a RegimeConfig,
        cess_rate_percent: Decimal,
    ) -> Self {
        Self {
            config,
            cess_rate_percent,
        }
    }

    /// # Errors
    ///
    /// Returns [`RegimeConfigError`] if the regime table is missing data the
    /// deduction rules need.
    pub fn calculate(
        &self,
        profile: &FinancialProfile,
    ) -> Result<RegimeResult, RegimeConfigError> {
        let deductions = DeductionCalculator::new(self.config).calculate(profile)?;
        let slab_tax = SlabEvaluator::new(&self.config.slabs).evaluate(deductions.taxable_income);
        let applied = apply_cess(slab_tax.tax, self.cess_rate_percent);
        let effective_rate_percent =
            self.effective_rate(applied.total_tax, profile.gross_annual_income);

        debug!(
            regime = %self.config.regime,
            taxable_income = %deductions.taxable_income,
            tax_before_cess = %applied.tax_before_cess,
            total_tax = %applied.total_tax,
            "regime computed"
        );

        Ok(RegimeResult {
            regime: self.config.regime,
            gross_income: profile.gross_annual_income,
            deductions_by_section: deductions.by_section,
            total_deductions: deductions.total,
            taxable_income: deductions.taxable_income,
            tax_before_cess: applied.tax_before_cess,
            cess: applied.cess,
            total_tax: applied.total_tax,
            effective_rate_percent,
            slab_breakdown: slab_tax.breakdown,
        })
    }

    /// Zero for zero income.
    fn effective_rate(
        &self,
        total_tax: Decimal,
        gross_income: Decimal,
    ) -> Decimal {
        percent_of(total_tax, gross_income)
    }
}
