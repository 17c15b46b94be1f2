use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DeductionSection, Regime};

/// Tax attributable to a single slab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabBreakdownEntry {
    pub range_label: String,
    pub rate_percent: Decimal,
    /// Portion of taxable income that falls inside this slab.
    pub taxable_amount: Decimal,
    pub tax: Decimal,
}

/// Liability under one regime for one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeResult {
    pub regime: Regime,
    pub gross_income: Decimal,
    pub deductions_by_section: BTreeMap<DeductionSection, Decimal>,
    pub total_deductions: Decimal,
    pub taxable_income: Decimal,
    pub tax_before_cess: Decimal,
    pub cess: Decimal,
    pub total_tax: Decimal,
    /// Total tax as a percentage of gross income, two decimal places.
    pub effective_rate_percent: Decimal,
    pub slab_breakdown: Vec<SlabBreakdownEntry>,
}

impl RegimeResult {
    pub fn deduction(
        &self,
        section: DeductionSection,
    ) -> Decimal {
        self.deductions_by_section
            .get(&section)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Which regime wins and by how much.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub optimal_regime: Regime,
    /// Absolute difference between the two total taxes.
    pub tax_savings: Decimal,
    /// Savings relative to the larger liability, two decimal places.
    pub savings_percent: Decimal,
    pub reason: String,
}
