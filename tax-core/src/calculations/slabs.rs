//! Progressive slab evaluation.
//!
//! Income is consumed from the lowest slab upward; only the income inside a
//! slab is taxed at that slab's rate. The evaluator expects a table that has
//! already passed [`RegimeConfig::validate`](crate::RegimeConfig::validate).
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::SlabEvaluator;
//! use tax_core::AssessmentYearConfig;
//!
//! let config = AssessmentYearConfig::ay_2024_25();
//! let evaluator = SlabEvaluator::new(&config.old_regime.slabs);
//!
//! let slab_tax = evaluator.evaluate(dec!(555000));
//!
//! // 250,000 at 0% + 250,000 at 5% + 55,000 at 20%
//! assert_eq!(slab_tax.tax, dec!(23500));
//! assert_eq!(slab_tax.breakdown.len(), 3);
//! ```

use rust_decimal::Decimal;

use crate::models::{SlabBreakdownEntry, TaxSlab};

/// Raw slab tax and the contribution of each slab that income reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlabTax {
    pub tax: Decimal,
    pub breakdown: Vec<SlabBreakdownEntry>,
}

#[derive(Debug, Clone)]
pub struct SlabEvaluator<'a> {
    slabs: &'a [TaxSlab],
}

impl<'a> SlabEvaluator<'a> {
    pub fn new(slabs: &'a [TaxSlab]) -> Self {
        Self { slabs }
    }

    /// Taxes `taxable_income` across the slab table.
    ///
    /// Zero or negative income yields zero tax and an empty breakdown.
    pub fn evaluate(
        &self,
        taxable_income: Decimal,
    ) -> SlabTax {
        let mut tax = Decimal::ZERO;
        let mut breakdown = Vec::new();

        for slab in self.slabs {
            if taxable_income <= slab.lower_bound {
                break;
            }

            let amount = self.amount_in_slab(slab, taxable_income);
            let slab_tax = self.tax_in_slab(slab, amount);
            tax += slab_tax;
            breakdown.push(SlabBreakdownEntry {
                range_label: slab.range_label(),
                rate_percent: slab.rate_percent,
                taxable_amount: amount,
                tax: slab_tax,
            });
        }

        SlabTax { tax, breakdown }
    }

    /// Portion of income above `slab.lower_bound` that fits in the slab.
    fn amount_in_slab(
        &self,
        slab: &TaxSlab,
        taxable_income: Decimal,
    ) -> Decimal {
        let above_lower = taxable_income - slab.lower_bound;
        match slab.upper_bound {
            Some(upper) => above_lower.min(upper - slab.lower_bound),
            None => above_lower,
        }
    }

    fn tax_in_slab(
        &self,
        slab: &TaxSlab,
        amount: Decimal,
    ) -> Decimal {
        amount * slab.rate_percent / Decimal::ONE_HUNDRED
    }
}
