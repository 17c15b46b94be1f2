//! Picks the cheaper regime and explains the choice.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::{format_rupees, percent_of};
use crate::models::{ComparisonResult, Regime, RegimeResult};

/// Below this much existing 80C investment the old-regime reason nudges the
/// user to invest more.
const LOW_80C_THRESHOLD: Decimal = dec!(100000);

/// Compares the two regime results.
///
/// The lower total tax wins; equal totals resolve to [`Regime::Old`].
/// `savings_percent` is measured against the larger liability, with the
/// denominator floored at one rupee.
pub fn compare_regimes(
    old: &RegimeResult,
    new: &RegimeResult,
    existing_80c: Decimal,
) -> ComparisonResult {
    let optimal_regime = if new.total_tax < old.total_tax {
        Regime::New
    } else {
        Regime::Old
    };
    let tax_savings = (old.total_tax - new.total_tax).abs();
    let denominator = old.total_tax.max(new.total_tax).max(Decimal::ONE);
    let savings_percent = percent_of(tax_savings, denominator);

    ComparisonResult {
        optimal_regime,
        tax_savings,
        savings_percent,
        reason: reason_text(optimal_regime, tax_savings, old.total_tax, existing_80c),
    }
}

fn reason_text(
    optimal: Regime,
    savings: Decimal,
    total_tax: Decimal,
    existing_80c: Decimal,
) -> String {
    let savings_label = format_rupees(savings);
    match optimal {
        _ if savings.is_zero() => format!(
            "Both regimes result in the same tax of {}. The old regime is selected; switching offers no savings.",
            format_rupees(total_tax)
        ),
        Regime::Old if existing_80c < LOW_80C_THRESHOLD => format!(
            "Old regime saves {savings_label} annually. You can save more by maximizing 80C investments."
        ),
        Regime::Old => format!(
            "Old regime is optimal with your current investments, saving {savings_label} annually."
        ),
        Regime::New => format!(
            "New regime saves {savings_label} annually with no investment requirements. Focus on wealth creation."
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn result_with_total(
        regime: Regime,
        total_tax: Decimal,
    ) -> RegimeResult {
        RegimeResult {
            regime,
            gross_income: dec!(0),
            deductions_by_section: BTreeMap::new(),
            total_deductions: dec!(0),
            taxable_income: dec!(0),
            tax_before_cess: total_tax / dec!(1.04),
            cess: dec!(0),
            total_tax,
            effective_rate_percent: dec!(0),
            slab_breakdown: Vec::new(),
        }
    }

    #[test]
    fn old_regime_wins_when_cheaper() {
        let old = result_with_total(Regime::Old, dec!(24440));
        let new = result_with_total(Regime::New, dec!(31200));

        let comparison = compare_regimes(&old, &new, dec!(50000));

        assert_eq!(
            comparison,
            ComparisonResult {
                optimal_regime: Regime::Old,
                tax_savings: dec!(6760),
                savings_percent: dec!(21.67),
                reason: "Old regime saves ₹6,760 annually. You can save more by maximizing 80C investments."
                    .to_string(),
            }
        );
    }

    #[test]
    fn old_regime_reason_with_substantial_80c() {
        let old = result_with_total(Regime::Old, dec!(10000));
        let new = result_with_total(Regime::New, dec!(12000));

        let comparison = compare_regimes(&old, &new, dec!(100000));

        assert_eq!(
            comparison.reason,
            "Old regime is optimal with your current investments, saving ₹2,000 annually."
        );
    }

    #[test]
    fn new_regime_wins_when_cheaper() {
        let old = result_with_total(Regime::Old, dec!(366600));
        let new = result_with_total(Regime::New, dec!(296400));

        let comparison = compare_regimes(&old, &new, dec!(200000));

        assert_eq!(comparison.optimal_regime, Regime::New);
        assert_eq!(comparison.tax_savings, dec!(70200));
        assert_eq!(comparison.savings_percent, dec!(19.15));
        assert_eq!(
            comparison.reason,
            "New regime saves ₹70,200 annually with no investment requirements. Focus on wealth creation."
        );
    }

    #[test]
    fn tie_resolves_to_old_regime() {
        let old = result_with_total(Regime::Old, dec!(5200));
        let new = result_with_total(Regime::New, dec!(5200));

        let comparison = compare_regimes(&old, &new, dec!(0));

        assert_eq!(comparison.optimal_regime, Regime::Old);
        assert_eq!(comparison.tax_savings, dec!(0));
        assert_eq!(comparison.savings_percent, dec!(0));
        assert_eq!(
            comparison.reason,
            "Both regimes result in the same tax of ₹5,200. The old regime is selected; switching offers no savings."
        );
    }

    #[test]
    fn zero_taxes_do_not_divide_by_zero() {
        let old = result_with_total(Regime::Old, dec!(0));
        let new = result_with_total(Regime::New, dec!(0));

        let comparison = compare_regimes(&old, &new, dec!(0));

        assert_eq!(comparison.optimal_regime, Regime::Old);
        assert_eq!(comparison.savings_percent, dec!(0));
    }

    #[test]
    fn savings_are_symmetric_and_non_negative() {
        let cases = [
            (dec!(100), dec!(250)),
            (dec!(250), dec!(100)),
            (dec!(0.5), dec!(0)),
            (dec!(0), dec!(0.5)),
        ];
        for (old_total, new_total) in cases {
            let old = result_with_total(Regime::Old, old_total);
            let new = result_with_total(Regime::New, new_total);

            let comparison = compare_regimes(&old, &new, dec!(0));

            assert_eq!(comparison.tax_savings, (old_total - new_total).abs());
            assert!(comparison.savings_percent >= dec!(0));
        }
    }

    #[test]
    fn sub_rupee_liabilities_use_floored_denominator() {
        let old = result_with_total(Regime::Old, dec!(0.5));
        let new = result_with_total(Regime::New, dec!(0));

        let comparison = compare_regimes(&old, &new, dec!(0));

        assert_eq!(comparison.savings_percent, dec!(50));
    }
}
