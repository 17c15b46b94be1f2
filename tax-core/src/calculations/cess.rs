//! Flat health and education cess on slab tax.

use rust_decimal::Decimal;

/// Slab tax with the cess added on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CessApplied {
    pub tax_before_cess: Decimal,
    pub cess: Decimal,
    pub total_tax: Decimal,
}

/// Adds `cess_rate_percent` of `tax_before_cess`.
///
/// No rounding is applied, so `total_tax == tax_before_cess × (1 + rate/100)`
/// holds exactly.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::apply_cess;
///
/// let applied = apply_cess(dec!(23500), dec!(4));
///
/// assert_eq!(applied.cess, dec!(940));
/// assert_eq!(applied.total_tax, dec!(24440));
/// ```
pub fn apply_cess(
    tax_before_cess: Decimal,
    cess_rate_percent: Decimal,
) -> CessApplied {
    let cess = tax_before_cess * cess_rate_percent / Decimal::ONE_HUNDRED;
    CessApplied {
        tax_before_cess,
        cess,
        total_tax: tax_before_cess + cess,
    }
}
