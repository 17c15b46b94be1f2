use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected caller input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    /// Every monetary field must be zero or positive.
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// Amounts above [`MAX_AMOUNT`] are refused before any arithmetic.
    #[error("{field} must not exceed {max}, got {value}")]
    AmountTooLarge {
        field: &'static str,
        value: Decimal,
        max: Decimal,
    },
}

/// Largest accepted monetary amount (₹10^15). Slab and cess arithmetic on
/// anything up to this stays far inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Caller-supplied income and deduction claims for one request.
///
/// Missing fields deserialize to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialProfile {
    pub gross_annual_income: Decimal,

    /// Contributions to 80C instruments (ELSS, PPF, NSC, life cover...).
    pub section_80c_contribution: Decimal,

    /// Health insurance premium claimed under 80D.
    pub health_insurance_premium: Decimal,

    /// Interest paid on a home loan, claimed under 24B.
    pub home_loan_interest: Decimal,

    pub hra_claimed: Decimal,
}

impl FinancialProfile {
    pub fn with_income(gross_annual_income: Decimal) -> Self {
        Self {
            gross_annual_income,
            ..Self::default()
        }
    }

    /// Field name and value pairs, in declaration order.
    pub fn amounts(&self) -> [(&'static str, Decimal); 5] {
        [
            ("gross_annual_income", self.gross_annual_income),
            ("section_80c_contribution", self.section_80c_contribution),
            ("health_insurance_premium", self.health_insurance_premium),
            ("home_loan_interest", self.home_loan_interest),
            ("hra_claimed", self.hra_claimed),
        ]
    }

    /// # Errors
    ///
    /// Returns [`ProfileError::NegativeAmount`] or
    /// [`ProfileError::AmountTooLarge`] for the first field out of range.
    pub fn validate(&self) -> Result<(), ProfileError> {
        for (field, value) in self.amounts() {
            if value < Decimal::ZERO {
                return Err(ProfileError::NegativeAmount { field, value });
            }
            if value > MAX_AMOUNT {
                return Err(ProfileError::AmountTooLarge {
                    field,
                    value,
                    max: MAX_AMOUNT,
                });
            }
        }
        Ok(())
    }
}

/// Investor temperament used to phrase strategy advice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskAppetite {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskAppetite {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Aggressive => "aggressive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Some(Self::Conservative),
            "moderate" => Some(Self::Moderate),
            "aggressive" => Some(Self::Aggressive),
            _ => None,
        }
    }
}

impl fmt::Display for RiskAppetite {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Personal details that shape the long-range strategy but not the tax itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyProfile {
    pub age: u32,
    pub risk_appetite: RiskAppetite,
}

impl Default for StrategyProfile {
    fn default() -> Self {
        Self {
            age: 30,
            risk_appetite: RiskAppetite::Moderate,
        }
    }
}
