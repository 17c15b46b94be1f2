//! Immutable rule tables for an assessment year.
//!
//! A [`RegimeConfig`] holds the slab schedule, standard deduction and
//! section caps for one regime. An [`AssessmentYearConfig`] pairs the two
//! regimes with the cess rate. Both are built once at startup and passed by
//! reference into every calculation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{DeductionSection, Regime, TaxSlab};

/// Sections whose old-regime deduction is bounded by a section cap.
const OLD_REGIME_CAPPED_SECTIONS: [DeductionSection; 3] = [
    DeductionSection::Section80C,
    DeductionSection::Section80D,
    DeductionSection::Section24B,
];

/// Errors raised when a rule table violates its structural invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegimeConfigError {
    /// The regime has no slabs at all.
    #[error("{0} has no tax slabs")]
    NoSlabs(Regime),

    /// The first slab must start at zero income.
    #[error("{regime} slab table starts at {lower_bound}, expected 0")]
    FirstSlabNotAtZero { regime: Regime, lower_bound: Decimal },

    /// A slab does not start where the previous one ended.
    #[error("{regime} slab {index} starts at {found}, expected {expected}")]
    NonContiguousSlabs {
        regime: Regime,
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    /// A bounded slab has an upper bound at or below its lower bound.
    #[error("{regime} slab {index} is empty or inverted")]
    EmptySlab { regime: Regime, index: usize },

    /// Only the final slab may be unbounded.
    #[error("{regime} slab {index} is unbounded but is not the last slab")]
    UnboundedSlabNotLast { regime: Regime, index: usize },

    /// The final slab must be unbounded.
    #[error("{0} top slab must be unbounded")]
    TopSlabBounded(Regime),

    /// Slab rates are percentages in `[0, 100]`.
    #[error("{regime} slab rate must be between 0 and 100, got {rate}")]
    InvalidRate { regime: Regime, rate: Decimal },

    /// The standard deduction must be non-negative.
    #[error("{regime} standard deduction must be non-negative, got {amount}")]
    NegativeStandardDeduction { regime: Regime, amount: Decimal },

    /// A calculator needs a cap that the table does not define.
    #[error("{regime} is missing a cap for section {section}")]
    MissingSectionCap {
        regime: Regime,
        section: DeductionSection,
    },

    /// Section caps must be non-negative.
    #[error("{regime} cap for section {section} must be non-negative, got {cap}")]
    NegativeSectionCap {
        regime: Regime,
        section: DeductionSection,
        cap: Decimal,
    },

    /// The HRA share of gross income must lie in `[0, 1]`.
    #[error("HRA income share must be between 0 and 1, got {0}")]
    InvalidHraIncomeShare(Decimal),

    /// The old regime needs an HRA income share.
    #[error("{0} is missing an HRA income share")]
    MissingHraIncomeShare(Regime),

    /// A cap was given for a section the regime's calculator never reads.
    #[error("{regime} does not cap section {section}")]
    UnusedSectionCap {
        regime: Regime,
        section: DeductionSection,
    },

    /// Only the old regime bounds HRA by a share of income.
    #[error("{0} does not use an HRA income share")]
    UnusedHraIncomeShare(Regime),

    /// The cess rate is a percentage in `[0, 100]`.
    #[error("cess rate must be between 0 and 100, got {0}")]
    InvalidCessRate(Decimal),

    /// A regime table was placed in the wrong slot.
    #[error("expected {expected} table, found {found}")]
    RegimeMismatch { expected: Regime, found: Regime },
}

/// Slab schedule, standard deduction and section caps for one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeConfig {
    pub regime: Regime,

    /// Ordered ascending, contiguous, last slab unbounded.
    pub slabs: Vec<TaxSlab>,

    /// Flat deduction allowed regardless of income.
    pub standard_deduction: Decimal,

    /// Statutory maximum per deduction section. Absent sections are not
    /// deductible under this regime.
    #[serde(default)]
    pub section_caps: BTreeMap<DeductionSection, Decimal>,

    /// Fraction of gross income that bounds the HRA deduction.
    #[serde(default)]
    pub hra_income_share: Option<Decimal>,
}

impl RegimeConfig {
    pub fn section_cap(
        &self,
        section: DeductionSection,
    ) -> Option<Decimal> {
        self.section_caps.get(&section).copied()
    }

    /// Like [`section_cap`](Self::section_cap) but treats an absent cap as a
    /// configuration error.
    pub fn required_cap(
        &self,
        section: DeductionSection,
    ) -> Result<Decimal, RegimeConfigError> {
        self.section_cap(section)
            .ok_or(RegimeConfigError::MissingSectionCap {
                regime: self.regime,
                section,
            })
    }

    /// Checks slab ordering, contiguity, rates, deduction and caps.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegimeConfigError`] found.
    pub fn validate(&self) -> Result<(), RegimeConfigError> {
        let regime = self.regime;
        let first = self.slabs.first().ok_or(RegimeConfigError::NoSlabs(regime))?;
        if first.lower_bound != Decimal::ZERO {
            return Err(RegimeConfigError::FirstSlabNotAtZero {
                regime,
                lower_bound: first.lower_bound,
            });
        }

        let last_index = self.slabs.len() - 1;
        let mut expected_lower = Decimal::ZERO;
        for (index, slab) in self.slabs.iter().enumerate() {
            if slab.lower_bound != expected_lower {
                return Err(RegimeConfigError::NonContiguousSlabs {
                    regime,
                    index,
                    expected: expected_lower,
                    found: slab.lower_bound,
                });
            }
            if slab.rate_percent < Decimal::ZERO || slab.rate_percent > Decimal::ONE_HUNDRED {
                return Err(RegimeConfigError::InvalidRate {
                    regime,
                    rate: slab.rate_percent,
                });
            }
            match slab.upper_bound {
                Some(upper) if upper <= slab.lower_bound => {
                    return Err(RegimeConfigError::EmptySlab { regime, index });
                }
                Some(_) if index == last_index => {
                    return Err(RegimeConfigError::TopSlabBounded(regime));
                }
                Some(upper) => expected_lower = upper,
                None if index != last_index => {
                    return Err(RegimeConfigError::UnboundedSlabNotLast { regime, index });
                }
                None => {}
            }
        }

        if self.standard_deduction < Decimal::ZERO {
            return Err(RegimeConfigError::NegativeStandardDeduction {
                regime,
                amount: self.standard_deduction,
            });
        }

        for (&section, &cap) in &self.section_caps {
            if cap < Decimal::ZERO {
                return Err(RegimeConfigError::NegativeSectionCap {
                    regime,
                    section,
                    cap,
                });
            }
        }

        if let Some(share) = self.hra_income_share {
            if share < Decimal::ZERO || share > Decimal::ONE {
                return Err(RegimeConfigError::InvalidHraIncomeShare(share));
            }
        }

        Ok(())
    }
}

/// Both regimes plus the cess rate for one assessment year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentYearConfig {
    /// Label such as `2024-25`.
    pub assessment_year: String,
    pub old_regime: RegimeConfig,
    pub new_regime: RegimeConfig,
    /// Health and education cess applied to slab tax, as a percentage.
    pub cess_rate_percent: Decimal,
}

impl AssessmentYearConfig {
    /// Rule tables for assessment year 2024-25.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::{AssessmentYearConfig, DeductionSection};
    ///
    /// let config = AssessmentYearConfig::ay_2024_25();
    ///
    /// assert_eq!(config.old_regime.standard_deduction, dec!(50000));
    /// assert_eq!(
    ///     config.old_regime.section_cap(DeductionSection::Section80C),
    ///     Some(dec!(150000))
    /// );
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn ay_2024_25() -> Self {
        let old_regime = RegimeConfig {
            regime: Regime::Old,
            slabs: vec![
                TaxSlab::new(dec!(0), Some(dec!(250000)), dec!(0)),
                TaxSlab::new(dec!(250000), Some(dec!(500000)), dec!(5)),
                TaxSlab::new(dec!(500000), Some(dec!(1000000)), dec!(20)),
                TaxSlab::new(dec!(1000000), None, dec!(30)),
            ],
            standard_deduction: dec!(50000),
            section_caps: BTreeMap::from([
                (DeductionSection::Section80C, dec!(150000)),
                (DeductionSection::Section80D, dec!(25000)),
                (DeductionSection::Section24B, dec!(200000)),
            ]),
            hra_income_share: Some(dec!(0.5)),
        };

        let new_regime = RegimeConfig {
            regime: Regime::New,
            slabs: vec![
                TaxSlab::new(dec!(0), Some(dec!(300000)), dec!(0)),
                TaxSlab::new(dec!(300000), Some(dec!(600000)), dec!(5)),
                TaxSlab::new(dec!(600000), Some(dec!(900000)), dec!(10)),
                TaxSlab::new(dec!(900000), Some(dec!(1200000)), dec!(15)),
                TaxSlab::new(dec!(1200000), Some(dec!(1500000)), dec!(20)),
                TaxSlab::new(dec!(1500000), None, dec!(30)),
            ],
            standard_deduction: dec!(50000),
            section_caps: BTreeMap::new(),
            hra_income_share: None,
        };

        Self {
            assessment_year: "2024-25".to_string(),
            old_regime,
            new_regime,
            cess_rate_percent: dec!(4),
        }
    }

    pub fn regime(
        &self,
        regime: Regime,
    ) -> &RegimeConfig {
        match regime {
            Regime::Old => &self.old_regime,
            Regime::New => &self.new_regime,
        }
    }

    /// Validates both regime tables and the slots they sit in. The old regime
    /// must carry exactly the caps its calculator reads plus an HRA share;
    /// the new regime carries neither. Finally checks the cess rate.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegimeConfigError`] found.
    pub fn validate(&self) -> Result<(), RegimeConfigError> {
        for (expected, table) in [
            (Regime::Old, &self.old_regime),
            (Regime::New, &self.new_regime),
        ] {
            if table.regime != expected {
                return Err(RegimeConfigError::RegimeMismatch {
                    expected,
                    found: table.regime,
                });
            }
            table.validate()?;
        }

        for section in OLD_REGIME_CAPPED_SECTIONS {
            self.old_regime.required_cap(section)?;
        }
        if let Some(&section) = self
            .old_regime
            .section_caps
            .keys()
            .find(|s| !OLD_REGIME_CAPPED_SECTIONS.contains(*s))
        {
            return Err(RegimeConfigError::UnusedSectionCap {
                regime: Regime::Old,
                section,
            });
        }
        if self.old_regime.hra_income_share.is_none() {
            return Err(RegimeConfigError::MissingHraIncomeShare(Regime::Old));
        }

        if let Some(&section) = self.new_regime.section_caps.keys().next() {
            return Err(RegimeConfigError::UnusedSectionCap {
                regime: Regime::New,
                section,
            });
        }
        if self.new_regime.hra_income_share.is_some() {
            return Err(RegimeConfigError::UnusedHraIncomeShare(Regime::New));
        }

        if self.cess_rate_percent < Decimal::ZERO || self.cess_rate_percent > Decimal::ONE_HUNDRED
        {
            return Err(RegimeConfigError::InvalidCessRate(self.cess_rate_percent));
        }

        Ok(())
    }
}

impl Default for AssessmentYearConfig {
    fn default() -> Self {
        Self::ay_2024_25()
    }
}
