//! TOML overrides for the built-in rule tables.
//!
//! Every key is optional; anything absent keeps its current value.
//! Section caps are accepted for the old regime's 80C, 80D and 24B only, and
//! `hra_income_share` for the old regime only; anything else fails validation.
//!
//! ```toml
//! assessment_year = "2025-26"
//! cess_rate_percent = 4
//!
//! [old_regime]
//! standard_deduction = 50000
//! hra_income_share = 0.5
//!
//! [old_regime.section_caps]
//! 80C = 150000
//!
//! [new_regime]
//! standard_deduction = 75000
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{AssessmentYearConfig, DeductionSection, RegimeConfig, RegimeConfigError};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RulesFileError {
    #[error("Failed to read rules file {path}: {message}")]
    Io { path: String, message: String },

    #[error("TOML parse error: {0}")]
    Parse(String),

    #[error("Invalid rules: {0}")]
    InvalidConfig(#[from] RegimeConfigError),
}

impl From<toml::de::Error> for RulesFileError {
    fn from(err: toml::de::Error) -> Self {
        RulesFileError::Parse(err.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegimeOverrides {
    pub standard_deduction: Option<Decimal>,
    pub hra_income_share: Option<Decimal>,
    /// Merged into the existing caps; sections not listed keep theirs.
    #[serde(default, deserialize_with = "deserialize_section_caps")]
    pub section_caps: BTreeMap<DeductionSection, Decimal>,
}

/// Keys are section codes (`80C`, `80d`, `HRA`...), matched case-insensitively.
fn deserialize_section_caps<'de, D>(
    deserializer: D
) -> Result<BTreeMap<DeductionSection, Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: BTreeMap<String, Decimal> = BTreeMap::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(code, cap)| {
            DeductionSection::parse(&code)
                .map(|section| (section, cap))
                .ok_or_else(|| {
                    serde::de::Error::custom(format!("unknown deduction section '{code}'"))
                })
        })
        .collect()
}

impl RegimeOverrides {
    fn apply_to(
        &self,
        config: &mut RegimeConfig,
    ) {
        if let Some(amount) = self.standard_deduction {
            config.standard_deduction = amount;
        }
        if let Some(share) = self.hra_income_share {
            config.hra_income_share = Some(share);
        }
        for (&section, &cap) in &self.section_caps {
            config.section_caps.insert(section, cap);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaxRulesFile {
    pub assessment_year: Option<String>,
    pub cess_rate_percent: Option<Decimal>,
    pub old_regime: Option<RegimeOverrides>,
    pub new_regime: Option<RegimeOverrides>,
}

impl TaxRulesFile {
    pub fn parse(source: &str) -> Result<Self, RulesFileError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, RulesFileError> {
        let source = fs::read_to_string(path).map_err(|e| RulesFileError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&source)
    }

    /// Applies the overrides and re-validates. On error `config` is left
    /// unchanged.
    pub fn apply(
        &self,
        config: &mut AssessmentYearConfig,
    ) -> Result<(), RulesFileError> {
        let mut updated = config.clone();

        if let Some(year) = &self.assessment_year {
            updated.assessment_year = year.clone();
        }
        if let Some(rate) = self.cess_rate_percent {
            updated.cess_rate_percent = rate;
        }
        if let Some(overrides) = &self.old_regime {
            overrides.apply_to(&mut updated.old_regime);
        }
        if let Some(overrides) = &self.new_regime {
            overrides.apply_to(&mut updated.new_regime);
        }

        updated.validate()?;
        debug!(assessment_year = %updated.assessment_year, "rules overrides applied");
        *config = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::Regime;

    use super::*;

    #[test]
    fn empty_file_changes_nothing() {
        let mut config = AssessmentYearConfig::ay_2024_25();

        TaxRulesFile::parse("").unwrap().apply(&mut config).unwrap();

        assert_eq!(config, AssessmentYearConfig::ay_2024_25());
    }

    #[test]
    fn overrides_merge_into_config() {
        let rules = TaxRulesFile::parse(
            r#"
            assessment_year = "2025-26"
            cess_rate_percent = 4

            [old_regime]
            hra_income_share = 0.4

            [old_regime.section_caps]
            80D = 50000

            [new_regime]
            standard_deduction = 75000
            "#,
        )
        .unwrap();
        let mut config = AssessmentYearConfig::ay_2024_25();

        rules.apply(&mut config).unwrap();

        assert_eq!(config.assessment_year, "2025-26");
        assert_eq!(config.old_regime.hra_income_share, Some(dec!(0.4)));
        assert_eq!(
            config.old_regime.section_cap(DeductionSection::Section80D),
            Some(dec!(50000))
        );
        assert_eq!(
            config.old_regime.section_cap(DeductionSection::Section80C),
            Some(dec!(150000))
        );
        assert_eq!(config.new_regime.standard_deduction, dec!(75000));
    }

    #[test]
    fn unknown_key_is_parse_error() {
        let result = TaxRulesFile::parse("surcharge_percent = 10");

        match result {
            Err(RulesFileError::Parse(msg)) => {
                assert!(msg.contains("surcharge_percent"), "got: {msg}")
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_section_is_parse_error() {
        let result = TaxRulesFile::parse("[old_regime.section_caps]\n80G = 10000");

        match result {
            Err(RulesFileError::Parse(msg)) => assert!(msg.contains("80G"), "got: {msg}"),
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_values_leave_config_untouched() {
        let rules = TaxRulesFile::parse("cess_rate_percent = 140").unwrap();
        let mut config = AssessmentYearConfig::ay_2024_25();

        let result = rules.apply(&mut config);

        assert!(matches!(
            result,
            Err(RulesFileError::InvalidConfig(RegimeConfigError::InvalidCessRate(_)))
        ));
        assert_eq!(config, AssessmentYearConfig::ay_2024_25());
    }

    fn assert_rejected(
        source: &str,
        expected: RegimeConfigError,
    ) {
        let rules = TaxRulesFile::parse(source).unwrap();
        let mut config = AssessmentYearConfig::ay_2024_25();

        let result = rules.apply(&mut config);

        match result {
            Err(RulesFileError::InvalidConfig(err)) => assert_eq!(err, expected),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
        assert_eq!(config, AssessmentYearConfig::ay_2024_25());
    }

    #[test]
    fn old_regime_hra_cap_is_rejected() {
        assert_rejected(
            "[old_regime.section_caps]\nHRA = 1000",
            RegimeConfigError::UnusedSectionCap {
                regime: Regime::Old,
                section: DeductionSection::Hra,
            },
        );
    }

    #[test]
    fn old_regime_standard_deduction_cap_is_rejected() {
        assert_rejected(
            "[old_regime.section_caps]\nstandard_deduction = 1000",
            RegimeConfigError::UnusedSectionCap {
                regime: Regime::Old,
                section: DeductionSection::Standard,
            },
        );
    }

    #[test]
    fn new_regime_cap_is_rejected() {
        assert_rejected(
            "[new_regime.section_caps]\n80C = 150000",
            RegimeConfigError::UnusedSectionCap {
                regime: Regime::New,
                section: DeductionSection::Section80C,
            },
        );
    }

    #[test]
    fn new_regime_hra_share_is_rejected() {
        assert_rejected(
            "[new_regime]\nhra_income_share = 0.5",
            RegimeConfigError::UnusedHraIncomeShare(Regime::New),
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = TaxRulesFile::load(Path::new("does/not/exist.toml"));

        assert!(matches!(result, Err(RulesFileError::Io { .. })));
    }
}
