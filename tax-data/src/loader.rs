use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{AssessmentYearConfig, Regime, RegimeConfigError, TaxSlab};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading slab tables.
#[derive(Debug, Error)]
pub enum SlabTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("No slab rows for assessment year {0}")]
    NoRowsForYear(String),

    #[error("Invalid slab table: {0}")]
    InvalidTable(#[from] RegimeConfigError),
}

impl From<csv::Error> for SlabTableLoaderError {
    fn from(err: csv::Error) -> Self {
        SlabTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a slab table CSV file.
///
/// - `assessment_year`: label such as `2024-25`
/// - `regime`: `old` or `new` (case-insensitive)
/// - `lower_bound`: income where the slab starts
/// - `upper_bound`: income where it ends (empty for the unbounded top slab)
/// - `rate_percent`: marginal rate as a percentage (e.g. `5` for 5%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SlabTableRecord {
    pub assessment_year: String,
    #[serde(deserialize_with = "deserialize_regime")]
    pub regime: Regime,
    pub lower_bound: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate_percent: Decimal,
}

fn deserialize_regime<'de, D>(deserializer: D) -> Result<Regime, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Regime::parse(&s).ok_or_else(|| {
        serde::de::Error::custom(format!("unknown regime '{s}', expected old or new"))
    })
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for slab schedules from CSV files.
///
/// Rows are matched against the assessment year of the configuration they
/// are applied to; rows for other years are ignored.
pub struct SlabTableLoader;

impl SlabTableLoader {
    /// Parse slab records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<SlabTableRecord>, SlabTableLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: SlabTableRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Replace the slabs of every regime that has rows for
    /// `config.assessment_year`, then re-validate the configuration.
    ///
    /// Rows are sorted by lower bound before use, so file order does not
    /// matter. Regimes without rows keep their existing slabs. Applying the
    /// same records twice gives the same result.
    ///
    /// Returns the number of slabs installed.
    ///
    /// # Errors
    /// * [`SlabTableLoaderError::NoRowsForYear`] when nothing matches the
    ///   configured assessment year.
    /// * [`SlabTableLoaderError::InvalidTable`] when the resulting table breaks
    ///   contiguity, ordering or rate rules. `config` is left unchanged.
    pub fn apply(
        config: &mut AssessmentYearConfig,
        records: &[SlabTableRecord],
    ) -> Result<usize, SlabTableLoaderError> {
        let mut by_regime: BTreeMap<Regime, Vec<TaxSlab>> = BTreeMap::new();
        for record in records
            .iter()
            .filter(|r| r.assessment_year == config.assessment_year)
        {
            by_regime
                .entry(record.regime)
                .or_default()
                .push(TaxSlab::new(record.lower_bound, record.upper_bound, record.rate_percent));
        }

        if by_regime.is_empty() {
            return Err(SlabTableLoaderError::NoRowsForYear(config.assessment_year.clone()));
        }

        let mut updated = config.clone();
        let mut installed = 0;
        for (regime, mut slabs) in by_regime {
            slabs.sort_by(|a, b| a.lower_bound.cmp(&b.lower_bound));
            debug!(%regime, slabs = slabs.len(), "installing slab table");
            installed += slabs.len();
            match regime {
                Regime::Old => updated.old_regime.slabs = slabs,
                Regime::New => updated.new_regime.slabs = slabs,
            }
        }

        updated.validate()?;
        *config = updated;
        Ok(installed)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const HEADER: &str = "assessment_year,regime,lower_bound,upper_bound,rate_percent\n";

    fn parse(rows: &str) -> Vec<SlabTableRecord> {
        SlabTableLoader::parse(format!("{HEADER}{rows}").as_bytes()).expect("Failed to parse CSV")
    }

    // =========================================================================
    // parse tests
    // =========================================================================

    #[test]
    fn test_parse_single_slab() {
        let records = parse("2024-25,old,250000,500000,5");

        assert_eq!(
            records,
            vec![SlabTableRecord {
                assessment_year: "2024-25".to_string(),
                regime: Regime::Old,
                lower_bound: dec!(250000),
                upper_bound: Some(dec!(500000)),
                rate_percent: dec!(5),
            }]
        );
    }

    #[test]
    fn test_parse_unbounded_upper() {
        let records = parse("2024-25,new,1500000,,30");

        assert_eq!(records[0].upper_bound, None);
    }

    #[test]
    fn test_parse_regime_is_case_insensitive_and_trimmed() {
        let records = parse("2024-25, NEW ,0,300000,0");

        assert_eq!(records[0].regime, Regime::New);
    }

    #[test]
    fn test_parse_unknown_regime() {
        let csv = format!("{HEADER}2024-25,middle,0,300000,0");

        let err = SlabTableLoader::parse(csv.as_bytes()).expect_err("Should fail for regime");
        let SlabTableLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(msg.contains("unknown regime"), "got: {}", msg);
    }

    #[test]
    fn test_parse_missing_column() {
        let csv = "assessment_year,regime,lower_bound\n2024-25,old,0";

        let err = SlabTableLoader::parse(csv.as_bytes())
            .expect_err("Should fail for missing column");
        let SlabTableLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(msg.contains("missing field"), "got: {}", msg);
    }

    #[test]
    fn test_parse_bad_decimal() {
        let csv = format!("{HEADER}2024-25,old,abc,250000,0");

        let result = SlabTableLoader::parse(csv.as_bytes());

        assert!(matches!(result, Err(SlabTableLoaderError::CsvParse(_))));
    }

    #[test]
    fn test_parse_empty_csv() {
        assert!(parse("").is_empty());
    }

    // =========================================================================
    // apply tests
    // =========================================================================

    #[test]
    fn test_apply_replaces_only_listed_regime() {
        let mut config = AssessmentYearConfig::ay_2024_25();
        let original_old = config.old_regime.slabs.clone();
        let records = parse(
            "2024-25,new,0,400000,0\n\
             2024-25,new,400000,,10",
        );

        let installed = SlabTableLoader::apply(&mut config, &records).unwrap();

        assert_eq!(installed, 2);
        assert_eq!(config.old_regime.slabs, original_old);
        assert_eq!(
            config.new_regime.slabs,
            vec![
                TaxSlab::new(dec!(0), Some(dec!(400000)), dec!(0)),
                TaxSlab::new(dec!(400000), None, dec!(10)),
            ]
        );
    }

    #[test]
    fn test_apply_sorts_rows_by_lower_bound() {
        let mut config = AssessmentYearConfig::ay_2024_25();
        let records = parse(
            "2024-25,old,500000,,20\n\
             2024-25,old,0,500000,0",
        );

        SlabTableLoader::apply(&mut config, &records).unwrap();

        assert_eq!(config.old_regime.slabs[0].lower_bound, dec!(0));
        assert_eq!(config.old_regime.slabs[1].upper_bound, None);
    }

    #[test]
    fn test_apply_ignores_other_years() {
        let mut config = AssessmentYearConfig::ay_2024_25();
        let records = parse("2030-31,new,0,,50");

        let result = SlabTableLoader::apply(&mut config, &records);

        match result {
            Err(SlabTableLoaderError::NoRowsForYear(ref year)) => assert_eq!(year, "2024-25"),
            other => panic!("expected NoRowsForYear, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_gap_is_rejected_and_config_untouched() {
        let mut config = AssessmentYearConfig::ay_2024_25();
        let before = config.clone();
        let records = parse(
            "2024-25,new,0,300000,0\n\
             2024-25,new,350000,,5",
        );

        let result = SlabTableLoader::apply(&mut config, &records);

        assert!(matches!(
            result,
            Err(SlabTableLoaderError::InvalidTable(RegimeConfigError::NonContiguousSlabs { .. }))
        ));
        assert_eq!(config, before);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut config = AssessmentYearConfig::ay_2024_25();
        let records = parse(
            "2024-25,new,0,400000,0\n\
             2024-25,new,400000,,10",
        );

        SlabTableLoader::apply(&mut config, &records).unwrap();
        let once = config.clone();
        SlabTableLoader::apply(&mut config, &records).unwrap();

        assert_eq!(config, once);
    }
}
