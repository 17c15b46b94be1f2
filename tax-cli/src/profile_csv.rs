//! CSV loader for batch profiles.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Only
//! `gross_annual_income` is required; a missing or empty amount cell is 0.
//!
//! | Column                     | Required | Notes                                  |
//! |----------------------------|----------|----------------------------------------|
//! | `label`                    | no       | Free text shown next to the row result |
//! | `gross_annual_income`      | yes      |                                        |
//! | `section_80c_contribution` | no       |                                        |
//! | `health_insurance_premium` | no       |                                        |
//! | `home_loan_interest`       | no       |                                        |
//! | `hra_claimed`              | no       |                                        |
//!
//! Amounts accept the same spellings as the command line (`₹`, `Rs.`,
//! comma grouping). Quote cells that contain commas.
//!
//! ```csv
//! label,gross_annual_income,section_80c_contribution,health_insurance_premium
//! asha,"₹8,00,000",50000,15000
//! ravi,2000000,200000,
//! ```
//!
//! Each data row is converted on its own: a bad cell rejects that row only.

use std::path::Path;

use serde::Deserialize;
use tax_core::FinancialProfile;
use thiserror::Error;

use crate::utils::parse_rupees;

const REQUIRED_COLUMN: &str = "gross_annual_income";

#[derive(Debug, Deserialize)]
struct CsvRow {
    label: Option<String>,
    gross_annual_income: Option<String>,
    section_80c_contribution: Option<String>,
    health_insurance_premium: Option<String>,
    home_loan_interest: Option<String>,
    hra_claimed: Option<String>,
}

#[derive(Debug, Error)]
pub enum ProfileCsvError {
    #[error("cannot read '{path}': {message}")]
    Io { path: String, message: String },

    /// Structural problem with the whole file (unreadable header...).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    /// One data row could not be turned into a profile. `row` is 1-based,
    /// header excluded.
    #[error("row {row}: {message}")]
    InvalidRow { row: usize, message: String },
}

/// A successfully parsed data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRow {
    /// 1-based, header excluded.
    pub row: usize,
    pub label: Option<String>,
    pub profile: FinancialProfile,
}

fn amount(
    cell: Option<String>,
    column: &str,
    row: usize,
) -> Result<rust_decimal::Decimal, ProfileCsvError> {
    parse_rupees(cell.as_deref().unwrap_or("")).map_err(|e| ProfileCsvError::InvalidRow {
        row,
        message: format!("{column}: {e}"),
    })
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<ProfileRow, ProfileCsvError> {
    if row
        .gross_annual_income
        .as_deref()
        .is_none_or(|cell| cell.trim().is_empty())
    {
        return Err(ProfileCsvError::InvalidRow {
            row: row_number,
            message: format!("{REQUIRED_COLUMN} is empty"),
        });
    }

    let profile = FinancialProfile {
        gross_annual_income: amount(row.gross_annual_income, "gross_annual_income", row_number)?,
        section_80c_contribution: amount(
            row.section_80c_contribution,
            "section_80c_contribution",
            row_number,
        )?,
        health_insurance_premium: amount(
            row.health_insurance_premium,
            "health_insurance_premium",
            row_number,
        )?,
        home_loan_interest: amount(row.home_loan_interest, "home_loan_interest", row_number)?,
        hra_claimed: amount(row.hra_claimed, "hra_claimed", row_number)?,
    };

    Ok(ProfileRow {
        row: row_number,
        label: row.label.filter(|l| !l.is_empty()),
        profile,
    })
}

/// Parses CSV text into one result per data row, in file order.
///
/// # Errors
///
/// The outer `Result` fails only when the header is unreadable or lacks
/// `gross_annual_income`. Row-level problems come back as
/// [`ProfileCsvError::InvalidRow`] entries in the vector.
pub fn load_from_str(
    input: &str
) -> Result<Vec<Result<ProfileRow, ProfileCsvError>>, ProfileCsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let headers = reader.headers()?;
    if !headers.is_empty() && !headers.iter().any(|h| h == REQUIRED_COLUMN) {
        return Err(ProfileCsvError::MissingColumn(REQUIRED_COLUMN));
    }

    Ok(reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row_number = idx + 1;
            let row = result.map_err(|e| ProfileCsvError::InvalidRow {
                row: row_number,
                message: e.to_string(),
            })?;
            convert_row(row, row_number)
        })
        .collect())
}

/// Reads `path` and delegates to [`load_from_str`].
pub fn load_from_file(
    path: &Path
) -> Result<Vec<Result<ProfileRow, ProfileCsvError>>, ProfileCsvError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ProfileCsvError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    load_from_str(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    const MINIMAL_CSV: &str = "\
gross_annual_income
800000
";

    const FULL_CSV: &str = "\
label,gross_annual_income,section_80c_contribution,health_insurance_premium,home_loan_interest,hra_claimed
asha,\"₹8,00,000\",50000,15000,80000,0
";

    fn ok_rows(input: &str) -> Vec<ProfileRow> {
        load_from_str(input)
            .expect("header should be valid")
            .into_iter()
            .map(|r| r.expect("row should parse"))
            .collect()
    }

    // -----------------------------------------------------------------------
    // 1. Required column only, the rest default to zero
    // -----------------------------------------------------------------------
    #[test]
    fn test_minimal_csv_defaults_missing_amounts() {
        let rows = ok_rows(MINIMAL_CSV);

        assert_eq!(
            rows,
            vec![ProfileRow {
                row: 1,
                label: None,
                profile: FinancialProfile::with_income(dec!(800000)),
            }]
        );
    }

    // -----------------------------------------------------------------------
    // 2. Every column populated, rupee spellings accepted
    // -----------------------------------------------------------------------
    #[test]
    fn test_full_csv_all_fields_populated() {
        let rows = ok_rows(FULL_CSV);

        assert_eq!(rows[0].label.as_deref(), Some("asha"));
        assert_eq!(
            rows[0].profile,
            FinancialProfile {
                gross_annual_income: dec!(800000),
                section_80c_contribution: dec!(50000),
                health_insurance_premium: dec!(15000),
                home_loan_interest: dec!(80000),
                hra_claimed: dec!(0),
            }
        );
    }

    // -----------------------------------------------------------------------
    // 3. A bad row is rejected alone
    // -----------------------------------------------------------------------
    #[test]
    fn test_bad_row_does_not_poison_neighbours() {
        let csv = "\
label,gross_annual_income,section_80c_contribution
first,500000,10000
second,600000,lots
third,,10000
fourth,700000,
";
        let results = load_from_str(csv).expect("header is fine");

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().profile.gross_annual_income, dec!(500000));
        match &results[1] {
            Err(ProfileCsvError::InvalidRow { row, message }) => {
                assert_eq!(*row, 2);
                assert!(message.contains("section_80c_contribution"), "got: {message}");
            }
            other => panic!("expected InvalidRow, got {other:?}"),
        }
        assert!(matches!(results[2], Err(ProfileCsvError::InvalidRow { row: 3, .. })));
        assert_eq!(
            results[3].as_ref().unwrap().profile.section_80c_contribution,
            dec!(0)
        );
    }

    #[test]
    fn test_wrong_column_count_rejects_that_row() {
        let csv = "gross_annual_income,hra_claimed\n500000,0\n600000\n";

        let results = load_from_str(csv).expect("header is fine");

        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(ProfileCsvError::InvalidRow { row: 2, .. })));
    }

    // -----------------------------------------------------------------------
    // 4. Header problems fail the whole file
    // -----------------------------------------------------------------------
    #[test]
    fn test_missing_required_column() {
        let result = load_from_str("label,hra_claimed\nx,100\n");

        assert!(matches!(
            result,
            Err(ProfileCsvError::MissingColumn("gross_annual_income"))
        ));
    }

    #[test]
    fn test_empty_input_yields_no_rows() {
        assert!(load_from_str("").unwrap().is_empty());
        assert!(load_from_str("gross_annual_income\n").unwrap().is_empty());
    }

    #[test]
    fn test_negative_amount_is_kept_for_validation() {
        let rows = ok_rows("gross_annual_income,hra_claimed\n500000,-5\n");

        assert_eq!(rows[0].profile.hra_claimed, dec!(-5));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_from_file(Path::new("no/such/profiles.csv"));

        assert!(matches!(result, Err(ProfileCsvError::Io { .. })));
    }
}
