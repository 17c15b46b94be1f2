//! Batch run over the sample profile file.

use std::path::Path;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_cli::batch::{BatchOutcome, run_batch};
use tax_cli::profile_csv::load_from_file;
use tax_cli::render::{render_batch, to_json};
use tax_core::{AssessmentYearConfig, Regime, TaxLiabilityEngine};

fn sample() -> Vec<tax_cli::batch::BatchEntry> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data/profiles.csv");
    let rows = load_from_file(&path).expect("Failed to load profiles");
    let config = AssessmentYearConfig::ay_2024_25();
    run_batch(&TaxLiabilityEngine::new(&config), rows)
}

#[test]
fn test_sample_rows_are_reported_independently() {
    let entries = sample();

    assert_eq!(entries.len(), 5);
    let rows: Vec<usize> = entries.iter().map(|e| e.row).collect();
    assert_eq!(rows, vec![1, 2, 3, 4, 5]);

    let mid = entries[0].report().expect("row 1 computes");
    assert_eq!(mid.old_regime.total_tax, dec!(24440));
    assert_eq!(mid.comparison.optimal_regime, Regime::Old);

    let below = entries[2].report().expect("row 3 computes");
    assert_eq!(below.old_regime.total_tax, dec!(0));
    assert_eq!(below.new_regime.total_tax, dec!(0));

    assert!(matches!(entries[3].outcome, BatchOutcome::Rejected { .. }));
    assert!(matches!(entries[4].outcome, BatchOutcome::Rejected { .. }));
}

#[test]
fn test_sample_renders_as_table_and_json() {
    let entries = sample();

    let text = render_batch(&entries);
    assert!(text.contains("salaried-mid"));
    assert!(text.contains("₹24,440"));

    let json: serde_json::Value =
        serde_json::from_str(&to_json(&entries).expect("Failed to serialize")).unwrap();
    assert_eq!(json[0]["status"], "computed");
    assert_eq!(json[0]["report"]["old_regime"]["regime"], "old");
    assert_eq!(json[4]["status"], "rejected");
}
