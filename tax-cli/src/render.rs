//! Text and JSON rendering of reports for the terminal.

use std::fmt::Write;

use clap::ValueEnum;
use serde::Serialize;
use tabled::{Table, builder::Builder, settings::Style};
use tax_core::advice::{AdviceOutcome, AdvisedReport};
use tax_core::calculations::common::{format_percent, format_rupees};
use tax_core::{DeductionSection, Regime, RegimeResult, TaxLiabilityReport, TaxStrategy};

use crate::batch::{BatchEntry, BatchOutcome};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// JSON shape of the `strategy` command.
#[derive(Debug, Serialize)]
pub struct AdvisedStrategy<'a> {
    #[serde(flatten)]
    pub strategy: &'a TaxStrategy,
    pub advice: &'a AdviceOutcome,
}

pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

fn table(builder: Builder) -> String {
    let mut table = Table::from(builder);
    table.with(Style::rounded());
    table.to_string()
}

fn heading(
    out: &mut String,
    title: &str,
) {
    let _ = writeln!(out, "\n{title}\n{}", "-".repeat(title.chars().count()));
}

fn comparison_table(report: &TaxLiabilityReport) -> String {
    let old = &report.old_regime;
    let new = &report.new_regime;
    let mut builder = Builder::default();
    builder.push_record(["", Regime::Old.label(), Regime::New.label()]);

    let rows: [(&str, fn(&RegimeResult) -> String); 7] = [
        ("Gross income", |r| format_rupees(r.gross_income)),
        ("Total deductions", |r| format_rupees(r.total_deductions)),
        ("Taxable income", |r| format_rupees(r.taxable_income)),
        ("Tax before cess", |r| format_rupees(r.tax_before_cess)),
        ("Cess", |r| format_rupees(r.cess)),
        ("Total tax", |r| format_rupees(r.total_tax)),
        ("Effective rate", |r| format_percent(r.effective_rate_percent)),
    ];
    for (label, cell) in rows {
        builder.push_record([label.to_string(), cell(old), cell(new)]);
    }
    table(builder)
}

fn deductions_table(report: &TaxLiabilityReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Section", Regime::Old.label(), Regime::New.label()]);
    for section in DeductionSection::ALL {
        let old = report.old_regime.deductions_by_section.get(&section);
        let new = report.new_regime.deductions_by_section.get(&section);
        if old.is_none() && new.is_none() {
            continue;
        }
        let cell = |amount: Option<&rust_decimal::Decimal>| {
            amount.map_or_else(|| "-".to_string(), |a| format_rupees(*a))
        };
        builder.push_record([section.code().to_string(), cell(old), cell(new)]);
    }
    table(builder)
}

fn slab_table(result: &RegimeResult) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Slab", "Rate", "Taxable amount", "Tax"]);
    for entry in &result.slab_breakdown {
        builder.push_record([
            entry.range_label.clone(),
            format_percent(entry.rate_percent),
            format_rupees(entry.taxable_amount),
            format_rupees(entry.tax),
        ]);
    }
    table(builder)
}

fn recommendations_section(
    out: &mut String,
    report: &TaxLiabilityReport,
) {
    let recs = &report.recommendations;

    if !recs.investment_suggestions.is_empty() {
        heading(out, "Investment suggestions");
        let mut builder = Builder::default();
        builder.push_record(["Instrument", "Section", "Amount", "Tax saving", "Lock-in", "Risk"]);
        for s in &recs.investment_suggestions {
            builder.push_record([
                s.instrument.label().to_string(),
                s.section.code().to_string(),
                format_rupees(s.suggested_amount),
                format_rupees(s.estimated_tax_saving),
                s.lock_in.clone(),
                s.risk_level.clone(),
            ]);
        }
        let _ = writeln!(out, "{}", table(builder));
        let _ = writeln!(
            out,
            "Total potential savings: {}",
            format_rupees(recs.total_potential_savings)
        );
    }

    if !recs.action_items.is_empty() {
        heading(out, "Action items");
        let mut builder = Builder::default();
        builder.push_record(["Priority", "Action", "Timeline", "Impact", "Deadline"]);
        for item in &recs.action_items {
            builder.push_record([
                item.priority.to_string(),
                item.action.clone(),
                item.timeline.clone(),
                item.impact.clone(),
                item.deadline.clone(),
            ]);
        }
        let _ = writeln!(out, "{}", table(builder));
    }

    if !recs.planning_tips.is_empty() {
        heading(out, "Planning tips");
        for tip in &recs.planning_tips {
            let _ = writeln!(out, "  - {tip}");
        }
    }
}

fn advice_section(
    out: &mut String,
    advice: &AdviceOutcome,
) {
    match advice {
        AdviceOutcome::NotRequested => {}
        AdviceOutcome::Generated { narrative } => {
            heading(out, "Advisor notes");
            let _ = writeln!(out, "{narrative}");
        }
        AdviceOutcome::Unavailable { reason } => {
            heading(out, "Advisor notes");
            let _ = writeln!(out, "(advice unavailable: {reason})");
        }
    }
}

fn report_body(
    out: &mut String,
    report: &TaxLiabilityReport,
) {
    let comparison = &report.comparison;
    let _ = writeln!(out, "Tax liability for assessment year {}", report.assessment_year);

    heading(out, "Regime comparison");
    let _ = writeln!(out, "{}", comparison_table(report));
    let _ = writeln!(
        out,
        "Recommended: {} (saves {}, {})",
        comparison.optimal_regime,
        format_rupees(comparison.tax_savings),
        format_percent(comparison.savings_percent)
    );
    let _ = writeln!(out, "{}", comparison.reason);

    heading(out, "Deductions");
    let _ = writeln!(out, "{}", deductions_table(report));

    for result in [&report.old_regime, &report.new_regime] {
        heading(out, &format!("{} slabs", result.regime));
        let _ = writeln!(out, "{}", slab_table(result));
    }

    recommendations_section(out, report);
}

pub fn render_report(advised: &AdvisedReport) -> String {
    let mut out = String::new();
    report_body(&mut out, &advised.report);
    advice_section(&mut out, &advised.advice);
    out
}

pub fn render_strategy(
    strategy: &TaxStrategy,
    advice: &AdviceOutcome,
) -> String {
    let mut out = String::new();
    let analysis = &strategy.profile_analysis;

    let _ = writeln!(out, "Tax strategy");
    let mut builder = Builder::default();
    builder.push_record(["Age category", "Tax bracket", "Optimization potential", "Risk profile"]);
    builder.push_record([
        analysis.age_category.to_string(),
        analysis.tax_bracket.clone(),
        analysis.optimization_potential.to_string(),
        analysis.risk_profile.to_string(),
    ]);
    let _ = writeln!(out, "{}", table(builder));

    if !strategy.personalized_advice.is_empty() {
        heading(&mut out, "Personalized advice");
        let mut builder = Builder::default();
        builder.push_record(["Category", "Suggestion", "Allocation", "Reasoning"]);
        for advice in &strategy.personalized_advice {
            builder.push_record([
                advice.category.clone(),
                advice.suggestion.clone(),
                advice.allocation.clone(),
                advice.reasoning.clone(),
            ]);
        }
        let _ = writeln!(out, "{}", table(builder));
    }

    heading(&mut out, "Timeline");
    for phase in &strategy.timeline {
        let _ = writeln!(out, "{}", phase.period);
        for task in &phase.tasks {
            let _ = writeln!(out, "  - {task}");
        }
    }

    heading(&mut out, "Compliance checklist");
    for item in &strategy.compliance_checklist {
        let _ = writeln!(out, "  [ ] {item}");
    }

    let _ = writeln!(out);
    report_body(&mut out, &strategy.report);
    advice_section(&mut out, advice);
    out
}

pub fn render_batch(entries: &[BatchEntry]) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        "Row",
        "Label",
        "Old regime",
        "New regime",
        "Recommended",
        "Savings",
        "Status",
    ]);
    for entry in entries {
        let label = entry.label.clone().unwrap_or_default();
        match &entry.outcome {
            BatchOutcome::Computed { report } => builder.push_record([
                entry.row.to_string(),
                label,
                format_rupees(report.old_regime.total_tax),
                format_rupees(report.new_regime.total_tax),
                report.comparison.optimal_regime.to_string(),
                format_rupees(report.comparison.tax_savings),
                "ok".to_string(),
            ]),
            BatchOutcome::Rejected { error } => builder.push_record([
                entry.row.to_string(),
                label,
                "-".to_string(),
                "-".to_string(),
                "-".to_string(),
                "-".to_string(),
                error.clone(),
            ]),
        }
    }
    table(builder)
}
