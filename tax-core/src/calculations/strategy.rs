//! Year-long tax strategy derived from a computed report.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::format_percent;
use crate::calculations::recommendations::marginal_rate;
use crate::models::{
    AgeCategory, OptimizationPotential, PersonalizedAdvice, ProfileAnalysis, StrategyProfile,
    TaxLiabilityReport, TaxStrategy, TimelinePhase,
};

const HIGH_POTENTIAL_INCOME: Decimal = dec!(800000);
const NPS_INCOME_THRESHOLD: Decimal = dec!(1000000);

/// Wraps `report` with profile analysis, advice, a quarterly timeline and a
/// compliance checklist.
pub fn build_strategy(
    personal: &StrategyProfile,
    report: TaxLiabilityReport,
) -> TaxStrategy {
    let gross_income = report.old_regime.gross_income;
    TaxStrategy {
        profile_analysis: analyse_profile(personal, gross_income),
        personalized_advice: personalized_advice(personal.age, gross_income),
        timeline: timeline(),
        compliance_checklist: compliance_checklist(),
        report,
    }
}

fn analyse_profile(
    personal: &StrategyProfile,
    gross_income: Decimal,
) -> ProfileAnalysis {
    let optimization_potential = if gross_income > HIGH_POTENTIAL_INCOME {
        OptimizationPotential::High
    } else {
        OptimizationPotential::Medium
    };
    ProfileAnalysis {
        age_category: AgeCategory::from_age(personal.age),
        tax_bracket: format_percent(marginal_rate(gross_income) * Decimal::ONE_HUNDRED),
        optimization_potential,
        risk_profile: personal.risk_appetite,
    }
}

fn advice(
    category: &str,
    suggestion: &str,
    allocation: &str,
    reasoning: &str,
) -> PersonalizedAdvice {
    PersonalizedAdvice {
        category: category.to_string(),
        suggestion: suggestion.to_string(),
        allocation: allocation.to_string(),
        reasoning: reasoning.to_string(),
    }
}

fn personalized_advice(
    age: u32,
    gross_income: Decimal,
) -> Vec<PersonalizedAdvice> {
    let mut items = vec![match AgeCategory::from_age(age) {
        AgeCategory::Young => advice(
            "Long-term Wealth Creation",
            "Focus on equity-oriented 80C investments like ELSS",
            "70% ELSS, 30% PPF",
            "Young age allows for higher risk tolerance",
        ),
        AgeCategory::MiddleAged => advice(
            "Balanced Approach",
            "Mix of equity and debt for 80C investments",
            "50% ELSS, 50% PPF/NSC",
            "Balanced approach for growing responsibilities",
        ),
        AgeCategory::Senior => advice(
            "Conservative Strategy",
            "Focus on safe 80C investments",
            "30% ELSS, 70% PPF/NSC",
            "Capital preservation becomes important",
        ),
    }];

    if gross_income > NPS_INCOME_THRESHOLD {
        items.push(advice(
            "Advanced Tax Planning",
            "Consider NPS for additional deduction under 80CCD(1B)",
            "₹50,000 annually in NPS",
            "High income bracket benefits from additional deductions",
        ));
    }

    items
}

fn phase(
    period: &str,
    tasks: &[&str],
) -> TimelinePhase {
    TimelinePhase {
        period: period.to_string(),
        tasks: tasks.iter().map(|t| (*t).to_string()).collect(),
    }
}

fn timeline() -> Vec<TimelinePhase> {
    vec![
        phase(
            "April-June",
            &[
                "Plan annual investment strategy",
                "Set up SIPs for ELSS funds",
                "Review previous year's tax filing",
            ],
        ),
        phase(
            "July-September",
            &[
                "Track mid-year investment progress",
                "Review salary structure for tax optimization",
                "Plan any major purchases",
            ],
        ),
        phase(
            "October-December",
            &[
                "Accelerate investments if behind target",
                "Plan year-end tax-saving purchases",
                "Review insurance needs",
            ],
        ),
        phase(
            "January-March",
            &[
                "Final investment push for 80C/80D",
                "Gather all tax documents",
                "File income tax return",
                "Pay advance tax if applicable",
            ],
        ),
    ]
}

fn compliance_checklist() -> Vec<String> {
    [
        "Maintain all investment receipts and certificates (80C, 80D)",
        "Keep TDS certificates from salary and other sources",
        "Save rent receipts and HRA calculation documents",
        "Document home loan interest certificates",
        "Keep bank statements for all financial transactions",
        "File ITR before due date (July 31st for individuals)",
        "Pay advance tax if total liability exceeds ₹10,000",
        "Link PAN with Aadhaar",
        "Update bank accounts with PAN details",
        "Maintain Form 16 from employer",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
