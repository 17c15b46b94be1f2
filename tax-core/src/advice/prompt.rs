//! Prompt text sent to the advice backend.

use crate::calculations::common::format_rupees;
use crate::models::{FinancialProfile, TaxLiabilityReport};

use super::AdviceRequest;

/// Builds the system and user prompts for one computed report.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::advice::build_request;
/// use tax_core::{AssessmentYearConfig, FinancialProfile, compute_tax_liability};
///
/// let config = AssessmentYearConfig::ay_2024_25();
/// let profile = FinancialProfile::with_income(dec!(1200000));
/// let report = compute_tax_liability(&config, &profile).unwrap();
///
/// let request = build_request(&profile, &report);
///
/// assert!(request.system_prompt.contains("AY 2024-25"));
/// assert!(request.user_prompt.contains("- Annual Income: ₹1,200,000"));
/// ```
pub fn build_request(
    profile: &FinancialProfile,
    report: &TaxLiabilityReport,
) -> AdviceRequest {
    AdviceRequest {
        system_prompt: system_prompt(&report.assessment_year),
        user_prompt: user_prompt(profile, report),
    }
}

fn system_prompt(assessment_year: &str) -> String {
    format!(
        "You are a certified Indian tax consultant specializing in Income Tax Act for AY {assessment_year}.

EXPERTISE AREAS:
1. TAX REGIME COMPARISON (Old vs New)
2. SECTION-WISE DEDUCTIONS (80C, 80D, 24B, HRA)
3. TAX CALCULATIONS with correct slabs and cess
4. INVESTMENT RECOMMENDATIONS for tax optimization

RESPONSE FORMAT:
Always provide structured, actionable advice with:
- Specific amounts and calculations
- Section references (80C, 80D, etc.)
- Timeline for actions
- Risk-appropriate investment suggestions

Focus on practical, implementable tax-saving strategies for Indian taxpayers.
Be precise with numbers and provide clear reasoning for recommendations.
"
    )
}

fn user_prompt(
    profile: &FinancialProfile,
    report: &TaxLiabilityReport,
) -> String {
    let comparison = &report.comparison;
    let mut lines = vec![
        format!("INDIAN TAX ANALYSIS REQUEST (AY {}):", report.assessment_year),
        String::new(),
        "Financial Profile:".to_string(),
        format!("- Annual Income: {}", format_rupees(profile.gross_annual_income)),
        format!("- 80C Investments: {}", format_rupees(profile.section_80c_contribution)),
        format!("- Health Insurance: {}", format_rupees(profile.health_insurance_premium)),
        format!("- Home Loan Interest: {}", format_rupees(profile.home_loan_interest)),
        format!("- HRA Claimed: {}", format_rupees(profile.hra_claimed)),
        String::new(),
        "Computed Liability:".to_string(),
    ];
    for result in [&report.old_regime, &report.new_regime] {
        lines.push(format!(
            "- {}: taxable {}, total tax {} ({}% effective)",
            result.regime.label(),
            format_rupees(result.taxable_income),
            format_rupees(result.total_tax),
            result.effective_rate_percent.normalize(),
        ));
    }
    lines.push(format!(
        "- Recommended: {} (saves {})",
        comparison.optimal_regime.label(),
        format_rupees(comparison.tax_savings)
    ));
    lines.extend(
        [
            "",
            "Please provide:",
            "1. Old vs New regime recommendation with reasoning",
            "2. Additional investment suggestions to maximize tax savings",
            "3. Priority actions before March 31st",
            "4. Estimated tax savings potential",
            "",
            "Focus on practical, actionable advice for this income level.",
        ]
        .map(String::from),
    );

    lines.join("\n")
}
