//! Rule-based investment suggestions, action items and planning tips.
//!
//! Each output list is produced by an ordered chain of pure rules. A rule
//! looks at a [`RuleContext`] and yields zero or one item (planning tips may
//! yield several); the chain order is the output order.
//!
//! | Chain       | Rules, in order |
//! |-------------|-----------------|
//! | Suggestions | ELSS (old regime, ≤ ₹50,000), PPF (old regime, ≤ ₹1,00,000 of what is left), health insurance (always) |
//! | Actions     | Finish 80C (High, room left), health cover (Medium, always), NPS (Medium, income > ₹10,00,000) |
//! | Tips        | Regime tips, NPS tip (income > ₹10,00,000), advance tax (income > ₹5,00,000) |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::{format_rupees, non_negative};
use crate::models::{
    ActionItem, DeductionSection, FinancialProfile, Instrument, InvestmentSuggestion, Priority,
    RecommendationSet, Regime, RegimeConfig, RegimeConfigError,
};

const ELSS_LIMIT: Decimal = dec!(50000);
const PPF_LIMIT: Decimal = dec!(100000);
const HEALTH_INSURANCE_SUGGESTION: Decimal = dec!(25000);
const NPS_INCOME_THRESHOLD: Decimal = dec!(1000000);
const ADVANCE_TAX_INCOME_THRESHOLD: Decimal = dec!(500000);

/// Marginal bracket used to estimate what an extra rupee of deduction saves.
///
/// A step function of gross income: 30% above ₹10,00,000, 20% above
/// ₹5,00,000, otherwise 5%. Returned as a fraction.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::marginal_rate;
///
/// assert_eq!(marginal_rate(dec!(500000)), dec!(0.05));
/// assert_eq!(marginal_rate(dec!(800000)), dec!(0.20));
/// assert_eq!(marginal_rate(dec!(1000001)), dec!(0.30));
/// ```
pub fn marginal_rate(gross_income: Decimal) -> Decimal {
    if gross_income > dec!(1000000) {
        dec!(0.30)
    } else if gross_income > dec!(500000) {
        dec!(0.20)
    } else {
        dec!(0.05)
    }
}

/// Inputs shared by every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleContext {
    pub gross_income: Decimal,
    pub existing_80c: Decimal,
    /// Unused 80C room: `max(0, cap − existing)`.
    pub remaining_80c: Decimal,
    pub marginal_rate: Decimal,
    pub optimal_regime: Regime,
    /// Closing date of the financial year the assessment year refers to.
    pub financial_year_end: String,
}

impl RuleContext {
    /// # Errors
    ///
    /// Returns [`RegimeConfigError::MissingSectionCap`] if the old-regime table
    /// has no 80C cap.
    pub fn new(
        profile: &FinancialProfile,
        old_regime: &RegimeConfig,
        optimal_regime: Regime,
        assessment_year: &str,
    ) -> Result<Self, RegimeConfigError> {
        let cap_80c = old_regime.required_cap(DeductionSection::Section80C)?;
        Ok(Self {
            gross_income: profile.gross_annual_income,
            existing_80c: profile.section_80c_contribution,
            remaining_80c: non_negative(cap_80c - profile.section_80c_contribution),
            marginal_rate: marginal_rate(profile.gross_annual_income),
            optimal_regime,
            financial_year_end: financial_year_end(assessment_year),
        })
    }

    fn saving_on(
        &self,
        amount: Decimal,
    ) -> Decimal {
        amount * self.marginal_rate
    }
}

/// `2024-25` closes the financial year ending March 31, 2024.
fn financial_year_end(assessment_year: &str) -> String {
    match assessment_year
        .get(..4)
        .and_then(|year| year.parse::<u32>().ok())
    {
        Some(year) => format!("March 31, {year}"),
        None => "March 31st".to_string(),
    }
}

type SuggestionRule = fn(&RuleContext) -> Option<InvestmentSuggestion>;
type ActionRule = fn(&RuleContext) -> Option<ActionItem>;
type TipRule = fn(&RuleContext) -> Vec<String>;

const SUGGESTION_RULES: [SuggestionRule; 3] = [elss_rule, ppf_rule, health_insurance_rule];
const ACTION_RULES: [ActionRule; 3] = [complete_80c_action, health_cover_action, nps_action];
const TIP_RULES: [TipRule; 3] = [regime_tips, nps_tip, advance_tax_tip];

/// Runs all three rule chains.
pub fn generate_recommendations(context: &RuleContext) -> RecommendationSet {
    let investment_suggestions: Vec<InvestmentSuggestion> = SUGGESTION_RULES
        .iter()
        .filter_map(|rule| rule(context))
        .collect();
    let total_potential_savings = investment_suggestions
        .iter()
        .map(|s| s.estimated_tax_saving)
        .sum();
    let action_items = ACTION_RULES.iter().filter_map(|rule| rule(context)).collect();
    let planning_tips = TIP_RULES.iter().flat_map(|rule| rule(context)).collect();

    RecommendationSet {
        investment_suggestions,
        total_potential_savings,
        action_items,
        planning_tips,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

// ─── suggestion rules ────────────────────────────────────────────────────────

fn elss_amount(context: &RuleContext) -> Decimal {
    context.remaining_80c.min(ELSS_LIMIT)
}

fn elss_rule(context: &RuleContext) -> Option<InvestmentSuggestion> {
    if context.optimal_regime != Regime::Old {
        return None;
    }
    let amount = elss_amount(context);
    if amount <= Decimal::ZERO {
        return None;
    }
    Some(InvestmentSuggestion {
        instrument: Instrument::Elss,
        section: DeductionSection::Section80C,
        suggested_amount: amount,
        estimated_tax_saving: context.saving_on(amount),
        benefits: strings(&["Tax saving", "Equity returns potential", "3-year lock-in period"]),
        risk_level: "Medium to High".to_string(),
        lock_in: "3 years".to_string(),
        returns_potential: "12-15% annually".to_string(),
        description: "Best for long-term wealth creation with tax benefits".to_string(),
    })
}

fn ppf_rule(context: &RuleContext) -> Option<InvestmentSuggestion> {
    if context.optimal_regime != Regime::Old {
        return None;
    }
    let amount = (context.remaining_80c - elss_amount(context)).min(PPF_LIMIT);
    if amount <= Decimal::ZERO {
        return None;
    }
    Some(InvestmentSuggestion {
        instrument: Instrument::Ppf,
        section: DeductionSection::Section80C,
        suggested_amount: amount,
        estimated_tax_saving: context.saving_on(amount),
        benefits: strings(&["Tax saving", "EEE benefit", "Guaranteed returns"]),
        risk_level: "Low".to_string(),
        lock_in: "15 years".to_string(),
        returns_potential: "7-8% annually".to_string(),
        description: "Safe long-term investment with triple tax benefit".to_string(),
    })
}

fn health_insurance_rule(context: &RuleContext) -> Option<InvestmentSuggestion> {
    Some(InvestmentSuggestion {
        instrument: Instrument::HealthInsurance,
        section: DeductionSection::Section80D,
        suggested_amount: HEALTH_INSURANCE_SUGGESTION,
        estimated_tax_saving: context.saving_on(HEALTH_INSURANCE_SUGGESTION),
        benefits: strings(&["Tax saving", "Health coverage", "Family protection"]),
        risk_level: "None".to_string(),
        lock_in: "Annual".to_string(),
        returns_potential: "Health coverage + tax savings".to_string(),
        description: "Essential health protection with tax benefits".to_string(),
    })
}

// ─── action rules ────────────────────────────────────────────────────────────

fn complete_80c_action(context: &RuleContext) -> Option<ActionItem> {
    if context.remaining_80c <= Decimal::ZERO {
        return None;
    }
    Some(ActionItem {
        priority: Priority::High,
        action: format!(
            "Invest remaining {} in 80C instruments",
            format_rupees(context.remaining_80c)
        ),
        timeline: "Before March 31st".to_string(),
        impact: format!(
            "Save up to {} in taxes",
            format_rupees(context.saving_on(context.remaining_80c))
        ),
        options: strings(&["ELSS Mutual Funds", "PPF", "NSC", "Tax-saving FD"]),
        deadline: context.financial_year_end.clone(),
    })
}

fn health_cover_action(context: &RuleContext) -> Option<ActionItem> {
    Some(ActionItem {
        priority: Priority::Medium,
        action: "Review and optimize health insurance coverage".to_string(),
        timeline: "Any time during the year".to_string(),
        impact: format!(
            "Save {} in taxes + comprehensive health coverage",
            format_rupees(context.saving_on(HEALTH_INSURANCE_SUGGESTION))
        ),
        options: strings(&["Individual policy", "Family floater", "Top-up plans"]),
        deadline: "Before policy renewal".to_string(),
    })
}

fn nps_action(context: &RuleContext) -> Option<ActionItem> {
    if context.gross_income <= NPS_INCOME_THRESHOLD {
        return None;
    }
    Some(ActionItem {
        priority: Priority::Medium,
        action: "Consider National Pension System (NPS)".to_string(),
        timeline: "Any time during the year".to_string(),
        impact: "Additional ₹50,000 deduction under 80CCD(1B)".to_string(),
        options: strings(&["Tier-1 NPS account"]),
        deadline: "Before March 31st".to_string(),
    })
}

// ─── tip rules ───────────────────────────────────────────────────────────────

fn regime_tips(context: &RuleContext) -> Vec<String> {
    match context.optimal_regime {
        Regime::Old => strings(&[
            "Maximize 80C investments before March 31st",
            "Consider health insurance for 80D benefits",
            "Plan HRA if you pay rent",
        ]),
        Regime::New => strings(&[
            "Focus on wealth creation without tax constraints",
            "Consider equity investments for long-term growth",
            "No rush for tax-saving investments",
        ]),
    }
}

fn nps_tip(context: &RuleContext) -> Vec<String> {
    if context.gross_income > NPS_INCOME_THRESHOLD {
        strings(&["Consider NPS for additional 50K deduction under 80CCD(1B)"])
    } else {
        Vec::new()
    }
}

fn advance_tax_tip(context: &RuleContext) -> Vec<String> {
    if context.gross_income > ADVANCE_TAX_INCOME_THRESHOLD {
        strings(&["Plan advance tax payments to avoid penalties"])
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::AssessmentYearConfig;

    fn context(
        gross_income: Decimal,
        existing_80c: Decimal,
        optimal_regime: Regime,
    ) -> RuleContext {
        let config = AssessmentYearConfig::ay_2024_25();
        let profile = FinancialProfile {
            gross_annual_income: gross_income,
            section_80c_contribution: existing_80c,
            ..FinancialProfile::default()
        };
        RuleContext::new(&profile, &config.old_regime, optimal_regime, "2024-25").unwrap()
    }

    // =========================================================================
    // marginal_rate / context tests
    // =========================================================================

    #[test]
    fn marginal_rate_boundaries_are_exclusive() {
        assert_eq!(marginal_rate(dec!(0)), dec!(0.05));
        assert_eq!(marginal_rate(dec!(500001)), dec!(0.20));
        assert_eq!(marginal_rate(dec!(1000000)), dec!(0.20));
    }

    #[test]
    fn context_remaining_80c_floors_at_zero() {
        let ctx = context(dec!(2000000), dec!(200000), Regime::New);

        assert_eq!(ctx.remaining_80c, dec!(0));
        assert_eq!(ctx.marginal_rate, dec!(0.30));
    }

    #[test]
    fn context_requires_80c_cap() {
        let mut config = AssessmentYearConfig::ay_2024_25();
        config
            .old_regime
            .section_caps
            .remove(&DeductionSection::Section80C);

        let result = RuleContext::new(
            &FinancialProfile::default(),
            &config.old_regime,
            Regime::Old,
            "2024-25",
        );

        assert_eq!(
            result,
            Err(RegimeConfigError::MissingSectionCap {
                regime: Regime::Old,
                section: DeductionSection::Section80C,
            })
        );
    }

    #[test]
    fn financial_year_end_from_assessment_year() {
        assert_eq!(financial_year_end("2024-25"), "March 31, 2024");
        assert_eq!(financial_year_end("AY"), "March 31st");
    }

    // =========================================================================
    // suggestion rules
    // =========================================================================

    #[test]
    fn elss_takes_first_50k_of_remaining_room() {
        let ctx = context(dec!(800000), dec!(50000), Regime::Old);

        let suggestion = elss_rule(&ctx).unwrap();

        assert_eq!(suggestion.suggested_amount, dec!(50000));
        assert_eq!(suggestion.estimated_tax_saving, dec!(10000));
    }

    #[test]
    fn elss_takes_all_room_when_small() {
        let ctx = context(dec!(800000), dec!(130000), Regime::Old);

        assert_eq!(elss_rule(&ctx).unwrap().suggested_amount, dec!(20000));
        assert_eq!(ppf_rule(&ctx), None);
    }

    #[test]
    fn ppf_absorbs_what_elss_leaves_up_to_limit() {
        let ctx = context(dec!(400000), dec!(0), Regime::Old);

        let suggestion = ppf_rule(&ctx).unwrap();

        assert_eq!(suggestion.suggested_amount, dec!(100000));
        assert_eq!(suggestion.estimated_tax_saving, dec!(5000));
    }

    #[test]
    fn no_80c_suggestions_under_new_regime() {
        let ctx = context(dec!(800000), dec!(0), Regime::New);

        assert_eq!(elss_rule(&ctx), None);
        assert_eq!(ppf_rule(&ctx), None);
        assert!(health_insurance_rule(&ctx).is_some());
    }

    // =========================================================================
    // action and tip rules
    // =========================================================================

    #[test]
    fn complete_80c_action_text() {
        let ctx = context(dec!(800000), dec!(50000), Regime::Old);

        let item = complete_80c_action(&ctx).unwrap();

        assert_eq!(item.priority, Priority::High);
        assert_eq!(item.action, "Invest remaining ₹100,000 in 80C instruments");
        assert_eq!(item.impact, "Save up to ₹20,000 in taxes");
        assert_eq!(item.deadline, "March 31, 2024");
    }

    #[test]
    fn nps_action_only_above_ten_lakh() {
        assert_eq!(nps_action(&context(dec!(1000000), dec!(0), Regime::Old)), None);
        assert!(nps_action(&context(dec!(1000001), dec!(0), Regime::Old)).is_some());
    }

    #[test]
    fn nps_action_can_start_any_time() {
        let item = nps_action(&context(dec!(1500000), dec!(0), Regime::New)).unwrap();

        assert_eq!(item.priority, Priority::Medium);
        assert_eq!(item.timeline, "Any time during the year");
        assert_eq!(item.deadline, "Before March 31st");
    }

    #[test]
    fn tips_for_low_income_old_regime() {
        let ctx = context(dec!(400000), dec!(0), Regime::Old);

        let set = generate_recommendations(&ctx);

        assert_eq!(
            set.planning_tips,
            vec![
                "Maximize 80C investments before March 31st".to_string(),
                "Consider health insurance for 80D benefits".to_string(),
                "Plan HRA if you pay rent".to_string(),
            ]
        );
    }

    #[test]
    fn tips_for_high_income_new_regime() {
        let ctx = context(dec!(2000000), dec!(200000), Regime::New);

        let set = generate_recommendations(&ctx);

        assert_eq!(
            set.planning_tips,
            vec![
                "Focus on wealth creation without tax constraints".to_string(),
                "Consider equity investments for long-term growth".to_string(),
                "No rush for tax-saving investments".to_string(),
                "Consider NPS for additional 50K deduction under 80CCD(1B)".to_string(),
                "Plan advance tax payments to avoid penalties".to_string(),
            ]
        );
    }

    // =========================================================================
    // generate_recommendations
    // =========================================================================

    #[test]
    fn mid_income_old_regime_full_set() {
        let ctx = context(dec!(800000), dec!(50000), Regime::Old);

        let set = generate_recommendations(&ctx);

        let instruments: Vec<Instrument> = set
            .investment_suggestions
            .iter()
            .map(|s| s.instrument)
            .collect();
        assert_eq!(
            instruments,
            vec![Instrument::Elss, Instrument::Ppf, Instrument::HealthInsurance]
        );
        assert_eq!(set.investment_suggestions[1].suggested_amount, dec!(50000));
        assert_eq!(set.investment_suggestions[2].estimated_tax_saving, dec!(5000));
        assert_eq!(set.total_potential_savings, dec!(25000));

        let priorities: Vec<Priority> = set.action_items.iter().map(|a| a.priority).collect();
        assert_eq!(priorities, vec![Priority::High, Priority::Medium]);
    }

    #[test]
    fn high_income_new_regime_set() {
        let ctx = context(dec!(2000000), dec!(200000), Regime::New);

        let set = generate_recommendations(&ctx);

        assert_eq!(set.investment_suggestions.len(), 1);
        assert_eq!(set.total_potential_savings, dec!(7500));
        let actions: Vec<&str> = set.action_items.iter().map(|a| a.action.as_str()).collect();
        assert_eq!(
            actions,
            vec![
                "Review and optimize health insurance coverage",
                "Consider National Pension System (NPS)",
            ]
        );
    }
}
