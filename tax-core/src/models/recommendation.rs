use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DeductionSection;

/// Tax-saving product a suggestion points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
    /// Equity-linked savings scheme.
    Elss,
    /// Public provident fund.
    Ppf,
    HealthInsurance,
}

impl Instrument {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Elss => "ELSS Mutual Funds",
            Self::Ppf => "Public Provident Fund (PPF)",
            Self::HealthInsurance => "Health Insurance Premium",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentSuggestion {
    pub instrument: Instrument,
    pub section: DeductionSection,
    pub suggested_amount: Decimal,
    /// Suggested amount times the marginal bracket.
    pub estimated_tax_saving: Decimal,
    pub benefits: Vec<String>,
    pub risk_level: String,
    pub lock_in: String,
    pub returns_potential: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub priority: Priority,
    pub action: String,
    pub timeline: String,
    pub impact: String,
    pub options: Vec<String>,
    pub deadline: String,
}

/// Everything the rule chains produce for one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub investment_suggestions: Vec<InvestmentSuggestion>,
    /// Sum of `estimated_tax_saving` across suggestions.
    pub total_potential_savings: Decimal,
    pub action_items: Vec<ActionItem>,
    pub planning_tips: Vec<String>,
}
