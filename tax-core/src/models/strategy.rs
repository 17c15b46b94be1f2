use std::fmt;

use serde::{Deserialize, Serialize};

use super::{RiskAppetite, TaxLiabilityReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeCategory {
    /// Under 35.
    Young,
    /// 35 to 49.
    MiddleAged,
    /// 50 and above.
    Senior,
}

impl AgeCategory {
    pub fn from_age(age: u32) -> Self {
        match age {
            0..35 => Self::Young,
            35..50 => Self::MiddleAged,
            _ => Self::Senior,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Young => "young",
            Self::MiddleAged => "middle_aged",
            Self::Senior => "senior",
        }
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationPotential {
    High,
    Medium,
}

impl fmt::Display for OptimizationPotential {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            Self::High => "high",
            Self::Medium => "medium",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileAnalysis {
    pub age_category: AgeCategory,
    /// Marginal bracket label such as `20%`.
    pub tax_bracket: String,
    pub optimization_potential: OptimizationPotential,
    pub risk_profile: RiskAppetite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalizedAdvice {
    pub category: String,
    pub suggestion: String,
    pub allocation: String,
    pub reasoning: String,
}

/// Tasks for one quarter of the financial year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePhase {
    pub period: String,
    pub tasks: Vec<String>,
}

/// Year-long plan built around a computed report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxStrategy {
    pub profile_analysis: ProfileAnalysis,
    pub report: TaxLiabilityReport,
    pub personalized_advice: Vec<PersonalizedAdvice>,
    pub timeline: Vec<TimelinePhase>,
    pub compliance_checklist: Vec<String>,
}
