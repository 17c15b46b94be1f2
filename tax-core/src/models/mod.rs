mod financial_profile;
mod recommendation;
mod regime;
mod regime_config;
mod regime_result;
mod report;
mod strategy;
mod tax_slab;

pub use financial_profile::{
    FinancialProfile, MAX_AMOUNT, ProfileError, RiskAppetite, StrategyProfile,
};
pub use recommendation::{ActionItem, Instrument, InvestmentSuggestion, Priority, RecommendationSet};
pub use regime::{DeductionSection, Regime};
pub use regime_config::{AssessmentYearConfig, RegimeConfig, RegimeConfigError};
pub use regime_result::{ComparisonResult, RegimeResult, SlabBreakdownEntry};
pub use report::TaxLiabilityReport;
pub use strategy::{
    AgeCategory, OptimizationPotential, PersonalizedAdvice, ProfileAnalysis, TaxStrategy,
    TimelinePhase,
};
pub use tax_slab::TaxSlab;
