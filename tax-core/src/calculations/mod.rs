//! Tax liability calculations for Indian income tax.
//!
//! Each module covers one stage of the pipeline, from deduction stacking
//! through slab tax and cess to the regime comparison and the rule-based
//! recommendations built on top of it.

pub mod cess;
pub mod common;
pub mod comparison;
pub mod deductions;
pub mod recommendations;
pub mod regime;
pub mod slabs;
pub mod strategy;

pub use cess::{CessApplied, apply_cess};
pub use comparison::compare_regimes;
pub use deductions::{DeductionCalculator, DeductionSummary};
pub use recommendations::{RuleContext, generate_recommendations, marginal_rate};
pub use regime::RegimeCalculator;
pub use slabs::{SlabEvaluator, SlabTax};
pub use strategy::build_strategy;
