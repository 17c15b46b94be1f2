pub mod advice;
pub mod calculations;
pub mod engine;
pub mod models;

pub use engine::{TaxLiabilityEngine, TaxLiabilityError, compute_tax_liability};
pub use models::*;
