//! Loading rule tables from disk: slab schedules from CSV and deduction or
//! cess overrides from TOML.

pub mod loader;
pub mod rules;

pub use loader::{SlabTableLoader, SlabTableLoaderError, SlabTableRecord};
pub use rules::{RegimeOverrides, RulesFileError, TaxRulesFile};
