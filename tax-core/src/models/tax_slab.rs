use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::format_rupees;

/// A contiguous income range taxed at a fixed marginal rate.
///
/// `upper_bound` of `None` marks the open-ended top slab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub rate_percent: Decimal,
}

impl TaxSlab {
    pub fn new(
        lower_bound: Decimal,
        upper_bound: Option<Decimal>,
        rate_percent: Decimal,
    ) -> Self {
        Self {
            lower_bound,
            upper_bound,
            rate_percent,
        }
    }

    /// Display label such as `₹250,000 - ₹500,000` or `₹1,000,000 - Above`.
    pub fn range_label(&self) -> String {
        match self.upper_bound {
            Some(upper) => format!(
                "{} - {}",
                format_rupees(self.lower_bound),
                format_rupees(upper)
            ),
            None => format!("{} - Above", format_rupees(self.lower_bound)),
        }
    }
}
