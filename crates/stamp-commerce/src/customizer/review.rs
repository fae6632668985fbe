//! Price breakdown and review summary rows.

use crate::customizer::Step;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Components of the running customizer total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Selected size price, or the product price when there is no size axis.
    pub base: Money,
    pub stamp_pad: Money,
    pub priority: Money,
    pub total: Money,
}

/// One line of the review summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRow {
    pub label: &'static str,
    pub value: String,
    pub price: Money,
    /// Step the "Edit" link returns to.
    pub edit_step: Step,
}

pub(crate) const NO_SIZE: &str = "—";
pub(crate) const NO_DESIGN: &str = "No file uploaded";
pub(crate) const NO_PAD: &str = "None";
pub(crate) const PRIORITY_VALUE: &str = "Priority (24h)";
pub(crate) const STANDARD_VALUE: &str = "Standard (1-3 days)";

/// Row heading for a step that has a review row.
pub(crate) fn row_label(step: Step) -> Option<&'static str> {
    match step {
        Step::Size => Some("Stamp Size"),
        Step::Upload => Some("Your Design"),
        Step::Pad => Some("Stamp Pad"),
        Step::Color => Some("Ink Color"),
        Step::Priority => Some("Processing"),
        Step::Review => None,
    }
}
