//! Customizer steps and per-category step sequences.

use crate::catalog::ProductCategory;
use serde::{Deserialize, Serialize};

/// A configuration step of the customizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Choose a size variant.
    Size,
    /// Attach the design artwork.
    Upload,
    /// Optionally add a stamp pad.
    Pad,
    /// Choose the ink color.
    Color,
    /// Optionally add priority processing.
    Priority,
    /// Review selections and finish.
    Review,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Size => "size",
            Step::Upload => "upload",
            Step::Pad => "pad",
            Step::Color => "color",
            Step::Priority => "priority",
            Step::Review => "review",
        }
    }

    /// Heading shown for the step.
    pub fn label(&self) -> &'static str {
        match self {
            Step::Size => "Choose Size",
            Step::Upload => "Upload Logo",
            Step::Pad => "Add Stamp Pad",
            Step::Color => "Ink Color",
            Step::Priority => "Processing",
            Step::Review => "Review",
        }
    }

    /// Label used in the progress bar.
    pub fn short_label(&self) -> &'static str {
        match self {
            Step::Size => "Size",
            Step::Upload => "Logo",
            Step::Pad => "Pad",
            Step::Color => "Ink",
            Step::Priority => "Speed",
            Step::Review => "Review",
        }
    }
}

/// Full flow for products engraved from customer artwork.
const ARTWORK_FLOW: [Step; 6] = [
    Step::Size,
    Step::Upload,
    Step::Pad,
    Step::Color,
    Step::Priority,
    Step::Review,
];

/// Flow for stamp pads.
const PAD_FLOW: [Step; 3] = [Step::Size, Step::Color, Step::Review];

/// Flow for everything else.
const SIMPLE_FLOW: [Step; 2] = [Step::Size, Step::Review];

/// Ordered steps for a product, built once per session.
///
/// The Size step is dropped when the product has no sizes; Review is
/// always last.
pub fn steps_for(category: &ProductCategory, has_sizes: bool) -> Vec<Step> {
    let flow: &[Step] = if category.needs_artwork() {
        &ARTWORK_FLOW
    } else if *category == ProductCategory::StampPad {
        &PAD_FLOW
    } else {
        &SIMPLE_FLOW
    };

    flow.iter()
        .copied()
        .filter(|step| has_sizes || *step != Step::Size)
        .collect()
}
