//! How a finished session is written into the cart.

use serde::{Deserialize, Serialize};

/// Cart line layout for a finished customization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartAssembly {
    /// One line; add-on prices are baked into its unit price.
    #[default]
    Bundled,
    /// The stamp at its size price, with the pad and priority processing
    /// as sibling lines. An add-on without a variant stays priced into the
    /// stamp line.
    SeparateAddOns,
}

impl CartAssembly {
    pub fn as_str(&self) -> &'static str {
        match self {
            CartAssembly::Bundled => "bundled",
            CartAssembly::SeparateAddOns => "separate_add_ons",
        }
    }
}
