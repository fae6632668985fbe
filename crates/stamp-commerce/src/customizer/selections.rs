//! Per-session builder selections.

use crate::catalog::{SizeOption, StampPadOption};
use crate::customizer::DesignFile;
use crate::money::Money;

/// A size chosen from the product's size list.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedSize {
    /// Position in the product's size list.
    pub index: usize,
    pub option: SizeOption,
}

/// Choices accumulated by one customizer session.
///
/// Owned by exactly one [`Customizer`](crate::customizer::Customizer) and
/// dropped with it.
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderSelections {
    pub size: Option<SelectedSize>,
    pub design: Option<DesignFile>,
    /// Preview reference for the attached design (data URL or path).
    pub design_preview: Option<String>,
    pub stamp_pad: Option<StampPadOption>,
    pub ink_color: String,
    pub priority: bool,
    pub priority_price: Money,
}

impl BuilderSelections {
    pub fn new(ink_color: impl Into<String>, priority_price: Money) -> Self {
        Self {
            size: None,
            design: None,
            design_preview: None,
            stamp_pad: None,
            ink_color: ink_color.into(),
            priority: false,
            priority_price,
        }
    }

    pub fn size_index(&self) -> Option<usize> {
        self.size.as_ref().map(|s| s.index)
    }

    pub fn size_label(&self) -> Option<&str> {
        self.size.as_ref().map(|s| s.option.label.as_str())
    }

    pub fn stamp_pad_name(&self) -> Option<&str> {
        self.stamp_pad.as_ref().map(|p| p.name.as_str())
    }

    /// Stamp pad price, zero when none is chosen.
    pub fn stamp_pad_price(&self) -> Money {
        self.stamp_pad
            .as_ref()
            .map(|p| p.price)
            .unwrap_or_else(|| Money::zero(self.priority_price.currency))
    }

    /// Priority surcharge, zero unless selected.
    pub fn priority_charge(&self) -> Money {
        if self.priority {
            self.priority_price
        } else {
            Money::zero(self.priority_price.currency)
        }
    }
}
