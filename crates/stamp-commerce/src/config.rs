//! Client-visible pricing constants.

use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Shipping, tax and add-on fallback pricing applied on the client.
///
/// Loaded from the `[pricing]` table of the store configuration; every
/// field defaults to the storefront's published rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRules {
    /// Store currency; catalog prices in any other currency are refused.
    #[serde(default)]
    pub currency: Currency,

    /// Subtotal at or above which shipping is free.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold_cents: i64,

    /// Flat shipping fee below the threshold.
    #[serde(default = "default_flat_shipping")]
    pub flat_shipping_cents: i64,

    /// Flat tax rate as a percentage of the item subtotal.
    #[serde(default = "default_tax_percent")]
    pub tax_percent: f64,

    /// Priority processing surcharge used when the catalog has no
    /// priority-processing product.
    #[serde(default = "default_priority_fallback")]
    pub priority_fallback_cents: i64,
}

fn default_free_shipping_threshold() -> i64 {
    15_000
}

fn default_flat_shipping() -> i64 {
    599
}

fn default_tax_percent() -> f64 {
    8.0
}

fn default_priority_fallback() -> i64 {
    499
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            free_shipping_threshold_cents: default_free_shipping_threshold(),
            flat_shipping_cents: default_flat_shipping(),
            tax_percent: default_tax_percent(),
            priority_fallback_cents: default_priority_fallback(),
        }
    }
}

impl PricingRules {
    pub fn free_shipping_threshold(&self) -> Money {
        Money::new(self.free_shipping_threshold_cents, self.currency)
    }

    pub fn flat_shipping(&self) -> Money {
        Money::new(self.flat_shipping_cents, self.currency)
    }

    pub fn priority_fallback(&self) -> Money {
        Money::new(self.priority_fallback_cents, self.currency)
    }

    /// Shipping charged for an item subtotal: free at or above the
    /// threshold, otherwise the flat fee.
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal.amount_cents >= self.free_shipping_threshold_cents {
            Money::zero(self.currency)
        } else {
            self.flat_shipping()
        }
    }

    /// Tax on an item subtotal, rounded to the cent.
    pub fn tax_for(&self, subtotal: Money) -> Money {
        subtotal.percentage(self.tax_percent)
    }
}
