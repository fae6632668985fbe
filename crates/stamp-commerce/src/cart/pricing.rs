//! Order summary shown beside the cart.

use crate::config::PricingRules;
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Subtotal, shipping, tax and total for display.
///
/// Display only: the hosted checkout computes the charged amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    pub item_count: i64,
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
    /// Additional spend needed for free shipping; zero once reached.
    pub remaining_for_free_shipping: Money,
}

impl OrderSummary {
    pub fn compute(
        subtotal: Money,
        item_count: i64,
        rules: &PricingRules,
    ) -> Result<Self, CommerceError> {
        let shipping = rules.shipping_for(subtotal);
        let tax = rules.tax_for(subtotal);
        let total = subtotal
            .try_add(&shipping)
            .and_then(|t| t.try_add(&tax))
            .ok_or(CommerceError::Overflow)?;
        let remaining = rules
            .free_shipping_threshold()
            .try_subtract(&subtotal)
            .ok_or(CommerceError::Overflow)?;
        let remaining_for_free_shipping = if remaining.is_positive() {
            remaining
        } else {
            Money::zero(subtotal.currency)
        };

        Ok(Self {
            item_count,
            subtotal,
            shipping,
            tax,
            total,
            remaining_for_free_shipping,
        })
    }

    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }

    /// Progress toward free shipping as a percentage (0–100).
    pub fn free_shipping_progress(&self, rules: &PricingRules) -> u8 {
        let threshold = rules.free_shipping_threshold_cents;
        if threshold <= 0 {
            return 100;
        }
        ((self.subtotal.amount_cents.max(0) * 100) / threshold).min(100) as u8
    }
}
