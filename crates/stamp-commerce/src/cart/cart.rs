//! Cart store and cart line types.

use crate::cart::OrderSummary;
use crate::config::PricingRules;
use crate::error::CommerceError;
use crate::ids::{LineItemId, ProductId, VariantId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line.
pub const MAX_QUANTITY_PER_LINE: i64 = 999;

/// The shopper's pending purchase lines.
///
/// Passed explicitly to whatever needs it; the methods below are its only
/// mutation surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Cart currency.
    pub currency: Currency,
    lines: Vec<CartLine>,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            lines: Vec::new(),
            updated_at: current_timestamp(),
        }
    }

    /// Restore a cart from its persisted JSON form.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the cart for persistence.
    pub fn to_json(&self) -> Result<String, CommerceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Append a line under a freshly generated id.
    ///
    /// Returns an error if the quantity is out of range or the price is in
    /// another currency.
    pub fn add(&mut self, mut line: CartLine) -> Result<LineItemId, CommerceError> {
        validate_quantity(line.quantity)?;
        if line.unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: line.unit_price.currency.code().to_string(),
            });
        }

        line.id = LineItemId::generate();
        let id = line.id.clone();
        tracing::debug!(line = %id, product = %line.product_id, quantity = line.quantity, "cart line added");
        self.lines.push(line);
        self.touch();
        Ok(id)
    }

    /// Merge fields into an existing line.
    pub fn update(&mut self, id: &LineItemId, patch: CartLinePatch) -> Result<(), CommerceError> {
        if let Some(quantity) = patch.quantity {
            validate_quantity(quantity)?;
        }
        let line = self
            .lines
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or_else(|| CommerceError::ItemNotInCart(id.to_string()))?;
        patch.apply(line);
        self.touch();
        Ok(())
    }

    /// Remove a line. Returns whether anything was removed.
    pub fn remove(&mut self, id: &LineItemId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.id != id);
        let removed = self.lines.len() < len_before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Set a line's quantity, clamped to `1..=MAX_QUANTITY_PER_LINE`.
    ///
    /// Returns the quantity actually stored.
    pub fn set_quantity(&mut self, id: &LineItemId, quantity: i64) -> Result<i64, CommerceError> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or_else(|| CommerceError::ItemNotInCart(id.to_string()))?;
        line.quantity = quantity.clamp(1, MAX_QUANTITY_PER_LINE);
        let stored = line.quantity;
        self.touch();
        Ok(stored)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.touch();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, id: &LineItemId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of price × quantity across lines.
    pub fn total(&self) -> Result<Money, CommerceError> {
        self.lines.iter().try_fold(Money::zero(self.currency), |acc, line| {
            line.line_total()
                .and_then(|t| acc.try_add(&t))
                .ok_or(CommerceError::Overflow)
        })
    }

    /// Subtotal, shipping, tax and order total for display.
    pub fn summary(&self, rules: &PricingRules) -> Result<OrderSummary, CommerceError> {
        OrderSummary::compute(self.total()?, self.item_count(), rules)
    }

    fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

fn validate_quantity(quantity: i64) -> Result<(), CommerceError> {
    if quantity <= 0 {
        return Err(CommerceError::InvalidQuantity(quantity));
    }
    if quantity > MAX_QUANTITY_PER_LINE {
        return Err(CommerceError::QuantityExceedsLimit(quantity, MAX_QUANTITY_PER_LINE));
    }
    Ok(())
}

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Locally generated identifier.
    pub id: LineItemId,
    /// Product being purchased.
    pub product_id: ProductId,
    /// Product slug, used to reopen the customizer.
    pub slug: String,
    /// Product name (denormalized for display).
    pub name: String,
    /// Product image URL.
    pub image: Option<String>,
    /// Resolved unit price.
    pub unit_price: Money,
    pub quantity: i64,
    /// Selected size label.
    pub size: Option<String>,
    pub ink_color: Option<String>,
    /// Stamp pad name when bundled into this line.
    pub stamp_pad: Option<String>,
    #[serde(default)]
    pub priority_processing: bool,
    /// Hosted URL of the uploaded design.
    pub logo_url: Option<String>,
    /// Backend variant; required at checkout. Lines persisted by older
    /// sessions may lack it.
    #[serde(default)]
    pub variant_id: Option<VariantId>,
}

impl CartLine {
    /// Create a single-quantity line. The id is assigned by [`Cart::add`].
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money,
        variant_id: Option<VariantId>,
    ) -> Self {
        Self {
            id: LineItemId::new(""),
            product_id: product_id.into(),
            slug: String::new(),
            name: name.into(),
            image: None,
            unit_price,
            quantity: 1,
            size: None,
            ink_color: None,
            stamp_pad: None,
            priority_processing: false,
            logo_url: None,
            variant_id,
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Price × quantity, or None on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.try_multiply(self.quantity)
    }
}

/// Partial update for a cart line. `None` leaves a field untouched; for
/// optional fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartLinePatch {
    pub unit_price: Option<Money>,
    pub quantity: Option<i64>,
    pub size: Option<Option<String>>,
    pub ink_color: Option<Option<String>>,
    pub stamp_pad: Option<Option<String>>,
    pub priority_processing: Option<bool>,
    pub logo_url: Option<Option<String>>,
    pub variant_id: Option<Option<VariantId>>,
}

impl CartLinePatch {
    /// Patch that overwrites every customization field with `line`'s.
    pub fn replace_with(line: &CartLine) -> Self {
        Self {
            unit_price: Some(line.unit_price),
            quantity: None,
            size: Some(line.size.clone()),
            ink_color: Some(line.ink_color.clone()),
            stamp_pad: Some(line.stamp_pad.clone()),
            priority_processing: Some(line.priority_processing),
            logo_url: Some(line.logo_url.clone()),
            variant_id: Some(line.variant_id.clone()),
        }
    }

    fn apply(self, line: &mut CartLine) {
        if let Some(price) = self.unit_price {
            line.unit_price = price;
        }
        if let Some(quantity) = self.quantity {
            line.quantity = quantity;
        }
        if let Some(size) = self.size {
            line.size = size;
        }
        if let Some(ink) = self.ink_color {
            line.ink_color = ink;
        }
        if let Some(pad) = self.stamp_pad {
            line.stamp_pad = pad;
        }
        if let Some(priority) = self.priority_processing {
            line.priority_processing = priority;
        }
        if let Some(logo) = self.logo_url {
            line.logo_url = logo;
        }
        if let Some(variant) = self.variant_id {
            line.variant_id = variant;
        }
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
