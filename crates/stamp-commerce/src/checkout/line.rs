//! Checkout line items.

use crate::cart::{Cart, CartLine};
use crate::error::CommerceError;
use crate::ids::VariantId;
use serde::{Deserialize, Serialize};

/// Attribute key for the chosen ink color.
pub const ATTR_INK_COLOR: &str = "Ink Color";
/// Attribute key for the chosen stamp pad.
pub const ATTR_STAMP_PAD: &str = "Stamp Pad";
/// Attribute key flagging priority processing.
pub const ATTR_PRIORITY: &str = "Priority Processing";
/// Attribute key carrying the hosted design URL.
pub const ATTR_LOGO: &str = "Logo";

/// Free-text key/value metadata attached to a line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineAttribute {
    pub key: String,
    pub value: String,
}

impl LineAttribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One entry submitted to the checkout service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutLine {
    /// Backend variant. Required at submission.
    pub variant_id: Option<VariantId>,
    pub quantity: i64,
    #[serde(default)]
    pub attributes: Vec<LineAttribute>,
    /// Display name, used in diagnostics.
    pub label: String,
}

impl CheckoutLine {
    pub fn new(label: impl Into<String>, variant_id: Option<VariantId>, quantity: i64) -> Self {
        Self {
            variant_id,
            quantity,
            attributes: Vec::new(),
            label: label.into(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(LineAttribute::new(key, value));
        self
    }

    /// Value of an attribute by key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }
}

/// Customization metadata shared by cart lines and customizer lines.
pub(crate) fn customization_attributes(
    ink_color: Option<&str>,
    stamp_pad: Option<&str>,
    priority: bool,
    logo_url: Option<&str>,
) -> Vec<LineAttribute> {
    let mut attributes = Vec::new();
    if let Some(ink) = ink_color {
        attributes.push(LineAttribute::new(ATTR_INK_COLOR, ink));
    }
    if let Some(pad) = stamp_pad {
        attributes.push(LineAttribute::new(ATTR_STAMP_PAD, pad));
    }
    if priority {
        attributes.push(LineAttribute::new(ATTR_PRIORITY, "Yes"));
    }
    if let Some(logo) = logo_url {
        attributes.push(LineAttribute::new(ATTR_LOGO, logo));
    }
    attributes
}

impl From<&CartLine> for CheckoutLine {
    fn from(line: &CartLine) -> Self {
        Self {
            variant_id: line.variant_id.clone(),
            quantity: line.quantity,
            attributes: customization_attributes(
                line.ink_color.as_deref(),
                line.stamp_pad.as_deref(),
                line.priority_processing,
                line.logo_url.as_deref(),
            ),
            label: line.name.clone(),
        }
    }
}

/// Checkout lines for every cart line, in cart order.
pub fn cart_checkout_lines(cart: &Cart) -> Vec<CheckoutLine> {
    cart.lines().iter().map(CheckoutLine::from).collect()
}

/// Refuse an empty submission or any line without a variant reference.
///
/// Checkout adapters call this before any network traffic.
pub fn validate_lines(lines: &[CheckoutLine]) -> Result<(), CommerceError> {
    if lines.is_empty() {
        return Err(CommerceError::EmptyCheckout);
    }
    if let Some(line) = lines.iter().find(|l| l.variant_id.is_none()) {
        tracing::warn!(line = %line.label, "checkout line missing variant reference");
        return Err(CommerceError::MissingVariant(line.label.clone()));
    }
    if let Some(line) = lines.iter().find(|l| l.quantity <= 0) {
        return Err(CommerceError::InvalidQuantity(line.quantity));
    }
    Ok(())
}
