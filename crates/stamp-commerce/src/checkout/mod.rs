//! Checkout module.
//!
//! Contains checkout line items, their validation, and the hosted checkout
//! service seam.

mod line;
mod service;

pub(crate) use line::customization_attributes;
pub use line::{
    cart_checkout_lines, validate_lines, CheckoutLine, LineAttribute, ATTR_INK_COLOR, ATTR_LOGO,
    ATTR_PRIORITY, ATTR_STAMP_PAD,
};
pub use service::{checkout_cart, CheckoutService};
