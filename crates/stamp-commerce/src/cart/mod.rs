//! Shopping cart module.
//!
//! Contains the cart store, cart lines, and the display order summary.

mod cart;
mod pricing;

pub use cart::{Cart, CartLine, CartLinePatch, MAX_QUANTITY_PER_LINE};
pub use pricing::OrderSummary;
