//! Hosted checkout seam.

use crate::cart::Cart;
use crate::checkout::{cart_checkout_lines, validate_lines, CheckoutLine};
use crate::error::CommerceError;
use async_trait::async_trait;

/// Hosted checkout backend.
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Submit line items and return the hosted payment page URL.
    ///
    /// Implementations must run [`validate_lines`] before any network call
    /// and report upstream errors as [`CommerceError::CheckoutFailed`].
    async fn create_checkout(&self, lines: &[CheckoutLine]) -> Result<String, CommerceError>;
}

/// Submit every cart line and return the redirect URL.
///
/// The cart is left untouched; the caller clears it once the shopper has
/// been handed off.
pub async fn checkout_cart(
    cart: &Cart,
    service: &dyn CheckoutService,
) -> Result<String, CommerceError> {
    let lines = cart_checkout_lines(cart);
    validate_lines(&lines)?;
    tracing::info!(lines = lines.len(), items = cart.item_count(), "submitting cart checkout");
    service.create_checkout(&lines).await
}
