//! Commerce error types.
//!
//! The `Display` text of the user-facing variants is the message shown to
//! the shopper; upstream detail is logged where the error is produced and
//! never leaks into these messages.

use crate::customizer::Step;
use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Size index or label not offered by the product.
    #[error("Size not available: {0}")]
    SizeNotAvailable(String),

    /// Ink color not offered by the product.
    #[error("Ink color not available: {0}")]
    InkColorNotAvailable(String),

    /// Stamp pad not offered for the current size.
    #[error("Stamp pad not available: {0}")]
    StampPadNotAvailable(String),

    /// Continue attempted while the current step is incomplete.
    #[error("Please complete the {} step before continuing", .0.label())]
    StepIncomplete(Step),

    /// Step is not part of this product's flow or not yet reached.
    #[error("Cannot move from {} to {}", .from.label(), .to.label())]
    InvalidStepTransition { from: Step, to: Step },

    /// Finish attempted before reaching the review step.
    #[error("Review your stamp before finishing")]
    NotAtReview,

    /// Finish attempted for an artwork product with no design attached.
    #[error("Please upload your design before checking out")]
    DesignRequired,

    /// Design file rejected before upload.
    #[error("Unsupported design file: {0}")]
    InvalidDesignFile(String),

    /// A finish action is already in flight.
    #[error("Checkout is already being created")]
    SubmissionInProgress,

    /// Asset upload failed.
    #[error("Failed to upload your logo. Please try again.")]
    UploadFailed,

    /// Cart line without a variant reference reached checkout.
    #[error("Some items in your cart are missing variant data. Please remove them and add them again to update your cart session.")]
    MissingVariant(String),

    /// Nothing to check out.
    #[error("Your cart is empty")]
    EmptyCheckout,

    /// Checkout creation failed upstream.
    #[error("Failed to initialize checkout.")]
    CheckoutFailed,

    /// Backend credentials are not configured.
    #[error("Missing storefront credentials: {0}")]
    MissingCredentials(String),

    /// Catalog could not be fetched.
    #[error("Failed to fetch products: {0}")]
    CatalogUnavailable(String),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            CommerceError::UploadFailed.to_string(),
            "Failed to upload your logo. Please try again."
        );
        assert_eq!(
            CommerceError::CheckoutFailed.to_string(),
            "Failed to initialize checkout."
        );
        assert!(CommerceError::MissingVariant("Big Custom Stamp".into())
            .to_string()
            .contains("remove them and add them again"));
    }

    #[test]
    fn test_step_messages_use_labels() {
        let err = CommerceError::StepIncomplete(Step::Size);
        assert_eq!(err.to_string(), "Please complete the Choose Size step before continuing");
    }
}
