//! Storefront domain logic for custom rubber stamps.
//!
//! This crate holds everything the storefront decides locally:
//!
//! - **Catalog**: Products, sizes, categories, add-ons (stamp pads, priority processing)
//! - **Customizer**: The multi-step "build your stamp" session and its pricing
//! - **Cart**: Cart lines, persistence, and the order summary
//! - **Checkout**: Line items handed to the hosted checkout
//!
//! The catalog backend, the asset host and the hosted checkout are reached
//! through the [`CatalogProvider`](catalog::CatalogProvider),
//! [`AssetUploader`](customizer::AssetUploader) and
//! [`CheckoutService`](checkout::CheckoutService) traits.
//!
//! # Example
//!
//! ```rust,ignore
//! use stamp_commerce::prelude::*;
//!
//! let catalog = Catalog::load(&provider).await?;
//! let product = catalog.require("big-custom-stamps")?.clone();
//! let mut session = Customizer::new(product, catalog.add_ons(&PricingRules::default()));
//!
//! session.select_size_by_label("6x6 inch")?;
//! session.next()?;
//! session.attach_design(DesignFile::new("logo.png", bytes), None)?;
//! // ...
//! let url = session.finish_checkout(&uploader, &checkout).await?;
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod customizer;

pub use config::PricingRules;
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::PricingRules;
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        AddOnCatalog, Catalog, CatalogProvider, PriorityOption, Product, ProductCategory,
        SizeOption, StampPadOption,
    };

    // Cart
    pub use crate::cart::{Cart, CartLine, CartLinePatch, OrderSummary};

    // Customizer
    pub use crate::customizer::{
        AssetUploader, CartAssembly, Customizer, DesignFile, PadMatcher, PositionalPadMatcher,
        PriceBreakdown, ReviewRow, SizeTablePadMatcher, Step,
    };

    // Checkout
    pub use crate::checkout::{checkout_cart, CheckoutLine, CheckoutService, LineAttribute};
}
