//! Product catalog module.
//!
//! Contains product records, category inference, add-ons, and the catalog
//! provider seam.

mod addons;
mod catalog;
mod category;
mod product;

pub use addons::{
    is_priority_product, AddOnCatalog, PriorityOption, StampPadOption, PRIORITY_PRODUCT_MARKER,
};
pub use catalog::{Catalog, CatalogProvider};
pub use category::ProductCategory;
pub use product::{
    Product, SizeOption, DEFAULT_INK_COLOR, DEFAULT_INK_COLORS, DEFAULT_TURNAROUND,
};
