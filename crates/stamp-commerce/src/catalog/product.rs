//! Product and size types.

use crate::catalog::ProductCategory;
use crate::ids::{ProductId, VariantId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Ink colors offered when a product does not list its own.
pub const DEFAULT_INK_COLORS: [&str; 5] = ["Black", "Blue", "Red", "Green", "Purple"];

/// Preferred default ink color.
pub const DEFAULT_INK_COLOR: &str = "Black";

/// Turnaround shown when the catalog carries none.
pub const DEFAULT_TURNAROUND: &str = "1-3 business days";

/// A product in the catalog.
///
/// Immutable once fetched; owned by the catalog provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Backend product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// URL-friendly slug (backend handle).
    pub slug: String,
    /// Inferred category.
    pub category: ProductCategory,
    /// Base price (lowest variant price).
    pub price: Money,
    /// Size options; empty when the product has no size axis.
    #[serde(default)]
    pub sizes: Vec<SizeOption>,
    /// Ink colors offered; empty when the product does not list any.
    #[serde(default)]
    pub ink_colors: Vec<String>,
    /// Full description.
    pub description: String,
    /// Short description for listings.
    pub short_description: String,
    /// Primary image URL.
    pub image: Option<String>,
    /// Variant used when no size is selected.
    pub default_variant_id: Option<VariantId>,
    /// Average review rating.
    pub rating: f32,
    /// Number of reviews.
    pub review_count: u32,
    /// Whether any variant is available for sale.
    pub in_stock: bool,
    /// Feature bullet points.
    #[serde(default)]
    pub features: Vec<String>,
    /// Estimated production turnaround.
    pub turnaround: String,
}

impl Product {
    /// Create a product with no size or ink axes.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        slug: impl Into<String>,
        category: ProductCategory,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            category,
            price,
            sizes: Vec::new(),
            ink_colors: Vec::new(),
            description: String::new(),
            short_description: String::new(),
            image: None,
            default_variant_id: None,
            rating: 5.0,
            review_count: 0,
            in_stock: true,
            features: Vec::new(),
            turnaround: DEFAULT_TURNAROUND.to_string(),
        }
    }

    pub fn with_sizes(mut self, sizes: Vec<SizeOption>) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn with_ink_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ink_colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default_variant(mut self, variant_id: impl Into<VariantId>) -> Self {
        self.default_variant_id = Some(variant_id.into());
        self
    }

    /// Whether the product has a size axis.
    pub fn has_sizes(&self) -> bool {
        !self.sizes.is_empty()
    }

    /// Lowest and highest size price, if the product has sizes.
    pub fn size_price_range(&self) -> Option<(Money, Money)> {
        let min = self.sizes.iter().map(|s| s.price).min()?;
        let max = self.sizes.iter().map(|s| s.price).max()?;
        Some((min, max))
    }

    /// Ink colors the customer may choose from.
    pub fn ink_palette(&self) -> Vec<String> {
        if self.ink_colors.is_empty() {
            DEFAULT_INK_COLORS.iter().map(|c| c.to_string()).collect()
        } else {
            self.ink_colors.clone()
        }
    }

    /// Initial ink color: Black when offered, otherwise the first color.
    pub fn default_ink_color(&self) -> String {
        let palette = self.ink_palette();
        palette
            .iter()
            .find(|c| c.as_str() == DEFAULT_INK_COLOR)
            .or_else(|| palette.first())
            .cloned()
            .unwrap_or_else(|| DEFAULT_INK_COLOR.to_string())
    }

    /// Find a size by its label (case-insensitive).
    pub fn size_by_label(&self, label: &str) -> Option<(usize, &SizeOption)> {
        self.sizes
            .iter()
            .enumerate()
            .find(|(_, s)| s.label.eq_ignore_ascii_case(label))
    }
}

/// A purchasable size of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SizeOption {
    /// Display label (e.g. "6x6 inch").
    pub label: String,
    /// Dimension string.
    pub dimensions: String,
    /// Price of this size.
    pub price: Money,
    /// Backend variant for this size.
    pub variant_id: Option<VariantId>,
    /// Whether the size can be ordered.
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool {
    true
}

impl SizeOption {
    pub fn new(label: impl Into<String>, price: Money) -> Self {
        let label = label.into();
        Self {
            dimensions: label.clone(),
            label,
            price,
            variant_id: None,
            available: true,
        }
    }

    pub fn with_variant(mut self, variant_id: impl Into<VariantId>) -> Self {
        self.variant_id = Some(variant_id.into());
        self
    }

    /// Whether this option is a bundle covering every size.
    pub fn is_all_sizes_bundle(&self) -> bool {
        self.label.to_lowercase().contains("all sizes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp() -> Product {
        Product::new(
            "prod-1",
            "Big Custom Stamps",
            "big-custom-stamps",
            ProductCategory::CustomStamps,
            Money::usd(5999),
        )
        .with_sizes(vec![
            SizeOption::new("4x4 inch", Money::usd(5999)),
            SizeOption::new("6x6 inch", Money::usd(7999)),
            SizeOption::new("8x8 inch", Money::usd(9999)),
        ])
    }

    #[test]
    fn test_size_price_range() {
        let (min, max) = stamp().size_price_range().unwrap();
        assert_eq!(min, Money::usd(5999));
        assert_eq!(max, Money::usd(9999));
    }

    #[test]
    fn test_ink_palette_fallback() {
        let product = stamp();
        assert_eq!(product.ink_palette().len(), 5);
        assert_eq!(product.default_ink_color(), "Black");

        let product = stamp().with_ink_colors(["Red", "Blue"]);
        assert_eq!(product.ink_palette(), vec!["Red", "Blue"]);
        assert_eq!(product.default_ink_color(), "Red");
    }

    #[test]
    fn test_size_by_label() {
        let product = stamp();
        let (index, size) = product.size_by_label("6X6 INCH").unwrap();
        assert_eq!(index, 1);
        assert_eq!(size.price, Money::usd(7999));
        assert!(product.size_by_label("10x10").is_none());
    }

    #[test]
    fn test_all_sizes_bundle() {
        assert!(SizeOption::new("All Sizes Bundle", Money::usd(19999)).is_all_sizes_bundle());
        assert!(!SizeOption::new("4x4 inch", Money::usd(5999)).is_all_sizes_bundle());
    }
}
