//! Product categories.
//!
//! The commerce backend has no category field; the category is inferred from
//! the product title and product type when the catalog is mapped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductCategory {
    CustomStamps,
    WoodenStamps,
    FaceStamps,
    StampPad,
    RefillInk,
    /// Any other backend product type, kept as its slug.
    Other(String),
}

impl ProductCategory {
    pub fn as_str(&self) -> &str {
        match self {
            ProductCategory::CustomStamps => "custom-stamps",
            ProductCategory::WoodenStamps => "wooden-stamps",
            ProductCategory::FaceStamps => "face-stamps",
            ProductCategory::StampPad => "stamp-pad",
            ProductCategory::RefillInk => "refill-ink",
            ProductCategory::Other(slug) => slug,
        }
    }

    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "custom-stamps" => ProductCategory::CustomStamps,
            "wooden-stamps" => ProductCategory::WoodenStamps,
            "face-stamps" => ProductCategory::FaceStamps,
            "stamp-pad" => ProductCategory::StampPad,
            "refill-ink" => ProductCategory::RefillInk,
            other => ProductCategory::Other(other.to_string()),
        }
    }

    /// Infer the category from a product title and backend product type.
    ///
    /// Title keywords win; an untagged product falls back to its product
    /// type, and a product with neither is a custom stamp.
    pub fn infer(title: &str, product_type: &str) -> Self {
        let title = title.to_lowercase();
        if title.contains("refill ink") || title.contains("textile ink") {
            ProductCategory::RefillInk
        } else if title.contains("stamp pad") || title.contains("ink pad") {
            ProductCategory::StampPad
        } else if title.contains("face") {
            ProductCategory::FaceStamps
        } else if title.contains("wood") {
            ProductCategory::WoodenStamps
        } else if !product_type.trim().is_empty() {
            Self::from_slug(&product_type.trim().to_lowercase().replace(' ', "-"))
        } else {
            ProductCategory::CustomStamps
        }
    }

    /// Whether products in this category are engraved from customer artwork.
    pub fn needs_artwork(&self) -> bool {
        matches!(
            self,
            ProductCategory::CustomStamps | ProductCategory::FaceStamps | ProductCategory::WoodenStamps
        )
    }

    /// Human-readable name (e.g. "custom stamps").
    pub fn display_name(&self) -> String {
        self.as_str().replace('-', " ")
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ProductCategory {
    fn from(s: String) -> Self {
        Self::from_slug(&s)
    }
}

impl From<ProductCategory> for String {
    fn from(c: ProductCategory) -> Self {
        c.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_from_title_keywords() {
        assert_eq!(ProductCategory::infer("Textile Ink 2oz", ""), ProductCategory::RefillInk);
        assert_eq!(ProductCategory::infer("XL Wooden Stamp Pad", ""), ProductCategory::StampPad);
        assert_eq!(ProductCategory::infer("Custom Face Stamp", ""), ProductCategory::FaceStamps);
        assert_eq!(ProductCategory::infer("Wood Handle Stamp", ""), ProductCategory::WoodenStamps);
    }

    #[test]
    fn test_infer_falls_back_to_product_type() {
        assert_eq!(
            ProductCategory::infer("Priority Processing", "Add On"),
            ProductCategory::Other("add-on".to_string())
        );
        assert_eq!(
            ProductCategory::infer("Big Custom Stamps by SleekStamp", ""),
            ProductCategory::CustomStamps
        );
        assert_eq!(
            ProductCategory::infer("Logo Stamp", "Custom Stamps"),
            ProductCategory::CustomStamps
        );
    }

    #[test]
    fn test_artwork_categories() {
        assert!(ProductCategory::CustomStamps.needs_artwork());
        assert!(ProductCategory::FaceStamps.needs_artwork());
        assert!(ProductCategory::WoodenStamps.needs_artwork());
        assert!(!ProductCategory::StampPad.needs_artwork());
        assert!(!ProductCategory::RefillInk.needs_artwork());
    }

    #[test]
    fn test_serde_uses_slug() {
        let json = serde_json::to_string(&ProductCategory::StampPad).unwrap();
        assert_eq!(json, "\"stamp-pad\"");
        let parsed: ProductCategory = serde_json::from_str("\"refill-ink\"").unwrap();
        assert_eq!(parsed, ProductCategory::RefillInk);
    }
}
