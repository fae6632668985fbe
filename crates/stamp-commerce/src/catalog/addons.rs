//! Add-on products offered during customization.

use crate::catalog::{Product, ProductCategory};
use crate::config::PricingRules;
use crate::ids::{ProductId, VariantId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Name fragment identifying the priority-processing product.
pub const PRIORITY_PRODUCT_MARKER: &str = "priority processing";

/// A stamp pad that can be added to a stamp order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StampPadOption {
    pub name: String,
    pub price: Money,
    pub variant_id: Option<VariantId>,
    /// Catalog product the pad comes from.
    #[serde(default)]
    pub product_id: Option<ProductId>,
}

impl StampPadOption {
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Self {
            name: name.into(),
            price,
            variant_id: None,
            product_id: None,
        }
    }

    pub fn with_variant(mut self, variant_id: impl Into<VariantId>) -> Self {
        self.variant_id = Some(variant_id.into());
        self
    }
}

/// Rush production surcharge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriorityOption {
    pub price: Money,
    /// Variant submitted as its own line; absent when priced from the
    /// configured fallback.
    pub variant_id: Option<VariantId>,
    #[serde(default)]
    pub product_id: Option<ProductId>,
}

/// Add-ons available to every customizer session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddOnCatalog {
    /// Stamp pads, cheapest first.
    pub stamp_pads: Vec<StampPadOption>,
    pub priority: PriorityOption,
}

impl AddOnCatalog {
    /// Build add-ons from the full product list.
    ///
    /// Stamp pads come from stamp-pad category products ordered by price.
    /// Priority processing comes from the product whose name mentions it,
    /// otherwise from the configured fallback price.
    pub fn from_products(products: &[Product], rules: &PricingRules) -> Self {
        let mut stamp_pads: Vec<StampPadOption> = products
            .iter()
            .filter(|p| p.category == ProductCategory::StampPad)
            .map(|p| StampPadOption {
                name: p.name.clone(),
                price: p.price,
                variant_id: p.default_variant_id.clone(),
                product_id: Some(p.id.clone()),
            })
            .collect();
        stamp_pads.sort_by_key(|pad| pad.price);

        let priority = products
            .iter()
            .find(|p| is_priority_product(p))
            .map(|p| PriorityOption {
                price: p.price,
                variant_id: p.default_variant_id.clone(),
                product_id: Some(p.id.clone()),
            })
            .unwrap_or_else(|| PriorityOption {
                price: rules.priority_fallback(),
                variant_id: None,
                product_id: None,
            });

        Self {
            stamp_pads,
            priority,
        }
    }

    /// Add-ons with no stamp pads and the fallback priority price.
    pub fn fallback(rules: &PricingRules) -> Self {
        Self::from_products(&[], rules)
    }
}

/// Whether a product is the priority-processing add-on.
pub fn is_priority_product(product: &Product) -> bool {
    product.name.to_lowercase().contains(PRIORITY_PRODUCT_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad(name: &str, cents: i64) -> Product {
        Product::new(
            format!("pad-{cents}"),
            name,
            name.to_lowercase().replace(' ', "-"),
            ProductCategory::StampPad,
            Money::usd(cents),
        )
        .with_default_variant(format!("var-pad-{cents}"))
    }

    #[test]
    fn test_pads_sorted_by_price() {
        let products = vec![
            pad("XL Stamp Pad", 1299),
            pad("Small Stamp Pad", 799),
            pad("Medium Stamp Pad", 999),
        ];
        let addons = AddOnCatalog::from_products(&products, &PricingRules::default());
        let prices: Vec<i64> = addons.stamp_pads.iter().map(|p| p.price.amount_cents).collect();
        assert_eq!(prices, vec![799, 999, 1299]);
    }

    #[test]
    fn test_priority_from_catalog() {
        let products = vec![Product::new(
            "prio",
            "Priority Processing",
            "priority-processing",
            ProductCategory::Other("add-on".into()),
            Money::usd(699),
        )
        .with_default_variant("var-prio")];
        let addons = AddOnCatalog::from_products(&products, &PricingRules::default());
        assert_eq!(addons.priority.price, Money::usd(699));
        assert_eq!(addons.priority.variant_id, Some(VariantId::new("var-prio")));
    }

    #[test]
    fn test_priority_fallback() {
        let addons = AddOnCatalog::fallback(&PricingRules::default());
        assert_eq!(addons.priority.price, Money::usd(499));
        assert!(addons.priority.variant_id.is_none());
        assert!(addons.stamp_pads.is_empty());
    }
}
