//! Fetched catalog and its provider seam.

use crate::catalog::{is_priority_product, AddOnCatalog, Product, ProductCategory};
use crate::config::PricingRules;
use crate::error::CommerceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Source of product records (the hosted commerce backend).
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch the product list.
    async fn fetch_products(&self) -> Result<Vec<Product>, CommerceError>;
}

/// A fetched product list with the storefront's views over it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Fetch a catalog from a provider.
    pub async fn load<P: CatalogProvider + ?Sized>(provider: &P) -> Result<Self, CommerceError> {
        let products = provider.fetch_products().await?;
        tracing::debug!(products = products.len(), "catalog loaded");
        Ok(Self::new(products))
    }

    /// Every product, add-ons included.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Products shown to shoppers (the priority-processing add-on is
    /// only sold through the customizer).
    pub fn display(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| !is_priority_product(p))
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    /// Like [`Catalog::find_by_slug`], as an error when absent.
    pub fn require(&self, slug: &str) -> Result<&Product, CommerceError> {
        self.find_by_slug(slug)
            .ok_or_else(|| CommerceError::ProductNotFound(slug.to_string()))
    }

    /// Product hosted by the standalone builder page: the featured slug if
    /// present, otherwise the first custom stamp.
    pub fn builder_product(&self, featured_slug: &str) -> Option<&Product> {
        self.display()
            .find(|p| p.slug == featured_slug)
            .or_else(|| self.display().find(|p| p.category == ProductCategory::CustomStamps))
    }

    /// Up to `limit` other products from the same category.
    pub fn related<'a>(&'a self, product: &'a Product, limit: usize) -> impl Iterator<Item = &'a Product> {
        self.display()
            .filter(move |p| p.category == product.category && p.id != product.id)
            .take(limit)
    }

    /// Add-ons derived from the full product list.
    pub fn add_ons(&self, rules: &PricingRules) -> AddOnCatalog {
        AddOnCatalog::from_products(&self.products, rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(id: &str, name: &str, category: ProductCategory) -> Product {
        Product::new(id, name, id, category, Money::usd(1000))
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            product("face", "Face Stamp", ProductCategory::FaceStamps),
            product("logo", "Logo Stamp", ProductCategory::CustomStamps),
            product("big", "Big Custom Stamps", ProductCategory::CustomStamps),
            product("prio", "Priority Processing", ProductCategory::Other("add-on".into())),
        ])
    }

    #[test]
    fn test_display_hides_priority_addon() {
        let catalog = catalog();
        assert_eq!(catalog.all().len(), 4);
        assert!(catalog.display().all(|p| p.slug != "prio"));
    }

    #[test]
    fn test_builder_product_prefers_featured_slug() {
        let catalog = catalog();
        assert_eq!(catalog.builder_product("big").unwrap().slug, "big");
        assert_eq!(catalog.builder_product("missing").unwrap().slug, "logo");
    }

    #[test]
    fn test_related_excludes_self() {
        let catalog = catalog();
        let logo = catalog.require("logo").unwrap();
        let related: Vec<_> = catalog.related(logo, 3).map(|p| p.slug.as_str()).collect();
        assert_eq!(related, vec!["big"]);
    }

    #[test]
    fn test_require_missing_product() {
        assert_eq!(
            catalog().require("nope"),
            Err(CommerceError::ProductNotFound("nope".into()))
        );
    }
}
