//! Storefront product nodes to catalog products.

use crate::storefront::types::{MoneyV2, ProductNode, VariantNode};
use stamp_commerce::catalog::{Product, ProductCategory, SizeOption};
use stamp_commerce::money::{Currency, Money};

const SHORT_DESCRIPTION_CHARS: usize = 100;
const INK_OPTION_NAMES: [&str; 2] = ["ink color", "color"];

/// Parse a wire amount in the store currency.
///
/// Amounts in any other currency are refused.
fn parse_money(money: &MoneyV2, store: Currency) -> Option<Money> {
    if let Some(code) = money.currency_code.as_deref() {
        if Currency::from_code(code) != Some(store) {
            return None;
        }
    }
    Money::parse(&money.amount, store)
}

fn short_description(description: &str) -> String {
    let prefix: String = description.chars().take(SHORT_DESCRIPTION_CHARS).collect();
    format!("{}...", prefix)
}

fn size_option(variant: &VariantNode, store: Currency) -> Option<SizeOption> {
    let price = parse_money(&variant.price, store)?;
    let dimensions = variant
        .selected_options
        .iter()
        .find(|o| o.name.eq_ignore_ascii_case("size"))
        .map(|o| o.value.clone())
        .unwrap_or_else(|| variant.title.clone());
    let mut size = SizeOption::new(variant.title.clone(), price).with_variant(variant.id.clone());
    size.dimensions = dimensions;
    size.available = variant.available_for_sale;
    Some(size)
}

fn ink_colors(node: &ProductNode) -> Vec<String> {
    let mut colors: Vec<String> = Vec::new();
    for option in node.variants.nodes().flat_map(|v| v.selected_options.iter()) {
        let is_ink = INK_OPTION_NAMES
            .iter()
            .any(|name| option.name.eq_ignore_ascii_case(name));
        if is_ink && !colors.contains(&option.value) {
            colors.push(option.value.clone());
        }
    }
    colors
}

/// Map a product node into the catalog, or `None` when its prices cannot
/// be read in the store currency.
///
/// Sizes are only built when the product has more than one variant; the
/// first variant is the default.
pub fn map_product(node: &ProductNode, store: Currency) -> Option<Product> {
    let Some(price) = parse_money(&node.price_range.min_variant_price, store) else {
        tracing::warn!(
            product = %node.handle,
            amount = %node.price_range.min_variant_price.amount,
            currency = ?node.price_range.min_variant_price.currency_code,
            "skipping product priced outside the store currency"
        );
        return None;
    };

    let variants: Vec<&VariantNode> = node.variants.nodes().collect();
    let sizes = if variants.len() > 1 {
        variants
            .iter()
            .filter_map(|v| size_option(v, store))
            .collect()
    } else {
        Vec::new()
    };

    let category = ProductCategory::infer(&node.title, &node.product_type);
    let mut product = Product::new(
        node.id.clone(),
        node.title.clone(),
        node.handle.clone(),
        category,
        price,
    )
    .with_sizes(sizes)
    .with_ink_colors(ink_colors(node));

    product.default_variant_id = variants.first().map(|v| v.id.clone().into());
    product.in_stock = variants.iter().any(|v| v.available_for_sale);
    product.image = node.images.nodes().next().map(|i| i.url.clone());
    product.short_description = short_description(&node.description);
    product.description = node.description.clone();
    Some(product)
}
