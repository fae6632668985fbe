//! List and show catalog products.

use anyhow::Result;
use serde::Serialize;
use stamp_commerce::catalog::{Catalog, Product, ProductCategory};

use super::ProductsArgs;
use crate::context::Context;
use crate::output::{format_price_range, stock_badge};

/// Related products shown under a product.
const RELATED_LIMIT: usize = 4;

#[derive(Serialize)]
struct ProductRow<'a> {
    slug: &'a str,
    name: &'a str,
    category: &'a str,
    price: String,
    in_stock: bool,
}

impl<'a> ProductRow<'a> {
    fn new(product: &'a Product) -> Self {
        Self {
            slug: &product.slug,
            name: &product.name,
            category: product.category.as_str(),
            price: price_label(product),
            in_stock: product.in_stock,
        }
    }
}

fn price_label(product: &Product) -> String {
    match product.size_price_range() {
        Some((low, high)) => format_price_range(low, high),
        None => product.price.display(),
    }
}

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog().await?;

    if let Some(slug) = args.slug.as_deref() {
        return show(&catalog, catalog.require(slug)?, ctx);
    }

    let category = args.category.as_deref().map(ProductCategory::from_slug);
    let products: Vec<&Product> = if args.all {
        catalog.all().iter().collect()
    } else {
        catalog.display().collect()
    };
    let products: Vec<&Product> = products
        .into_iter()
        .filter(|p| category.as_ref().map_or(true, |c| &p.category == c))
        .collect();

    if ctx.output.is_json() {
        let rows: Vec<ProductRow> = products.iter().map(|p| ProductRow::new(p)).collect();
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output.header("Products");
    if products.is_empty() {
        ctx.output.info("No products found");
        return Ok(());
    }

    let widths = [28, 32, 16, 20];
    ctx.output.table_row(&["SLUG", "NAME", "CATEGORY", "PRICE"], &widths);
    for product in products {
        let row = ProductRow::new(product);
        let stock = stock_badge(row.in_stock);
        ctx.output.table_row(
            &[row.slug, row.name, row.category, row.price.as_str(), stock.as_str()],
            &[28, 32, 16, 20, 0],
        );
    }

    Ok(())
}

fn show(catalog: &Catalog, product: &Product, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("Slug", &product.slug);
    ctx.output.kv("Category", &product.category.display_name());
    ctx.output.kv("Price", &price_label(product));
    ctx.output.kv("Availability", &stock_badge(product.in_stock));
    ctx.output.kv("Turnaround", &product.turnaround);
    if !product.short_description.is_empty() {
        ctx.output.kv("About", &product.short_description);
    }

    if product.has_sizes() {
        ctx.output.header("Sizes");
        for size in &product.sizes {
            ctx.output
                .list_item(&format!("{} ({})", size.label, size.price.display()));
        }
    }

    ctx.output.kv("Ink colors", &product.ink_palette().join(", "));

    let related: Vec<&Product> = catalog.related(product, RELATED_LIMIT).collect();
    if !related.is_empty() {
        ctx.output.header("Related");
        for other in related {
            ctx.output
                .list_item(&format!("{} ({})", other.name, other.slug));
        }
    }

    Ok(())
}
