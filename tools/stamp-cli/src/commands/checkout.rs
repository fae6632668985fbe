//! Check out the local cart.

use anyhow::Result;
use stamp_commerce::checkout::checkout_cart;

use super::session::{confirm, interactive};
use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.load_cart()?;
    let summary = cart.summary(&ctx.config.pricing)?;

    ctx.output.header("Checkout");
    ctx.output.kv("Items", &summary.item_count.to_string());
    ctx.output.kv("Estimated total", &summary.total.display());

    if !confirm("Create checkout?", interactive(ctx, args.yes))? {
        ctx.output.warn("Checkout cancelled");
        return Ok(());
    }

    let spinner = ctx.output.spinner("Creating checkout");
    let result = checkout_cart(&cart, &ctx.storefront()).await;
    spinner.finish_and_clear();
    let checkout_url = result?;

    if args.clear {
        cart.clear();
        ctx.save_cart(&cart)?;
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "checkout_url": checkout_url }));
        return Ok(());
    }

    ctx.output.success("Checkout created");
    ctx.output.kv("Checkout", &checkout_url);
    if args.clear {
        ctx.output.info("Cart cleared");
    }

    Ok(())
}
