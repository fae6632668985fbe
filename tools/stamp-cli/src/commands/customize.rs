//! Customize a stamp and go straight to checkout.

use anyhow::Result;

use super::session::{advance_to_review, apply_selection, confirm, interactive, print_review};
use super::CustomizeArgs;
use crate::context::Context;

/// Run the customize command.
pub async fn run(args: CustomizeArgs, ctx: &Context) -> Result<()> {
    let prompts = interactive(ctx, args.yes);
    let catalog = ctx.catalog().await?;
    let product = ctx.pick_product(&catalog, args.slug.as_deref())?;
    let mut session = ctx.customizer(&catalog, product);

    apply_selection(&mut session, &args.selection, ctx, prompts)?;
    advance_to_review(&mut session)?;
    print_review(ctx, &session)?;

    if !confirm("Proceed to checkout?", prompts)? {
        ctx.output.warn("Checkout cancelled");
        return Ok(());
    }

    let spinner = ctx.output.spinner("Uploading design and creating checkout");
    let result = session
        .finish_checkout(&ctx.asset_host(), &ctx.storefront())
        .await;
    spinner.finish_and_clear();
    let checkout_url = result?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "checkout_url": checkout_url,
            "logo_url": session.asset_url(),
        }));
        return Ok(());
    }

    ctx.output.success("Checkout created");
    if let Some(url) = session.asset_url() {
        ctx.output.kv("Design", url);
    }
    ctx.output.kv("Checkout", &checkout_url);

    Ok(())
}
