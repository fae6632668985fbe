//! Manage the local cart.

use anyhow::{bail, Result};
use serde::Serialize;
use stamp_commerce::cart::{Cart, CartLine, OrderSummary};
use stamp_commerce::customizer::Customizer;
use stamp_commerce::ids::LineItemId;

use super::session::{advance_to_review, apply_selection, confirm, interactive, print_review};
use super::{CartArgs, CartCommand, SelectionArgs};
use crate::context::Context;

#[derive(Serialize)]
struct CartView<'a> {
    lines: &'a [CartLine],
    summary: OrderSummary,
    free_shipping_progress: u8,
}

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(CartCommand::List) {
        CartCommand::List => list(ctx),
        CartCommand::Add {
            slug,
            selection,
            quantity,
            yes,
        } => add(ctx, slug.as_deref(), &selection, quantity, yes).await,
        CartCommand::Edit {
            line,
            selection,
            yes,
        } => edit(ctx, &LineItemId::new(line), &selection, yes).await,
        CartCommand::Remove { line } => remove(ctx, &LineItemId::new(line)),
        CartCommand::Qty { line, quantity } => set_quantity(ctx, &LineItemId::new(line), quantity),
        CartCommand::Clear { yes } => clear(ctx, yes),
    }
}

fn list(ctx: &Context) -> Result<()> {
    let cart = ctx.load_cart()?;
    let rules = &ctx.config.pricing;
    let summary = cart.summary(rules)?;

    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            lines: cart.lines(),
            free_shipping_progress: summary.free_shipping_progress(rules),
            summary,
        });
        return Ok(());
    }

    ctx.output.header("Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    for line in cart.lines() {
        print_line(ctx, line);
    }
    print_summary(ctx, &cart, &summary);
    Ok(())
}

fn print_line(ctx: &Context, line: &CartLine) {
    let total = line
        .line_total()
        .map(|t| t.display())
        .unwrap_or_else(|| "-".to_string());
    ctx.output.list_item(&format!(
        "{}  {} x{}  {}",
        line.id, line.name, line.quantity, total
    ));

    let details: Vec<String> = [
        line.size.clone(),
        line.ink_color.as_ref().map(|c| format!("{} ink", c)),
        line.stamp_pad.as_ref().map(|p| format!("with {}", p)),
        line.priority_processing.then(|| "priority".to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !details.is_empty() {
        ctx.output.kv("    options", &details.join(", "));
    }
    if line.variant_id.is_none() {
        ctx.output
            .warn(&format!("{} is missing variant data; remove and add it again", line.name));
    }
}

fn print_summary(ctx: &Context, cart: &Cart, summary: &OrderSummary) {
    ctx.output.header("Order summary");
    ctx.output.kv("Items", &cart.item_count().to_string());
    ctx.output.kv("Subtotal", &summary.subtotal.display());
    let shipping = if summary.has_free_shipping() {
        "FREE".to_string()
    } else {
        summary.shipping.display()
    };
    ctx.output.kv("Shipping", &shipping);
    ctx.output.kv("Tax", &summary.tax.display());
    ctx.output.kv("Total", &summary.total.display());
    if summary.remaining_for_free_shipping.is_positive() {
        ctx.output.info(&format!(
            "Add {} more for free shipping",
            summary.remaining_for_free_shipping.display()
        ));
    }
}

async fn add(
    ctx: &Context,
    slug: Option<&str>,
    selection: &SelectionArgs,
    quantity: i64,
    yes: bool,
) -> Result<()> {
    let prompts = interactive(ctx, yes);
    let catalog = ctx.catalog().await?;
    let product = ctx.pick_product(&catalog, slug)?;
    let mut session = ctx.customizer(&catalog, product);

    apply_selection(&mut session, selection, ctx, prompts)?;
    advance_to_review(&mut session)?;
    print_review(ctx, &session)?;

    let mut cart = ctx.load_cart()?;
    let spinner = ctx.output.spinner("Adding to cart");
    let result = session
        .finish_to_cart(&ctx.asset_host(), &mut cart, ctx.config.cart.assembly)
        .await;
    spinner.finish_and_clear();
    let ids = result?;

    if quantity != 1 {
        if let Some(stamp_line) = ids.first() {
            cart.set_quantity(stamp_line, quantity)?;
        }
    }
    ctx.save_cart(&cart)?;

    if ctx.output.is_json() {
        ctx.output.json(&ids);
        return Ok(());
    }
    ctx.output.success(&format!(
        "Added {} to cart ({} line{})",
        session.product().name,
        ids.len(),
        if ids.len() == 1 { "" } else { "s" }
    ));
    for id in &ids {
        ctx.output.kv("Line", id.as_str());
    }
    Ok(())
}

async fn edit(
    ctx: &Context,
    line_id: &LineItemId,
    selection: &SelectionArgs,
    yes: bool,
) -> Result<()> {
    let mut cart = ctx.load_cart()?;
    let Some(line) = cart.get(line_id).cloned() else {
        bail!("Item not in cart: {}", line_id);
    };

    let catalog = ctx.catalog().await?;
    let product = catalog.require(&line.slug)?.clone();
    let mut session = Customizer::resume_from_line(
        product,
        catalog.add_ons(&ctx.config.pricing),
        &line,
    );
    if let Some(matcher) = ctx.config.catalog.pad_matcher() {
        session = session.with_pad_matcher(matcher);
    }

    let prompts = interactive(ctx, yes);
    apply_selection(&mut session, selection, ctx, prompts)?;
    advance_to_review(&mut session)?;
    print_review(ctx, &session)?;

    if !confirm("Save changes to this line?", prompts)? {
        ctx.output.warn("Edit cancelled");
        return Ok(());
    }

    let spinner = ctx.output.spinner("Updating cart");
    let result = session
        .finish_cart_edit(&ctx.asset_host(), &mut cart, line_id)
        .await;
    spinner.finish_and_clear();
    result?;

    ctx.save_cart(&cart)?;
    ctx.output.success(&format!("Updated {}", line.name));
    Ok(())
}

fn remove(ctx: &Context, line_id: &LineItemId) -> Result<()> {
    let mut cart = ctx.load_cart()?;
    if !cart.remove(line_id) {
        bail!("Item not in cart: {}", line_id);
    }
    ctx.save_cart(&cart)?;
    ctx.output.success(&format!("Removed {}", line_id));
    Ok(())
}

fn set_quantity(ctx: &Context, line_id: &LineItemId, quantity: i64) -> Result<()> {
    let mut cart = ctx.load_cart()?;
    let applied = cart.set_quantity(line_id, quantity)?;
    ctx.save_cart(&cart)?;
    ctx.output
        .success(&format!("Quantity of {} set to {}", line_id, applied));
    Ok(())
}

fn clear(ctx: &Context, yes: bool) -> Result<()> {
    let mut cart = ctx.load_cart()?;
    if cart.is_empty() {
        ctx.output.info("Your cart is already empty");
        return Ok(());
    }
    if !confirm("Remove every line from the cart?", interactive(ctx, yes))? {
        ctx.output.warn("Clear cancelled");
        return Ok(());
    }
    cart.clear();
    ctx.save_cart(&cart)?;
    ctx.output.success("Cart cleared");
    Ok(())
}
