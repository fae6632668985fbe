//! Price a customization without ordering it.

use anyhow::Result;
use serde::Serialize;
use stamp_commerce::customizer::{PriceBreakdown, ReviewRow, Step};

use super::session::{advance_to_review, apply_selection, print_review};
use super::QuoteArgs;
use crate::context::Context;

#[derive(Serialize)]
struct Quote<'a> {
    product: &'a str,
    steps: Vec<Step>,
    rows: Vec<ReviewRow>,
    breakdown: PriceBreakdown,
    /// Why the customization cannot be ordered yet, if it cannot.
    blocked_by: Option<String>,
}

/// Run the quote command.
pub async fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog().await?;
    let product = ctx.pick_product(&catalog, args.slug.as_deref())?;
    let mut session = ctx.customizer(&catalog, product);

    apply_selection(&mut session, &args.selection, ctx, false)?;
    let blocked_by = advance_to_review(&mut session).err().map(|e| e.to_string());

    if ctx.output.is_json() {
        ctx.output.json(&Quote {
            product: &session.product().slug,
            steps: session.steps().to_vec(),
            rows: session.review_rows(),
            breakdown: session.price_breakdown()?,
            blocked_by,
        });
        return Ok(());
    }

    print_review(ctx, &session)?;
    match blocked_by {
        Some(reason) => ctx.output.warn(&format!("Not ready to order: {}", reason)),
        None => ctx.output.success("Ready to order"),
    }

    Ok(())
}
