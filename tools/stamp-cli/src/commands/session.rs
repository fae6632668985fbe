//! Headless customizer driving shared by the ordering commands.

use std::path::Path;

use anyhow::{Context as _, Result};
use dialoguer::{Confirm, Select};
use stamp_commerce::customizer::{Customizer, DesignFile, Step};

use super::SelectionArgs;
use crate::context::Context;
use crate::output::format_bytes;

/// Whether prompts may be shown.
pub fn interactive(ctx: &Context, yes: bool) -> bool {
    !yes && !ctx.output.is_json() && console::user_attended()
}

/// Read a design file from disk.
pub fn read_design(ctx: &Context, path: &str) -> Result<DesignFile> {
    let resolved = ctx.resolve_path(path);
    let bytes = std::fs::read(&resolved)
        .with_context(|| format!("Failed to read design file: {}", resolved.display()))?;
    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());

    ctx.output.debug(&format!(
        "Read {} ({})",
        file_name,
        format_bytes(bytes.len() as u64)
    ));
    Ok(DesignFile::new(file_name, bytes))
}

/// Apply command-line choices to a session, prompting for a missing size
/// and pad when interactive.
pub fn apply_selection(
    session: &mut Customizer,
    args: &SelectionArgs,
    ctx: &Context,
    interactive: bool,
) -> Result<()> {
    if let Some(size) = &args.size {
        session.select_size_by_label(size)?;
    } else if interactive && has_step(session, Step::Size) && session.selections().size.is_none() {
        prompt_size(session)?;
    }

    if let Some(logo) = &args.logo {
        let design = read_design(ctx, logo)?;
        session.attach_design(design, Some(logo.clone()))?;
    }

    if args.no_pad {
        session.clear_pad();
    } else if let Some(pad) = &args.pad {
        session.select_pad(pad)?;
    } else if interactive && has_step(session, Step::Pad) && session.selections().stamp_pad.is_none() {
        prompt_pad(session)?;
    }

    if let Some(ink) = &args.ink {
        if has_step(session, Step::Color) {
            session.set_ink_color(ink)?;
        } else {
            ctx.output.warn(&format!(
                "{} has no ink choice; ignoring --ink",
                session.product().name
            ));
        }
    }

    if args.priority {
        session.set_priority(true);
    } else if args.standard {
        session.set_priority(false);
    }

    Ok(())
}

fn has_step(session: &Customizer, step: Step) -> bool {
    session.steps().contains(&step)
}

fn prompt_size(session: &mut Customizer) -> Result<()> {
    let items: Vec<String> = session
        .size_options()
        .iter()
        .map(|s| format!("{} ({})", s.label, s.price.display()))
        .collect();
    let choice = Select::new()
        .with_prompt("Stamp size")
        .items(&items)
        .default(0)
        .interact()?;
    session.select_size(choice)?;
    Ok(())
}

fn prompt_pad(session: &mut Customizer) -> Result<()> {
    let pads = session.pad_options();
    if pads.is_empty() {
        return Ok(());
    }
    let mut items = vec!["No stamp pad".to_string()];
    items.extend(
        pads.iter()
            .map(|p| format!("{} (+{})", p.name, p.price.display())),
    );
    let choice = Select::new()
        .with_prompt("Add a stamp pad?")
        .items(&items)
        .default(0)
        .interact()?;
    match choice.checked_sub(1).and_then(|i| pads.get(i)) {
        Some(pad) => session.select_pad(&pad.name)?,
        None => session.clear_pad(),
    }
    Ok(())
}

/// Walk the session forward to its Review step.
pub fn advance_to_review(session: &mut Customizer) -> Result<()> {
    while session.current_step() != Step::Review {
        session.next()?;
    }
    Ok(())
}

/// Print the review summary and running total.
pub fn print_review(ctx: &Context, session: &Customizer) -> Result<()> {
    ctx.output.header(&session.product().name);
    for row in session.review_rows() {
        let value = if row.price.is_positive() {
            format!("{:<24} {}", row.value, row.price.display())
        } else {
            row.value.clone()
        };
        ctx.output.kv(row.label, &value);
    }
    let breakdown = session.price_breakdown()?;
    ctx.output.kv("Total", &breakdown.total.display());
    Ok(())
}

/// Ask before submitting unless prompts are off.
pub fn confirm(prompt: &str, interactive: bool) -> Result<bool> {
    if !interactive {
        return Ok(true);
    }
    Ok(Confirm::new().with_prompt(prompt).default(true).interact()?)
}
