//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod customize;
pub mod products;
pub mod quote;
mod session;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Show one product in detail.
    pub slug: Option<String>,

    /// Only list products in this category (slug, e.g. "custom-stamps").
    #[arg(long)]
    pub category: Option<String>,

    /// Include the priority-processing add-on.
    #[arg(long)]
    pub all: bool,
}

/// Customization choices shared by quote, customize and cart add/edit.
#[derive(Args, Clone, Default)]
pub struct SelectionArgs {
    /// Stamp size label (e.g. "6x6 inch").
    #[arg(short, long)]
    pub size: Option<String>,

    /// Stamp pad name.
    #[arg(short, long)]
    pub pad: Option<String>,

    /// Leave out any stamp pad.
    #[arg(long, conflicts_with = "pad")]
    pub no_pad: bool,

    /// Ink color.
    #[arg(short, long)]
    pub ink: Option<String>,

    /// Add priority processing.
    #[arg(long)]
    pub priority: bool,

    /// Standard processing (drops priority on an edited line).
    #[arg(long, conflicts_with = "priority")]
    pub standard: bool,

    /// Design artwork file (PNG, JPG, PDF, AI, EPS).
    #[arg(short, long)]
    pub logo: Option<String>,
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Product slug (default: the featured stamp).
    pub slug: Option<String>,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Arguments for the customize command.
#[derive(Args)]
pub struct CustomizeArgs {
    /// Product slug (default: the featured stamp).
    pub slug: Option<String>,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Skip prompts and the confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// List cart lines and the order summary.
    List,
    /// Customize a stamp and add it to the cart.
    Add {
        /// Product slug (default: the featured stamp).
        slug: Option<String>,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Quantity of the stamp line.
        #[arg(short, long, default_value = "1")]
        quantity: i64,

        /// Skip prompts.
        #[arg(short, long)]
        yes: bool,
    },
    /// Reopen a cart line in the customizer and save the changes over it.
    Edit {
        /// Cart line id.
        line: String,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Skip prompts.
        #[arg(short, long)]
        yes: bool,
    },
    /// Remove a line.
    Remove {
        /// Cart line id.
        line: String,
    },
    /// Set a line's quantity.
    Qty {
        /// Cart line id.
        line: String,
        /// New quantity (values below 1 become 1).
        quantity: i64,
    },
    /// Remove every line.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Empty the local cart once checkout is created.
    #[arg(long)]
    pub clear: bool,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}
