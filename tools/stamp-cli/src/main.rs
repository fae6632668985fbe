//! Stamp CLI - Command line storefront for custom stamps.
//!
//! Commands:
//! - `stamp products` - List the catalog
//! - `stamp quote` - Price a customization
//! - `stamp cart` - Manage the local cart
//! - `stamp checkout` - Check out the local cart
//! - `stamp customize` - Customize a stamp and check out

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CartArgs, CheckoutArgs, CustomizeArgs, ProductsArgs, QuoteArgs};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "STAMP_LOG";

/// Stamp CLI - Browse, customize and order custom stamps
#[derive(Parser)]
#[command(name = "stamp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products in the catalog
    Products(ProductsArgs),

    /// Price a customization without ordering it
    Quote(QuoteArgs),

    /// Manage the local cart
    Cart(CartArgs),

    /// Check out the local cart
    Checkout(CheckoutArgs),

    /// Customize a stamp and go straight to checkout
    Customize(CustomizeArgs),
}

/// Install the log subscriber. Logs go to stderr so JSON output on
/// stdout stays parseable.
fn init_tracing(verbose: bool, json: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Quote(args) => commands::quote::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Customize(args) => commands::customize::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
