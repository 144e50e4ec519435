//! Grocer CLI - Command line client for the Groceteria storefront.
//!
//! Commands:
//! - `grocer news` - Browse and manage news items
//! - `grocer products` - Browse the catalog
//! - `grocer cart` - Show and edit the cart
//! - `grocer account` - Show the profile and address book
//! - `grocer orders` - Order history, checkout and cancellation
//! - `grocer config` - Manage configuration

mod commands;
mod config;
mod context;
mod demo;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AccountArgs, CartArgs, ConfigArgs, NewsArgs, OrdersArgs, ProductsArgs};

/// Grocer CLI - Shop the Groceteria storefront from the terminal
#[derive(Parser)]
#[command(name = "grocer")]
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

    /// Use the built-in demo data instead of the API
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and manage news items
    News(NewsArgs),

    /// Browse the product catalog
    Products(ProductsArgs),

    /// Show and edit the cart
    Cart(CartArgs),

    /// Show the signed-in profile and addresses
    Account(AccountArgs),

    /// Order history, checkout and cancellation
    Orders(OrdersArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "grocer=debug,grocer_store=debug,grocer_data=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, cli.offline, output)?;

    let result = match cli.command {
        Commands::News(args) => commands::news::run(args, &ctx).await,
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Account(args) => commands::account::run(args, &ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        if e.downcast_ref::<commands::Reported>().is_none() {
            ctx.output.error(&format!("{:#}", e));
        }
        std::process::exit(1);
    }

    Ok(())
}
