//! CLI command implementations.

pub mod account;
pub mod cart;
pub mod config;
pub mod news;
pub mod orders;
pub mod products;

use std::fmt;

use clap::{Args, Subcommand};
use grocer_data::ApiError;

/// A failure the store already showed as an error toast.
#[derive(Debug)]
pub struct Reported;

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("operation failed")
    }
}

impl std::error::Error for Reported {}

/// Store operations toast their own failures; keep main from printing them twice.
pub fn reported<T>(result: Result<T, ApiError>) -> anyhow::Result<T> {
    result.map_err(|_| Reported.into())
}

/// Arguments for the news command.
#[derive(Args)]
pub struct NewsArgs {
    #[command(subcommand)]
    pub command: Option<NewsCommand>,
}

#[derive(Subcommand)]
pub enum NewsCommand {
    /// List the news feed.
    List,
    /// Show one news item.
    Show {
        /// News item ID.
        id: String,
    },
    /// Publish a news item.
    Add {
        /// Headline.
        #[arg(short, long)]
        title: Option<String>,
        /// Body text.
        #[arg(long)]
        text: Option<String>,
        /// Image URL.
        #[arg(long)]
        image: Option<String>,
    },
    /// Edit a news item.
    Edit {
        /// News item ID.
        id: String,
        /// New headline.
        #[arg(short, long)]
        title: Option<String>,
        /// New body text.
        #[arg(long)]
        text: Option<String>,
        /// New image URL.
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a news item.
    Delete {
        /// News item ID.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: Option<ProductsCommand>,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List the catalog.
    List {
        /// Only products in this category.
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show a product with its reviews and related products.
    Show {
        /// Product ID.
        id: String,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart and the bill.
    Show,
    /// Add a product to the cart.
    Add {
        /// Product ID.
        product: String,
        /// Quantity to add.
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Set the quantity of a cart line.
    Set {
        /// Product ID.
        product: String,
        /// New quantity.
        quantity: u32,
    },
    /// Remove a product from the cart.
    Remove {
        /// Product ID.
        product: String,
    },
}

/// Arguments for the account command.
#[derive(Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: Option<AccountCommand>,
}

#[derive(Subcommand)]
pub enum AccountCommand {
    /// Show the profile and address book.
    Show,
    /// Delete an address.
    RemoveAddress {
        /// Address ID.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: Option<OrdersCommand>,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List order history.
    List {
        /// Only orders with this status.
        #[arg(short, long)]
        status: Option<String>,
        /// Minimum total in whole dollars.
        #[arg(long, requires = "max")]
        min: Option<i64>,
        /// Maximum total in whole dollars.
        #[arg(long, requires = "min")]
        max: Option<i64>,
        /// Placement month, YYYY-MM.
        #[arg(long, conflicts_with = "day")]
        month: Option<String>,
        /// Placement day, YYYY-MM-DD.
        #[arg(long)]
        day: Option<String>,
    },
    /// Show one order.
    Show {
        /// Order ID.
        id: String,
    },
    /// Cancel an order.
    Cancel {
        /// Order ID.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Place an order for the current cart.
    Checkout {
        /// Delivery address ID (prompted if omitted).
        #[arg(short, long)]
        address: Option<String>,
        /// Payment method: card, paypal or cash-on-delivery (prompted if omitted).
        #[arg(short, long)]
        payment: Option<String>,
        /// Notes for the courier.
        #[arg(short, long)]
        notes: Option<String>,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Print the path of the config file in use.
    Path,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
