//! Devo Store CLI - Browse the catalog and manage a persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # List products, cheapest first
//! devo-cli catalog list --sort price-low
//!
//! # Add a product and show the cart in euros
//! devo-cli cart add 3
//! devo-cli --currency EUR cart show
//!
//! # Set a quantity (0 removes the line)
//! devo-cli cart set 3 2
//!
//! # Build a checkout request and clear the cart
//! devo-cli checkout --email buyer@example.com
//! ```
//!
//! # Commands
//!
//! - `catalog list` / `catalog show` - Browse products
//! - `cart show|add|remove|set|clear` - Manage the cart
//! - `checkout` - Print a checkout request as JSON
//!
//! Configuration is read from `DEVO_*` environment variables (and `.env`);
//! `--currency` and `--locale` override the configured display settings.
//! Logs go to stderr, filtered by `RUST_LOG`; `--log-format json` switches
//! them to one JSON object per line.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};
use devo_store_core::{CurrencyCode, Locale, ProductId};
use devo_store_storefront::catalog::ProductSort;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "devo-cli")]
#[command(author, version, about = "Devo Store command-line storefront")]
struct Cli {
    /// Display currency (USD, EUR, GBP, CAD, AUD, IDR)
    #[arg(long, global = true)]
    currency: Option<CurrencyCode>,

    /// Display language (en, es, fr, id)
    #[arg(long, global = true)]
    locale: Option<Locale>,

    /// Log output format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Build a checkout request and clear the cart
    Checkout {
        /// Contact email for the order
        #[arg(short, long)]
        email: Option<String>,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// Only show these categories (repeatable)
        #[arg(short, long)]
        category: Vec<String>,

        /// Sort order (`featured`, `price-low`, `price-high`, `rating`)
        #[arg(short, long, default_value = "featured")]
        sort: ProductSort,
    },
    /// Show one product
    Show {
        /// Product ID
        id: ProductId,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show {
        /// Print the HTML fragments instead of a table
        #[arg(long)]
        html: bool,
    },
    /// Add one unit of a product
    Add {
        /// Product ID
        id: ProductId,
    },
    /// Remove a product's line
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Set a product's quantity (0 removes it)
    Set {
        /// Product ID
        id: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every line
    Clear,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(format: LogFormat) {
    // Logs go to stderr so command output on stdout stays pipeable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "devo_store_cli=info,devo_store_storefront=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    match format {
        LogFormat::Text => registry.with(fmt_layer).init(),
        LogFormat::Json => registry.with(fmt_layer.json()).init(),
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = commands::Context::from_env(cli.currency, cli.locale)?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { category, sort } => {
                commands::catalog::list(&ctx, category, sort)?;
            }
            CatalogAction::Show { id } => commands::catalog::show(&ctx, id)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show { html } => commands::cart::show(&ctx, html)?,
            CartAction::Add { id } => commands::cart::add(&ctx, id)?,
            CartAction::Remove { id } => commands::cart::remove(&ctx, id)?,
            CartAction::Set { id, quantity } => commands::cart::set(&ctx, id, quantity)?,
            CartAction::Clear => commands::cart::clear(&ctx)?,
        },
        Commands::Checkout { email } => commands::checkout::run(&ctx, email.as_deref())?,
    }
    Ok(())
}
