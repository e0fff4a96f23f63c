//! Glowcart CLI - order administration and storefront inspection.
//!
//! # Usage
//!
//! ```bash
//! # Pending orders for customers named "sara", second page
//! glowcart orders list --status pending --user sara --page 2
//!
//! # Mark an order as completed
//! glowcart orders set-status 17 completed
//!
//! # Cheapest cleansers first
//! glowcart products list --category Cleansers --sort price-asc
//!
//! # Add a product to a user's cart and save it
//! glowcart cart add --user 12 --product 4 --quantity 2
//!
//! # Fix a customer's email without touching their cart
//! glowcart users edit 12 --email sara.ali@example.com
//! ```
//!
//! # Commands
//!
//! - `orders` - List, update and delete orders
//! - `products` - Browse the product catalog
//! - `users` - List, edit and delete user records
//! - `cart` - Inspect and edit a user's cart and favorites

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use glowcart_core::{OrderStatus, ProfileEdit};
use glowcart_core::view::{CategoryFilter, SortKey, StatusFilter};
use glowcart_storefront::{AppState, StorefrontConfig};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "glowcart")]
#[command(author, version, about = "Glowcart storefront and admin tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage user records
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Work with a user's cart and favorites
    Cart {
        /// Session token to sign in with
        #[arg(long, global = true)]
        token: Option<String>,

        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders, filtered and paginated
    List {
        /// Status to show (`all`, `pending`, `completed`, `canceled`)
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,

        /// Customer name contains
        #[arg(short, long, default_value = "")]
        user: String,

        /// Order ID contains
        #[arg(long, default_value = "")]
        id: String,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Change an order's status
    SetStatus {
        /// Order ID
        id: String,

        /// New status (`pending`, `completed`, `canceled`)
        status: OrderStatus,
    },
    /// Delete an order
    Delete {
        /// Order ID
        id: String,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products, filtered, sorted and paginated
    List {
        /// Category to show, or `all`
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,

        /// Lowest price in dollars
        #[arg(long)]
        min: Option<u32>,

        /// Highest price in dollars
        #[arg(long)]
        max: Option<u32>,

        /// Sort order (`popular`, `newest`, `price-asc`, `price-desc`)
        #[arg(short, long, default_value = "popular")]
        sort: SortKey,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Show one product
    Show {
        /// Product ID
        id: i64,
    },
    /// List product categories
    Categories,
}

#[derive(Subcommand)]
enum UsersAction {
    /// List user records
    List {
        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Change a user's name, email or password, keeping the rest of the record
    Edit {
        /// User ID
        id: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New email address
        #[arg(long)]
        email: Option<String>,
        /// New password
        #[arg(long)]
        password: Option<String>,
    },
    /// Delete a user record
    Delete {
        /// User ID
        id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show a user's cart, favorites and checkout totals
    Show {
        /// User ID
        #[arg(short, long)]
        user: String,
    },
    /// Add a product to a user's cart and save it
    Add {
        /// User ID
        #[arg(short, long)]
        user: String,

        /// Product ID
        #[arg(short, long)]
        product: i64,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from a user's cart and save it
    Remove {
        /// User ID
        #[arg(short, long)]
        user: String,

        /// Product ID
        #[arg(short, long)]
        product: i64,
    },
    /// Favorite or unfavorite a product and save it
    Favorite {
        /// User ID
        #[arg(short, long)]
        user: String,

        /// Product ID
        #[arg(short, long)]
        product: i64,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "glowcart_storefront=info,glowcart_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    // Return instead of exiting so the Sentry guard flushes on drop
    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), commands::CommandError> {
    let state = AppState::new(config)?;

    match cli.command {
        Commands::Orders { action } => match action {
            OrdersAction::List {
                status,
                user,
                id,
                page,
            } => commands::orders::list(&state, status, user, id, page).await?,
            OrdersAction::SetStatus { id, status } => {
                commands::orders::set_status(&state, &id, status).await?;
            }
            OrdersAction::Delete { id } => commands::orders::delete(&state, &id).await?,
        },
        Commands::Products { action } => match action {
            ProductsAction::List {
                category,
                min,
                max,
                sort,
                page,
            } => commands::products::list(&state, category, min, max, sort, page).await?,
            ProductsAction::Show { id } => commands::products::show(&state, id).await?,
            ProductsAction::Categories => commands::products::categories(&state).await?,
        },
        Commands::Users { action } => match action {
            UsersAction::List { page } => commands::users::list(&state, page).await?,
            UsersAction::Edit {
                id,
                name,
                email,
                password,
            } => {
                let edit = ProfileEdit {
                    name,
                    email,
                    password,
                };
                commands::users::edit(&state, &id, edit).await?;
            }
            UsersAction::Delete { id } => commands::users::delete(&state, &id).await?,
        },
        Commands::Cart { token, action } => {
            let token = token.unwrap_or_default();
            match action {
                CartAction::Show { user } => commands::cart::show(&state, token, &user).await?,
                CartAction::Add {
                    user,
                    product,
                    quantity,
                } => commands::cart::add(&state, token, &user, product, quantity).await?,
                CartAction::Remove { user, product } => {
                    commands::cart::remove(&state, token, &user, product).await?;
                }
                CartAction::Favorite { user, product } => {
                    commands::cart::favorite(&state, token, &user, product).await?;
                }
            }
        }
    }
    Ok(())
}
