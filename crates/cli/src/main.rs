//! Minicart CLI - inspect and edit the shopper's stored state.
//!
//! Works on the same storage file as the storefront, so changes show up on
//! the next page render after a restart.
//!
//! # Usage
//!
//! ```bash
//! # List the remote catalog
//! minicart catalog
//!
//! # Sign in, then add product 3 to the cart
//! minicart auth login -n Ana -e ana@example.com -p secret
//! minicart cart add 3
//!
//! # Show the cart
//! minicart cart show
//! ```
//!
//! # Commands
//!
//! - `catalog` - Fetch and list products
//! - `cart show|add|remove|set|clear` - Manage the cart
//! - `auth login|logout|status` - Mock sign-in
//! - `theme toggle` - Flip the saved theme

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use minicart_core::ProductId;

mod commands;

#[derive(Parser)]
#[command(name = "minicart")]
#[command(author, version, about = "Minicart CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the remote catalog and list it
    Catalog,
    /// Manage the stored cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Mock sign-in
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Manage the saved theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines and the total
    Show,
    /// Add one unit of a catalog product (requires sign-in)
    Add {
        /// Product ID
        id: ProductId,
    },
    /// Remove a cart line
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Set a line's quantity (values below 1 become 1)
    Set {
        /// Product ID
        id: ProductId,
        /// New quantity
        quantity: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Sign in with any non-empty name, email and password
    Login {
        /// Display name
        #[arg(short, long, default_value = "")]
        name: String,

        /// Email address
        #[arg(short, long, default_value = "")]
        email: String,

        /// Password (only checked for presence)
        #[arg(short, long, default_value = "")]
        password: String,
    },
    /// Forget the stored identity
    Logout,
    /// Show who is signed in
    Status,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Flip between light and dark
    Toggle,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Catalog => commands::catalog::list().await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show()?,
            CartAction::Add { id } => commands::cart::add(id).await?,
            CartAction::Remove { id } => commands::cart::remove(id)?,
            CartAction::Set { id, quantity } => commands::cart::set(id, &quantity)?,
            CartAction::Clear => commands::cart::clear()?,
        },
        Commands::Auth { action } => match action {
            AuthAction::Login {
                name,
                email,
                password,
            } => commands::auth::login(name, email, password)?,
            AuthAction::Logout => commands::auth::logout()?,
            AuthAction::Status => commands::auth::status()?,
        },
        Commands::Theme { action } => match action {
            ThemeAction::Toggle => commands::theme::toggle()?,
        },
    }
    Ok(())
}
