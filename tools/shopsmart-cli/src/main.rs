//! ShopSmart CLI - the storefront from a terminal.
//!
//! Commands:
//! - `shopsmart categories` - List product categories
//! - `shopsmart search` - Search products
//! - `shopsmart cart` - Show, edit and check out the cart
//! - `shopsmart merchant` - Administer merchants
//! - `shopsmart login` / `logout` - Admin OTP sign-in
//! - `shopsmart session` - Show or switch the saved session
//! - `shopsmart config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    CartArgs, CategoriesArgs, ConfigArgs, LoginArgs, LogoutArgs, MerchantArgs, SearchArgs,
    SessionArgs,
};

/// ShopSmart CLI - browse, buy and administer from the terminal
#[derive(Parser)]
#[command(name = "shopsmart")]
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
    #[arg(short, long, global = true, env = "SHOPSMART_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List product categories
    Categories(CategoriesArgs),

    /// Search products
    Search(SearchArgs),

    /// Show, edit and check out the cart
    Cart(CartArgs),

    /// Administer merchants
    Merchant(MerchantArgs),

    /// Sign in as an admin with an emailed OTP
    Login(LoginArgs),

    /// Sign out
    Logout(LogoutArgs),

    /// Show or switch the saved session
    Session(SessionArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };
    logging::init(&ctx.config.logging, cli.verbose)?;

    // Execute command
    let result = match cli.command {
        Commands::Categories(args) => commands::catalog::run_categories(args, &ctx).await,
        Commands::Search(args) => commands::catalog::run_search(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Merchant(args) => commands::merchant::run(args, &ctx).await,
        Commands::Login(args) => commands::login::run(args, &ctx).await,
        Commands::Logout(args) => commands::login::run_logout(args, &ctx).await,
        Commands::Session(args) => commands::session::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
