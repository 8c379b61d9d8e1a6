//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod login;
pub mod merchant;
pub mod session;

use anyhow::Result;
use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use shopsmart_commerce::CommerceError;
use shopsmart_storefront::StorefrontError;

use crate::output::Output;

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Text to search for.
    pub text: Option<String>,

    /// Category id.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Minimum listing price.
    #[arg(long)]
    pub min_price: Option<Decimal>,

    /// Maximum listing price.
    #[arg(long)]
    pub max_price: Option<Decimal>,

    /// Delivery pincode (up to 6 digits).
    #[arg(short, long)]
    pub pincode: Option<String>,

    /// Only print the products view query.
    #[arg(long)]
    pub query_only: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart and its total.
    Show {
        /// Price the cart with reward points applied.
        #[arg(long)]
        use_rewards: bool,
    },
    /// Remove every unit of a product.
    Remove {
        /// Product id.
        product_id: String,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Place an order for the cart.
    Checkout {
        /// Spend reward points on this order.
        #[arg(long)]
        use_rewards: bool,

        /// Ask for home delivery.
        #[arg(long)]
        delivery: bool,

        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the merchant command.
#[derive(Args)]
pub struct MerchantArgs {
    #[command(subcommand)]
    pub command: MerchantCommand,
}

/// Merchant details given on the command line.
#[derive(Args, Clone, Default)]
pub struct MerchantFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub address_line1: Option<String>,

    #[arg(long)]
    pub address_line2: Option<String>,

    #[arg(long)]
    pub pincode: Option<String>,
}

#[derive(Subcommand)]
pub enum MerchantCommand {
    /// List merchants.
    List {
        /// Only merchants whose name or email contains this.
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one merchant.
    Get {
        merchant_id: String,
    },
    /// Create a merchant. Missing fields are prompted for.
    Create {
        #[command(flatten)]
        fields: MerchantFields,
    },
    /// Update a merchant. Omitted fields keep their current values.
    Update {
        merchant_id: String,

        #[command(flatten)]
        fields: MerchantFields,
    },
    /// Block a merchant from selling.
    Blacklist {
        merchant_id: String,
    },
    /// Lift a block.
    Unblacklist {
        merchant_id: String,
    },
    /// Delete a merchant.
    Delete {
        merchant_id: String,

        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Admin email address (prompted for when omitted).
    #[arg(short, long)]
    pub email: Option<String>,
}

/// Arguments for the logout command.
#[derive(Args)]
pub struct LogoutArgs {}

/// Arguments for the session command.
#[derive(Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: Option<SessionCommand>,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Show the saved session.
    Show,
    /// Act as a customer.
    Customer {
        user_id: String,
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
    /// Initialize a new config file.
    Init {
        /// Backend base URL.
        #[arg(long, default_value = shopsmart_data::DEFAULT_BASE_URL)]
        base_url: String,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Print field errors one per line and keep the error for the exit code.
pub(crate) fn report(output: &Output, err: StorefrontError) -> Result<()> {
    if let StorefrontError::Commerce(CommerceError::Validation(errors)) = &err {
        for field_error in errors.iter() {
            output.warn(&format!("{}: {}", field_error.field, field_error.message));
        }
    }
    Err(err.into())
}
