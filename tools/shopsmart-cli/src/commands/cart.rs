//! Cart and checkout commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use serde_json::json;
use shopsmart_auth::UserType;
use shopsmart_commerce::ProductId;
use shopsmart_storefront::{CartController, CheckoutOutcome};

use super::{report, CartArgs, CartCommand};
use crate::context::Context;
use crate::output::price_cell;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(CartCommand::Show { use_rewards: false }) {
        CartCommand::Show { use_rewards } => show(use_rewards, ctx).await,
        CartCommand::Remove { product_id } => remove(&product_id, ctx).await,
        CartCommand::Clear { yes } => clear(yes, ctx).await,
        CartCommand::Checkout {
            use_rewards,
            delivery,
            yes,
        } => checkout(use_rewards, delivery, yes, ctx).await,
    }
}

/// Build a controller and load the cart plus customer details.
async fn loaded(ctx: &Context) -> Result<CartController> {
    let session = ctx.session(UserType::Customer)?;
    let mut controller = CartController::new(
        ctx.services()?,
        ctx.notifier(),
        session,
        ctx.config.api.currency,
    );

    let spinner = ctx.output.spinner("Loading cart...");
    let result = match controller.refresh().await {
        Ok(()) => controller.load_customer().await,
        Err(err) => Err(err),
    };
    spinner.finish_and_clear();
    if let Err(err) = result {
        report(&ctx.output, err)?;
    }
    Ok(controller)
}

fn print_cart(controller: &CartController, ctx: &Context) -> Result<()> {
    let summary = controller.summary()?;
    let cart = controller.cart();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "cart": cart,
            "summary": summary,
            "useRewardPoints": controller.uses_reward_points(),
        }));
        return Ok(());
    }

    if let Some(profile) = controller.customer().profile() {
        ctx.output
            .header(&format!("{}'s cart ({} items)", profile.name, cart.line_count()));
    } else {
        ctx.output.header(&format!("Cart ({} items)", cart.line_count()));
    }

    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    let widths = [14, 28, 6, 12];
    ctx.output
        .table_row(&["PRODUCT", "NAME", "QTY", "PRICE"], &widths);
    for line in cart.lines() {
        ctx.output.table_row(
            &[
                line.product_id.as_str(),
                &line.product_name,
                &line.quantity.to_string(),
                &price_cell(line.unit_price.as_ref()),
            ],
            &widths,
        );
    }
    if let Some(rewards) = controller.customer().rewards() {
        ctx.output
            .kv("Rewards available", &rewards.reward_amount.display());
    }
    ctx.output.summary(&summary);
    Ok(())
}

async fn show(use_rewards: bool, ctx: &Context) -> Result<()> {
    let mut controller = loaded(ctx).await?;
    controller.set_use_reward_points(use_rewards)?;
    print_cart(&controller, ctx)
}

async fn remove(product_id: &str, ctx: &Context) -> Result<()> {
    let mut controller = loaded(ctx).await?;
    let product_id = ProductId::new(product_id);

    match controller.remove_product(&product_id).await {
        Ok(true) => ctx.output.success(&format!("Removed {product_id}")),
        Ok(false) => ctx.output.info(&format!("{product_id} is not in the cart")),
        Err(err) => return report(&ctx.output, err),
    }
    print_cart(&controller, ctx)
}

async fn clear(yes: bool, ctx: &Context) -> Result<()> {
    let mut controller = loaded(ctx).await?;
    if controller.cart().is_empty() {
        ctx.output.info("Your cart is already empty.");
        return Ok(());
    }

    if !yes
        && !Confirm::new()
            .with_prompt(format!(
                "Remove all {} items from your cart?",
                controller.cart().line_count()
            ))
            .default(false)
            .interact()?
    {
        ctx.output.info("Cancelled");
        return Ok(());
    }

    if let Err(err) = controller.clear().await {
        return report(&ctx.output, err);
    }
    ctx.output.success("Cart cleared");
    Ok(())
}

async fn checkout(use_rewards: bool, delivery: bool, yes: bool, ctx: &Context) -> Result<()> {
    let mut controller = loaded(ctx).await?;
    controller.set_use_reward_points(use_rewards)?;
    controller.set_requires_delivery(delivery)?;
    print_cart(&controller, ctx)?;

    if controller.cart().is_empty() {
        bail!("Nothing to check out");
    }

    if !yes
        && !Confirm::new()
            .with_prompt(format!("Place order for {}?", controller.summary()?.total.display()))
            .default(true)
            .interact()?
    {
        ctx.output.info("Cancelled");
        return Ok(());
    }

    let spinner = ctx.output.spinner("Placing order...");
    let result = controller.checkout().await;
    spinner.finish_and_clear();

    match result {
        Ok(CheckoutOutcome::Placed) => {
            if ctx.output.is_json() {
                ctx.output
                    .json(&json!({ "state": controller.checkout_state().as_str() }));
            }
            Ok(())
        }
        Ok(CheckoutOutcome::InProgress) => {
            ctx.output.warn("An order is already being placed");
            Ok(())
        }
        Err(err) => report(&ctx.output, err),
    }
}
