//! Merchant administration commands.

use anyhow::Result;
use dialoguer::{Confirm, Input};
use shopsmart_auth::UserType;
use shopsmart_commerce::merchant::{FormMode, Merchant, MerchantForm};
use shopsmart_commerce::MerchantId;
use shopsmart_storefront::AdminConsole;

use super::{report, MerchantArgs, MerchantCommand, MerchantFields};
use crate::context::Context;
use crate::output::merchant_badge;

/// Run the merchant command.
pub async fn run(args: MerchantArgs, ctx: &Context) -> Result<()> {
    let session = ctx.session(UserType::Admin)?;
    let mut console = AdminConsole::new(ctx.services()?, ctx.notifier(), session);

    match args.command {
        MerchantCommand::List { search } => list(&mut console, search.as_deref(), ctx).await,
        MerchantCommand::Get { merchant_id } => get(&console, &merchant_id, ctx).await,
        MerchantCommand::Create { fields } => create(&mut console, fields, ctx).await,
        MerchantCommand::Update {
            merchant_id,
            fields,
        } => update(&mut console, &merchant_id, fields, ctx).await,
        MerchantCommand::Blacklist { merchant_id } => {
            let id = MerchantId::new(merchant_id);
            match console.blacklist(&id).await {
                Ok(()) => Ok(()),
                Err(err) => report(&ctx.output, err),
            }
        }
        MerchantCommand::Unblacklist { merchant_id } => {
            let id = MerchantId::new(merchant_id);
            match console.unblacklist(&id).await {
                Ok(()) => Ok(()),
                Err(err) => report(&ctx.output, err),
            }
        }
        MerchantCommand::Delete { merchant_id, yes } => {
            delete(&mut console, &merchant_id, yes, ctx).await
        }
    }
}

async fn list(console: &mut AdminConsole, search: Option<&str>, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading merchants...");
    let loaded = console.load_merchants().await.map(|_| ());
    spinner.finish_and_clear();
    if let Err(err) = loaded {
        return report(&ctx.output, err);
    }

    let directory = console.directory();
    let merchants: Vec<&Merchant> = match search {
        Some(needle) => directory.search(needle).collect(),
        None => directory.merchants().iter().collect(),
    };

    if ctx.output.is_json() {
        ctx.output.json(&merchants);
        return Ok(());
    }

    ctx.output.header(&format!(
        "Merchants ({} shown, {} blocked)",
        merchants.len(),
        directory.blacklisted_count()
    ));
    let widths = [38, 24, 30, 8];
    ctx.output
        .table_row(&["ID", "NAME", "EMAIL", "STATUS"], &widths);
    for merchant in merchants {
        let id = merchant
            .merchant_id
            .as_ref()
            .map(MerchantId::as_str)
            .unwrap_or("-");
        ctx.output.table_row(
            &[
                id,
                &merchant.name,
                &merchant.email_address,
                &merchant_badge(merchant.blacklisted),
            ],
            &widths,
        );
    }
    Ok(())
}

async fn get(console: &AdminConsole, merchant_id: &str, ctx: &Context) -> Result<()> {
    let merchant = match console.get(&MerchantId::new(merchant_id)).await {
        Ok(merchant) => merchant,
        Err(err) => return report(&ctx.output, err),
    };

    if ctx.output.is_json() {
        ctx.output.json(&merchant);
        return Ok(());
    }

    ctx.output.header(&merchant.name);
    ctx.output.kv("Email", &merchant.email_address);
    ctx.output.kv("Phone", &merchant.phone_number);
    ctx.output.kv("Address", &merchant.address_line1);
    if let Some(line2) = &merchant.address_line2 {
        ctx.output.kv("", line2);
    }
    ctx.output.kv("Pincode", &merchant.pincode);
    ctx.output.kv("Status", &merchant_badge(merchant.blacklisted));
    Ok(())
}

async fn create(console: &mut AdminConsole, fields: MerchantFields, ctx: &Context) -> Result<()> {
    let form = fill_form(MerchantForm::default(), fields, FormMode::Create)?;
    match console.create(&form).await {
        Ok(()) => Ok(()),
        Err(err) => report(&ctx.output, err),
    }
}

async fn update(
    console: &mut AdminConsole,
    merchant_id: &str,
    fields: MerchantFields,
    ctx: &Context,
) -> Result<()> {
    let merchant_id = MerchantId::new(merchant_id);
    let current = match console.edit_form(&merchant_id).await {
        Ok(form) => form,
        Err(err) => return report(&ctx.output, err),
    };

    let form = apply_fields(current, fields);
    match console.update(&merchant_id, &form).await {
        Ok(()) => Ok(()),
        Err(err) => report(&ctx.output, err),
    }
}

async fn delete(console: &mut AdminConsole, merchant_id: &str, yes: bool, ctx: &Context) -> Result<()> {
    if !yes
        && !Confirm::new()
            .with_prompt(format!("Delete merchant {merchant_id}? This cannot be undone"))
            .default(false)
            .interact()?
    {
        ctx.output.info("Cancelled");
        return Ok(());
    }

    match console.delete(&MerchantId::new(merchant_id)).await {
        Ok(()) => Ok(()),
        Err(err) => report(&ctx.output, err),
    }
}

/// Overlay the given fields on a form.
fn apply_fields(mut form: MerchantForm, fields: MerchantFields) -> MerchantForm {
    let MerchantFields {
        name,
        email,
        phone,
        address_line1,
        address_line2,
        pincode,
    } = fields;
    for (slot, value) in [
        (&mut form.name, name),
        (&mut form.email, email),
        (&mut form.phone, phone),
        (&mut form.address_line1, address_line1),
        (&mut form.address_line2, address_line2),
        (&mut form.pincode, pincode),
    ] {
        if let Some(value) = value {
            *slot = value;
        }
    }
    form
}

/// Overlay the given fields, then prompt for any field that still fails
/// validation, showing its message.
fn fill_form(form: MerchantForm, fields: MerchantFields, mode: FormMode) -> Result<MerchantForm> {
    let mut form = apply_fields(form, fields);
    for field in MerchantForm::FIELDS {
        while let Some(message) = form.validate_field(field, mode) {
            let slot = match field {
                "name" => &mut form.name,
                "email" => &mut form.email,
                "phone" => &mut form.phone,
                "addressLine1" => &mut form.address_line1,
                "addressLine2" => &mut form.address_line2,
                _ => &mut form.pincode,
            };
            *slot = Input::new()
                .with_prompt(format!("{field} ({message})"))
                .allow_empty(true)
                .interact_text()?;
        }
    }
    Ok(form)
}
