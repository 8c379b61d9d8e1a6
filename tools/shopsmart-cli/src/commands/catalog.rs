//! Category listing and product search.

use anyhow::Result;
use shopsmart_auth::{Session, UserType};
use shopsmart_commerce::catalog::ProductSearch;
use shopsmart_commerce::{CategoryId, UserId};
use shopsmart_storefront::{CatalogBrowser, Route};

use super::{report, CategoriesArgs, SearchArgs};
use crate::context::Context;

/// Catalog reads need no particular user; any saved session works, and an
/// anonymous one is used otherwise.
fn browser(ctx: &Context) -> Result<CatalogBrowser> {
    let session = match &ctx.config.session {
        Some(record) => Session::from_record(record.clone()),
        None => Session::establish(UserId::new("anonymous"), UserType::Customer),
    };
    Ok(CatalogBrowser::new(
        ctx.services()?,
        ctx.notifier(),
        session,
        ctx.endpoints()?,
    ))
}

/// Run the categories command.
pub async fn run_categories(_args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let browser = browser(ctx)?;
    let spinner = ctx.output.spinner("Loading categories...");
    let options = browser.category_options().await;
    spinner.finish_and_clear();
    let options = match options {
        Ok(options) => options,
        Err(err) => return report(&ctx.output, err),
    };

    if ctx.output.is_json() {
        ctx.output.json(&options);
        return Ok(());
    }

    ctx.output.header("Categories");
    for option in &options {
        match &option.value {
            Some(id) => ctx.output.list_item(&format!("{} ({})", option.label, id)),
            None => ctx.output.list_item(&option.label),
        }
    }
    Ok(())
}

/// Run the search command.
pub async fn run_search(args: SearchArgs, ctx: &Context) -> Result<()> {
    let mut search = ProductSearch::new()
        .with_category(args.category.map(CategoryId::new))
        .with_price_range(args.min_price, args.max_price);
    if let Some(text) = args.text {
        search = search.with_text(text);
    }
    if let Some(pincode) = args.pincode {
        search = search.with_pincode(pincode);
    }

    let browser = browser(ctx)?;
    if args.query_only {
        return match browser.apply_filter(&search) {
            Ok(route) => {
                println!("{route}");
                Ok(())
            }
            Err(err) => report(&ctx.output, err),
        };
    }

    let spinner = ctx.output.spinner("Searching...");
    let products = browser.search(&search).await;
    spinner.finish_and_clear();
    let products = match products {
        Ok(products) => products,
        Err(err) => return report(&ctx.output, err),
    };

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("{} product(s)", products.len()));
    let widths = [14, 32, 12, 8];
    ctx.output.table_row(&["ID", "NAME", "PRICE", "STOCK"], &widths);
    for product in &products {
        let stock = if product.in_stock() {
            product.available_stock.to_string()
        } else {
            "out".to_string()
        };
        ctx.output.table_row(
            &[
                product.product_id.as_str(),
                &product.product_name,
                &product.listing_price.display(),
                &stock,
            ],
            &widths,
        );
    }
    ctx.output.debug(&format!(
        "view: {}",
        Route::Products {
            query: ctx.endpoints()?.products_view_query(&search)
        }
    ));
    Ok(())
}
