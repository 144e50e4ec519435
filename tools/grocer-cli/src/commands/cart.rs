//! Cart commands.

use anyhow::{bail, Context as _, Result};
use grocer_commerce::cart::{CartItemDraft, CartItemPatch};
use grocer_commerce::ids::ProductId;
use grocer_store::views::{Bill, CheckoutPage, Render};
use grocer_store::Storefront;

use super::{reported, CartArgs, CartCommand};
use crate::context::Context;
use crate::output::clip;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(CartCommand::Show) | None => show_cart(ctx).await,
        Some(CartCommand::Add { product, quantity }) => add_item(&product, quantity, ctx).await,
        Some(CartCommand::Set { product, quantity }) => set_quantity(&product, quantity, ctx).await,
        Some(CartCommand::Remove { product }) => remove_item(&product, ctx).await,
    }
}

async fn show_cart(ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront().await;
    print_cart(&storefront, ctx)
}

/// Print the cart lines followed by the bill card.
pub fn print_cart(storefront: &Storefront, ctx: &Context) -> Result<()> {
    let bill = match CheckoutPage::new(storefront).render() {
        Render::Ready(bill) => bill,
        Render::Failed(message) => bail!("Could not load cart: {}", message),
        Render::Loading => bail!("Cart is still loading"),
    };
    let state = storefront.cart.state();

    if ctx.output.is_json() {
        let lines: Vec<_> = state.items.collection.iter().map(|line| &**line).collect();
        ctx.output.json(&serde_json::json!({
            "items": lines,
            "subtotal": bill.subtotal.to_decimal(),
            "deliveryFee": bill.delivery_fee.to_decimal(),
            "total": bill.total.to_decimal(),
        }));
        return Ok(());
    }

    ctx.output.header("Cart");
    if state.items.collection.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    let widths = [16, 32, 5, 10];
    ctx.output.table_row(&["ID", "ITEM", "QTY", "TOTAL"], &widths);
    for line in &state.items.collection {
        let total = line
            .line_total()
            .map(|t| t.display())
            .unwrap_or_else(|_| "-".to_string());
        ctx.output.table_row(
            &[
                line.product_id.as_str(),
                &clip(&line.name, 32),
                &line.quantity.to_string(),
                &total,
            ],
            &widths,
        );
    }

    print_bill(&bill, ctx);
    Ok(())
}

fn print_bill(bill: &Bill, ctx: &Context) {
    ctx.output.info("");
    ctx.output.kv("Items", &bill.item_count.to_string());
    ctx.output.kv("Subtotal", &bill.subtotal.display());
    let delivery = if bill.delivery_fee.is_zero() {
        "Free".to_string()
    } else {
        bill.delivery_fee.display()
    };
    ctx.output.kv("Delivery", &delivery);
    ctx.output.kv("Total", &bill.total.display());
}

async fn add_item(product: &str, quantity: u32, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront().await;
    let id = ProductId::new(product);

    let cached = storefront.products.state().products.find(&id).cloned();
    let product = match cached {
        Some(product) => product,
        None => reported(storefront.products.get_product(&id).await)?,
    };
    let draft = CartItemDraft::for_product(&product, quantity)
        .with_context(|| format!("Cannot add {} x {}", quantity, product.name))?;

    let line = reported(storefront.cart.add_to_cart(draft).await)?;
    ctx.output.debug(&format!("{} now x{}", line.name, line.quantity));
    print_cart(&storefront, ctx)
}

async fn set_quantity(product: &str, quantity: u32, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront().await;
    let id = ProductId::new(product);
    if storefront.cart.state().line(&id).is_none() {
        bail!("'{}' is not in the cart", product);
    }

    if quantity == 0 {
        reported(storefront.cart.remove_from_cart(&id).await)?;
    } else {
        let patch = CartItemPatch::new(quantity)?;
        reported(storefront.cart.update_quantity(&id, patch).await)?;
    }
    print_cart(&storefront, ctx)
}

async fn remove_item(product: &str, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront().await;
    reported(storefront.cart.remove_from_cart(&ProductId::new(product)).await)?;
    print_cart(&storefront, ctx)
}
