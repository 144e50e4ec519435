//! Order history, checkout and cancellation commands.

use anyhow::{bail, Context as _, Result};
use chrono::{Datelike, NaiveDate};
use dialoguer::{Confirm, Select};
use grocer_commerce::filter::{OrderFilter, PriceRange};
use grocer_commerce::ids::{AddressId, OrderId};
use grocer_commerce::order::{Order, OrderStatus, PaymentMethod};
use grocer_store::views::{CheckoutPage, OrderHistoryPage, OrderRow, Render};
use grocer_store::{CheckoutError, Storefront};

use super::cart::print_cart;
use super::{reported, OrdersArgs, OrdersCommand, Reported};
use crate::context::Context;
use crate::output::{clip, status_badge};

const PAYMENT_METHODS: [PaymentMethod; 3] = [
    PaymentMethod::Card,
    PaymentMethod::Paypal,
    PaymentMethod::CashOnDelivery,
];

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(OrdersCommand::List {
            status,
            min,
            max,
            month,
            day,
        }) => {
            let filter = build_filter(
                status.as_deref(),
                min.zip(max),
                month.as_deref(),
                day.as_deref(),
            )?;
            list_orders(filter, ctx).await
        }
        None => list_orders(OrderFilter::default(), ctx).await,
        Some(OrdersCommand::Show { id }) => show_order(&id, ctx).await,
        Some(OrdersCommand::Cancel { id, yes }) => cancel_order(&id, yes, ctx).await,
        Some(OrdersCommand::Checkout {
            address,
            payment,
            notes,
            yes,
        }) => checkout(address, payment, notes, yes, ctx).await,
    }
}

/// Turn command line flags into an order filter.
fn build_filter(
    status: Option<&str>,
    price: Option<(i64, i64)>,
    month: Option<&str>,
    day: Option<&str>,
) -> Result<OrderFilter> {
    let mut filter = OrderFilter::default();
    if let Some(status) = status {
        filter = filter.with_status(status.parse::<OrderStatus>()?);
    }
    if let Some((min, max)) = price {
        if min > max {
            bail!("--min must not exceed --max");
        }
        filter = filter.with_price(PriceRange::dollars(min, max));
    }
    if let Some(month) = month {
        let first = NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
            .with_context(|| format!("Invalid month '{}', expected YYYY-MM", month))?;
        filter = filter.in_month(first.year(), first.month());
    }
    if let Some(day) = day {
        let day = NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .with_context(|| format!("Invalid day '{}', expected YYYY-MM-DD", day))?;
        filter = filter.on_day(day);
    }
    Ok(filter)
}

async fn list_orders(filter: OrderFilter, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront().await;
    let page = OrderHistoryPage::new(storefront.orders.context().clone()).with_filter(filter);

    let rows = match page.render() {
        Render::Ready(rows) => rows,
        Render::Failed(message) => bail!("Could not load orders: {}", message),
        Render::Loading => bail!("Orders are still loading"),
    };
    if let Some(message) = page.notice() {
        ctx.output.warn(&message);
    }

    if ctx.output.is_json() {
        let state = storefront.orders.state();
        let orders: Vec<_> = rows
            .iter()
            .filter_map(|row| state.orders.find(&row.id))
            .map(|order| &**order)
            .collect();
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header("Orders");
    if rows.is_empty() {
        let hint = if page.filter().is_empty() {
            "No orders yet."
        } else {
            "No orders match the filter."
        };
        ctx.output.info(hint);
        return Ok(());
    }

    let widths = [10, 12, 12, 6, 10];
    ctx.output
        .table_row(&["ORDER", "PLACED", "STATUS", "ITEMS", "TOTAL"], &widths);
    for OrderRow {
        reference,
        placed_on,
        status,
        total,
        item_count,
        ..
    } in &rows
    {
        ctx.output.table_row(
            &[
                reference,
                placed_on,
                &status_badge(*status),
                &item_count.to_string(),
                &total.display(),
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.info(&format!("Total: {} order(s)", rows.len()));
    Ok(())
}

fn print_order(order: &Order, ctx: &Context) {
    ctx.output.header(&format!("Order {}", order.reference()));
    ctx.output.kv("ID", order.id.as_str());
    ctx.output.kv("Placed", &order.created_at.format("%Y-%m-%d %H:%M UTC").to_string());
    ctx.output.kv("Status", &status_badge(order.status));
    ctx.output.kv("Payment", order.payment_method.as_str());
    ctx.output.kv("Deliver to", &order.address.one_line());
    if let Some(notes) = &order.notes {
        ctx.output.kv("Notes", notes);
    }

    ctx.output.info("");
    for line in &order.ordered_products {
        ctx.output.list_item(&format!(
            "{} x {} @ {}",
            line.quantity,
            clip(&line.name, 40),
            line.unit_price.display()
        ));
    }
    ctx.output.info("");
    ctx.output.kv("Delivery", &order.delivery_fee.display());
    ctx.output.kv("Total", &order.total_price.display());
}

async fn show_order(id: &str, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront().await;
    let order = reported(storefront.orders.get_order(&OrderId::new(id)).await)?;

    if ctx.output.is_json() {
        ctx.output.json(&*order);
    } else {
        print_order(&order, ctx);
    }
    Ok(())
}

async fn cancel_order(id: &str, yes: bool, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront().await;
    let id = OrderId::new(id);

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Cancel order {}?", id))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    let order = reported(storefront.orders.cancel_order(&id).await)?;
    if ctx.output.is_json() {
        ctx.output.json(&*order);
    }
    Ok(())
}

fn choose_address(storefront: &Storefront, address: Option<String>) -> Result<AddressId> {
    if let Some(id) = address {
        return Ok(AddressId::new(id));
    }

    let state = storefront.user.state();
    let addresses = &state.addresses.collection;
    match addresses.len() {
        0 => bail!("No saved addresses; add one before checking out"),
        1 => Ok(addresses[0].id.clone()),
        _ => {
            let labels: Vec<String> = addresses
                .iter()
                .map(|a| format!("{}: {}", a.label, a.one_line()))
                .collect();
            let index = Select::new()
                .with_prompt("Deliver to")
                .items(&labels)
                .default(0)
                .interact()?;
            Ok(addresses[index].id.clone())
        }
    }
}

fn choose_payment(payment: Option<String>) -> Result<PaymentMethod> {
    if let Some(payment) = payment {
        return Ok(payment.parse::<PaymentMethod>()?);
    }

    let labels: Vec<&str> = PAYMENT_METHODS.iter().map(|m| m.as_str()).collect();
    let index = Select::new()
        .with_prompt("Payment method")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(PAYMENT_METHODS[index])
}

async fn checkout(
    address: Option<String>,
    payment: Option<String>,
    notes: Option<String>,
    yes: bool,
    ctx: &Context,
) -> Result<()> {
    let storefront = ctx.storefront().await;
    if !storefront.user.state().is_signed_in() {
        return Err(CheckoutError::SignedOut.into());
    }

    let address = choose_address(&storefront, address)?;
    if storefront.user.state().addresses.find(&address).is_none() {
        bail!("No address with ID '{}'", address);
    }
    storefront.user.select_address(Some(address));
    let payment = choose_payment(payment)?;

    print_cart(&storefront, ctx)?;
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Place this order?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    let page = CheckoutPage::new(&storefront);
    let order = match page.place_order(Some(payment), notes).await {
        Ok(order) => order,
        Err(CheckoutError::Api(_)) => return Err(Reported.into()),
        Err(other) => return Err(other.into()),
    };

    if ctx.output.is_json() {
        ctx.output.json(&*order);
    } else {
        print_order(&order, ctx);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter() {
        let filter =
            build_filter(Some("delivered"), Some((10, 50)), Some("2024-05"), None).unwrap();
        assert_eq!(filter.status, Some(OrderStatus::Delivered));
        assert_eq!(filter.price, Some(PriceRange::dollars(10, 50)));
        assert_eq!(filter.month, Some((2024, 5)));
        assert_eq!(filter.day, None);
    }

    #[test]
    fn test_build_filter_rejects_bad_input() {
        assert!(build_filter(Some("lost"), None, None, None).is_err());
        assert!(build_filter(None, Some((50, 10)), None, None).is_err());
        assert!(build_filter(None, None, Some("May 2024"), None).is_err());
        assert!(build_filter(None, None, None, Some("2024-13-01")).is_err());
    }

    #[test]
    fn test_empty_filter() {
        assert!(build_filter(None, None, None, None).unwrap().is_empty());
    }
}
