//! Catalog commands.

use anyhow::{bail, Result};
use grocer_commerce::catalog::Product;
use grocer_commerce::ids::ProductId;
use grocer_store::views::{Opened, ProductDetailsPage, Render};

use super::{ProductsArgs, ProductsCommand, Reported};
use crate::context::Context;
use crate::output::clip;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(ProductsCommand::List { category }) => list_products(category.as_deref(), ctx).await,
        None => list_products(None, ctx).await,
        Some(ProductsCommand::Show { id }) => show_product(&id, ctx).await,
    }
}

fn price_label(product: &Product) -> String {
    match product.discount_percentage() {
        Some(percent) if product.is_on_sale() => format!(
            "{} (-{:.0}%)",
            product.effective_price().display(),
            percent
        ),
        _ => product.effective_price().display(),
    }
}

async fn list_products(category: Option<&str>, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront().await;
    let state = storefront.products.state();
    let products = &state.products;

    if let (true, Some(message)) = (products.collection.is_empty(), &products.error) {
        bail!("Could not load products: {}", message);
    }

    let shown: Vec<&Product> = products
        .collection
        .iter()
        .map(|product| &**product)
        .filter(|product| category.map_or(true, |c| product.category.eq_ignore_ascii_case(c)))
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&shown);
        return Ok(());
    }

    ctx.output.header("Products");
    if shown.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }

    let widths = [16, 32, 12, 18];
    ctx.output.table_row(&["ID", "NAME", "CATEGORY", "PRICE"], &widths);
    for product in &shown {
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &clip(&product.name, 32),
                &product.category,
                &price_label(product),
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.info(&format!("Total: {} product(s)", shown.len()));
    Ok(())
}

async fn show_product(id: &str, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront().await;
    let page = ProductDetailsPage::new(storefront.products.context().clone());

    match page.open(&ProductId::new(id)).await {
        Opened::Current(Ok(_)) => {}
        Opened::Current(Err(_)) | Opened::Superseded => return Err(Reported.into()),
    }

    let details = match page.render() {
        Render::Ready(details) => details,
        Render::Failed(message) => bail!("{}", message),
        Render::Loading => bail!("Product is still loading"),
    };
    let product = &details.product;

    if ctx.output.is_json() {
        ctx.output.json(&**product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Price", &price_label(product));
    if !product.brand_name.is_empty() {
        ctx.output.kv("Brand", &product.brand_name);
    }
    if !product.category.is_empty() {
        ctx.output.kv("Category", &product.category);
    }
    if !product.weight.is_empty() {
        ctx.output.kv("Weight", &product.weight);
    }
    ctx.output.kv("In stock", if product.in_stock { "yes" } else { "no" });
    if !product.description.is_empty() {
        ctx.output.info("");
        println!("{}", product.description);
    }

    if !details.reviews.is_empty() {
        let rating = product
            .average_rating()
            .map(|r| format!(" ({:.1}/5)", r))
            .unwrap_or_default();
        ctx.output.header(&format!("Reviews{}", rating));
        for review in &details.reviews {
            ctx.output.list_item(&format!(
                "{} {}: {}",
                "★".repeat(usize::from(review.rating.min(5))),
                review.user_name,
                review.comment
            ));
        }
    }

    if !details.related.is_empty() {
        ctx.output.header("You may also like");
        for related in &details.related {
            ctx.output
                .list_item(&format!("{} - {}", related.name, price_label(related)));
        }
    }

    Ok(())
}
