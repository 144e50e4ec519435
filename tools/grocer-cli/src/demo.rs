//! Demo data for `--offline`.
//!
//! Every invocation starts from the same seed; changes made by one command
//! are gone by the next.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use grocer_commerce::account::{Address, UserProfile};
use grocer_commerce::cart::CartItem;
use grocer_commerce::catalog::{Product, Review};
use grocer_commerce::ids::{AddressId, NewsItemId, OrderId, UserId};
use grocer_commerce::news::NewsItem;
use grocer_commerce::order::{Order, OrderLine, OrderStatus, PaymentMethod};
use grocer_commerce::shipping::ShippingPolicy;
use grocer_commerce::Money;
use grocer_data::{InMemoryResource, InMemorySession};
use grocer_store::Services;

fn product(id: &str, name: &str, category: &str, cents: i64) -> Product {
    let mut product = Product::new(id, name, Money::usd(cents));
    product.category = category.to_string();
    product.store = "Groceteria Central".to_string();
    product
}

fn catalog() -> Vec<Product> {
    let mut strawberries = product("strawberries", "Strawberries 500g", "fruit", 450);
    strawberries.discounted_price = Some(Money::usd(399));
    strawberries.reviews = vec![Review {
        user_name: "Sam".into(),
        rating: 5,
        comment: "Sweet and fresh.".into(),
    }];

    let mut sourdough = product("sourdough", "Sourdough loaf", "bakery", 550);
    sourdough.brand_name = "Old Mill".into();

    vec![
        strawberries,
        product("bananas", "Bananas (6)", "fruit", 220),
        product("milk", "Whole milk 1L", "dairy", 189),
        product("cheddar", "Aged cheddar 200g", "dairy", 675),
        sourdough,
        product("coffee", "Ground coffee 250g", "pantry", 899),
    ]
}

fn home() -> Address {
    Address {
        id: AddressId::new("home"),
        label: "Home".into(),
        full_name: "Alex Doe".into(),
        address1: "12 Market Street".into(),
        address2: Some("Apt 3".into()),
        city: "Springfield".into(),
        province_code: Some("IL".into()),
        zip: "62701".into(),
        country_code: "US".into(),
        phone: None,
    }
}

fn line(product: &Product, quantity: u32) -> CartItem {
    CartItem {
        product_id: product.id.clone(),
        name: product.name.clone(),
        image: product.images.first().cloned(),
        unit_price: product.effective_price(),
        quantity,
    }
}

fn past_order(id: &str, status: OrderStatus, days_ago: i64, lines: &[(&Product, u32)]) -> Order {
    let ordered_products: Vec<OrderLine> = lines
        .iter()
        .map(|(product, quantity)| OrderLine::from(&line(product, *quantity)))
        .collect();
    let subtotal = ordered_products
        .iter()
        .map(|l| l.unit_price.amount_cents * i64::from(l.quantity))
        .sum::<i64>();
    let delivery_fee = ShippingPolicy::default().delivery_fee(&Money::usd(subtotal));

    let anchor = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).single().unwrap_or_else(Utc::now);
    Order {
        id: OrderId::new(id),
        user: UserId::new("demo"),
        ordered_products,
        total_price: Money::usd(subtotal + delivery_fee.amount_cents),
        delivery_fee,
        payment_method: PaymentMethod::Card,
        address: home(),
        notes: None,
        status,
        created_at: anchor - Duration::days(days_ago),
    }
}

/// In-memory collaborators seeded with a small shop.
pub fn services() -> Services {
    let catalog = catalog();
    let cart = vec![line(&catalog[0], 2), line(&catalog[2], 1)];
    let orders = vec![
        past_order("1001", OrderStatus::Processing, 1, &[(&catalog[4], 1), (&catalog[5], 2)]),
        past_order("1000", OrderStatus::Delivered, 12, &[(&catalog[3], 3)]),
    ];
    let news = vec![NewsItem {
        id: NewsItemId::new("welcome"),
        title: "Strawberry season is here".into(),
        text: "Local strawberries are back on the shelves, now with 10% off for the first week."
            .into(),
        image: None,
        created_at: Utc::now(),
    }];

    Services {
        news: Arc::new(InMemoryResource::seeded(news)),
        products: Arc::new(InMemoryResource::seeded(catalog)),
        cart: Arc::new(InMemoryResource::seeded(cart)),
        session: Arc::new(InMemorySession::signed_in(UserProfile {
            id: UserId::new("demo"),
            first_name: "Alex".into(),
            last_name: "Doe".into(),
            email: "alex@example.com".into(),
            phone: None,
            photo: None,
        })),
        addresses: Arc::new(InMemoryResource::seeded(vec![home()])),
        orders: Arc::new(InMemoryResource::seeded(orders)),
    }
}
