//! Catalog records: products and their reviews.

use crate::entity::Entity;
use crate::ids::ProductId;
use crate::money::{dollars, Money};
use serde::{Deserialize, Serialize};

/// A product as listed by the catalog API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// Brand shown under the name.
    #[serde(default)]
    pub brand_name: String,
    /// Category name.
    #[serde(default)]
    pub category: String,
    /// Store the product ships from.
    #[serde(default)]
    pub store: String,
    /// Package weight as displayed ("500g").
    #[serde(default)]
    pub weight: String,
    /// Image URLs, first one is the cover.
    #[serde(default)]
    pub images: Vec<String>,
    /// Regular price.
    #[serde(with = "dollars")]
    pub price: Money,
    /// Sale price, if discounted.
    #[serde(default, with = "dollars::option")]
    pub discounted_price: Option<Money>,
    /// Whether the product can be ordered.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Customer reviews.
    #[serde(default)]
    pub reviews: Vec<Review>,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Create a product with the required fields.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            brand_name: String::new(),
            category: String::new(),
            store: String::new(),
            weight: String::new(),
            images: Vec::new(),
            price,
            discounted_price: None,
            in_stock: true,
            reviews: Vec::new(),
        }
    }

    /// Price the customer actually pays.
    pub fn effective_price(&self) -> Money {
        match self.discounted_price {
            Some(sale) if sale.amount_cents < self.price.amount_cents => sale,
            _ => self.price,
        }
    }

    /// Check if the product is on sale.
    pub fn is_on_sale(&self) -> bool {
        self.effective_price() != self.price
    }

    /// Discount percentage if on sale.
    pub fn discount_percentage(&self) -> Option<f64> {
        if !self.is_on_sale() || self.price.amount_cents == 0 {
            return None;
        }
        let savings = self.price.amount_cents - self.effective_price().amount_cents;
        Some((savings as f64 / self.price.amount_cents as f64) * 100.0)
    }

    /// Mean review rating, if any reviews exist.
    pub fn average_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        Some(total as f64 / self.reviews.len() as f64)
    }
}

impl Entity for Product {
    type Id = ProductId;
    const KIND: &'static str = "product";

    fn id(&self) -> &ProductId {
        &self.id
    }
}

/// A customer review attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Reviewer display name.
    pub user_name: String,
    /// Rating from 1 to 5.
    pub rating: u8,
    /// Review text.
    #[serde(default)]
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_api_json() {
        let json = r#"{
            "_id": "p1",
            "name": "Fresh Oranges",
            "brandName": "Sunkist",
            "price": 4.5,
            "discountedPrice": 3.99,
            "images": ["/img/oranges.jpg"]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new("p1"));
        assert_eq!(product.brand_name, "Sunkist");
        assert_eq!(product.effective_price(), Money::usd(399));
        assert!(product.in_stock);
    }

    #[test]
    fn test_discount_percentage() {
        let mut product = Product::new("p1", "Milk", Money::usd(400));
        assert_eq!(product.discount_percentage(), None);

        product.discounted_price = Some(Money::usd(300));
        let discount = product.discount_percentage().unwrap();
        assert!((discount - 25.0).abs() < 0.01);
    }

    #[test]
    fn test_discount_above_price_is_ignored() {
        let mut product = Product::new("p1", "Bread", Money::usd(300));
        product.discounted_price = Some(Money::usd(350));
        assert!(!product.is_on_sale());
        assert_eq!(product.effective_price(), Money::usd(300));
    }

    #[test]
    fn test_average_rating() {
        let mut product = Product::new("p1", "Eggs", Money::usd(250));
        assert_eq!(product.average_rating(), None);
        product.reviews = vec![
            Review { user_name: "ana".into(), rating: 5, comment: String::new() },
            Review { user_name: "bo".into(), rating: 4, comment: String::new() },
        ];
        assert_eq!(product.average_rating(), Some(4.5));
    }
}
