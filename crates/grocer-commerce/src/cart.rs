//! Cart line items and totals.

use crate::catalog::Product;
use crate::entity::{Entity, Mutable};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{dollars, Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 99;

/// One product in the cart. The cart holds at most one line per product, so
/// the product id is the line's identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(rename = "product")]
    pub product_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "price", with = "dollars")]
    pub unit_price: Money,
    pub quantity: u32,
}

impl CartItem {
    /// Line total (unit price times quantity).
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(i64::from(self.quantity))
            .ok_or(CommerceError::Overflow)
    }
}

impl Entity for CartItem {
    type Id = ProductId;
    const KIND: &'static str = "cart item";

    fn id(&self) -> &ProductId {
        &self.product_id
    }
}

impl Mutable for CartItem {
    type Draft = CartItemDraft;
    type Patch = CartItemPatch;
}

/// Request to put a product in the cart.
///
/// Name and price are the values the customer saw; the server prices the
/// line itself and returns the canonical item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDraft {
    #[serde(rename = "product")]
    pub product_id: ProductId,
    pub name: String,
    #[serde(rename = "price", with = "dollars")]
    pub unit_price: Money,
    pub quantity: u32,
}

impl CartItemDraft {
    /// Build a draft for a catalog product, rejecting quantities outside
    /// `1..=MAX_QUANTITY_PER_ITEM`.
    pub fn for_product(product: &Product, quantity: u32) -> Result<Self, CommerceError> {
        validate_quantity(quantity)?;
        Ok(Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.effective_price(),
            quantity,
        })
    }
}

/// Change of quantity for an existing line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartItemPatch {
    pub quantity: u32,
}

impl CartItemPatch {
    pub fn new(quantity: u32) -> Result<Self, CommerceError> {
        validate_quantity(quantity)?;
        Ok(Self { quantity })
    }
}

fn validate_quantity(quantity: u32) -> Result<(), CommerceError> {
    if quantity == 0 || quantity > MAX_QUANTITY_PER_ITEM {
        return Err(CommerceError::InvalidQuantity(i64::from(quantity)));
    }
    Ok(())
}

/// Totals shown in the cart badge and bill card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    /// Sum of quantities.
    pub item_count: u32,
    /// Sum of line totals.
    pub total: Money,
}

impl CartSummary {
    /// Summarize a set of cart lines.
    pub fn from_items<'a>(
        items: impl IntoIterator<Item = &'a CartItem>,
    ) -> Result<Self, CommerceError> {
        let mut item_count: u32 = 0;
        let mut total = Money::zero(Currency::USD);
        for item in items {
            item_count = item_count.saturating_add(item.quantity);
            let line = item.line_total()?;
            total = total.try_add(&line).ok_or_else(|| CommerceError::CurrencyMismatch {
                expected: total.currency.code().to_string(),
                got: line.currency.code().to_string(),
            })?;
        }
        Ok(Self { item_count, total })
    }

    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, cents: i64, quantity: u32) -> CartItem {
        CartItem {
            product_id: ProductId::new(id),
            name: id.to_string(),
            image: None,
            unit_price: Money::usd(cents),
            quantity,
        }
    }

    #[test]
    fn test_summary() {
        let items = [line("a", 1000, 2), line("b", 250, 1)];
        let summary = CartSummary::from_items(items.iter()).unwrap();
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.total, Money::usd(2250));
    }

    #[test]
    fn test_empty_summary() {
        let summary = CartSummary::from_items(std::iter::empty()).unwrap();
        assert!(summary.is_empty());
        assert!(summary.total.is_zero());
    }

    #[test]
    fn test_invalid_quantity() {
        let product = Product::new("a", "Apple", Money::usd(80));
        assert!(CartItemDraft::for_product(&product, 0).is_err());
        assert!(CartItemDraft::for_product(&product, MAX_QUANTITY_PER_ITEM + 1).is_err());
        assert!(CartItemPatch::new(3).is_ok());
    }

    #[test]
    fn test_draft_uses_sale_price() {
        let mut product = Product::new("a", "Apple", Money::usd(80));
        product.discounted_price = Some(Money::usd(60));
        let draft = CartItemDraft::for_product(&product, 2).unwrap();
        assert_eq!(draft.unit_price, Money::usd(60));
        assert_eq!(draft.name, "Apple");
    }

    #[test]
    fn test_cart_item_from_api_json() {
        let json = r#"{"product":"p1","name":"Kiwi","price":0.75,"quantity":4}"#;
        let item: CartItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.line_total().unwrap(), Money::usd(300));
    }
}
