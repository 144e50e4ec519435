//! Orders and the checkout draft that creates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::account::Address;
use crate::cart::{CartItem, CartSummary};
use crate::entity::{Entity, Mutable};
use crate::error::CommerceError;
use crate::ids::{OrderId, UserId};
use crate::money::{dollars, Money};
use crate::shipping::ShippingPolicy;

/// Order status as reported by the order service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Order placed, not yet picked.
    #[default]
    Received,
    /// Being packed.
    Processing,
    /// Out for delivery.
    OnTheWay,
    /// Delivered to the customer.
    Delivered,
    /// Cancelled before delivery.
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Received,
        OrderStatus::Processing,
        OrderStatus::OnTheWay,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Received => "received",
            OrderStatus::Processing => "processing",
            OrderStatus::OnTheWay => "on-the-way",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Received => "Received",
            OrderStatus::Processing => "Processing",
            OrderStatus::OnTheWay => "On the way",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if order can still be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Received | OrderStatus::Processing)
    }
}

impl FromStr for OrderStatus {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| CommerceError::UnknownValue {
                field: "order status",
                value: s.to_string(),
            })
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    CashOnDelivery,
    Card,
    Paypal,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "cash-on-delivery",
            PaymentMethod::Card => "card",
            PaymentMethod::Paypal => "paypal",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash-on-delivery" | "cash" | "cod" => Ok(PaymentMethod::CashOnDelivery),
            "card" => Ok(PaymentMethod::Card),
            "paypal" => Ok(PaymentMethod::Paypal),
            _ => Err(CommerceError::UnknownValue {
                field: "payment method",
                value: s.to_string(),
            }),
        }
    }
}

/// A product line frozen into an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    #[serde(rename = "product")]
    pub product_id: crate::ids::ProductId,
    pub name: String,
    #[serde(rename = "price", with = "dollars")]
    pub unit_price: Money,
    pub quantity: u32,
}

impl From<&CartItem> for OrderLine {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub user: UserId,
    pub ordered_products: Vec<OrderLine>,
    /// Grand total including the delivery fee.
    #[serde(with = "dollars")]
    pub total_price: Money,
    #[serde(with = "dollars")]
    pub delivery_fee: Money,
    pub payment_method: PaymentMethod,
    pub address: Address,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Get total item count.
    pub fn item_count(&self) -> u32 {
        self.ordered_products.iter().map(|l| l.quantity).sum()
    }

    /// Short reference shown in the history table ("#1a2b3c").
    pub fn reference(&self) -> String {
        let chars: Vec<char> = self.id.as_str().chars().collect();
        let tail: String = chars[chars.len().saturating_sub(6)..].iter().collect();
        format!("#{}", tail)
    }
}

impl Entity for Order {
    type Id = OrderId;
    const KIND: &'static str = "order";

    fn id(&self) -> &OrderId {
        &self.id
    }
}

impl Mutable for Order {
    type Draft = OrderDraft;
    type Patch = OrderPatch;
}

/// The order request assembled at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub ordered_products: Vec<OrderLine>,
    #[serde(with = "dollars")]
    pub total_price: Money,
    pub user: UserId,
    pub payment_method: PaymentMethod,
    #[serde(with = "dollars")]
    pub delivery_fee: Money,
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderDraft {
    /// Assemble an order from the cart lines.
    ///
    /// The total is the cart total plus the delivery fee from `policy`.
    /// Blank notes are dropped.
    pub fn from_cart<'a>(
        items: impl IntoIterator<Item = &'a CartItem>,
        user: UserId,
        address: Address,
        payment_method: PaymentMethod,
        notes: Option<String>,
        policy: &ShippingPolicy,
    ) -> Result<Self, CommerceError> {
        let items: Vec<&CartItem> = items.into_iter().collect();
        let summary = CartSummary::from_items(items.iter().copied())?;
        if summary.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let delivery_fee = policy.delivery_fee(&summary.total);
        let total_price = summary
            .total
            .try_add(&delivery_fee)
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            ordered_products: items.into_iter().map(OrderLine::from).collect(),
            total_price,
            user,
            payment_method,
            delivery_fee,
            address,
            notes: notes.filter(|n| !n.trim().is_empty()),
        })
    }
}

/// Status change requested by the customer (only cancellation today).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderPatch {
    pub status: OrderStatus,
}

impl OrderPatch {
    pub fn cancel() -> Self {
        Self {
            status: OrderStatus::Cancelled,
        }
    }
}
