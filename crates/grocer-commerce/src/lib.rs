//! Grocery storefront domain types.
//!
//! This crate holds the records the storefront client mirrors from the API:
//!
//! - **Catalog**: products and their reviews
//! - **News**: CMS news items shown on the landing page
//! - **Cart**: cart line items, totals and the delivery-fee policy
//! - **Account**: the signed-in user's profile and address book
//! - **Orders**: placed orders, checkout drafts and order-history filters
//!
//! Every record with a stable server identity implements [`Entity`]; records
//! the client may create or edit also implement [`Mutable`], which names the
//! draft and patch payloads sent to the API.
//!
//! # Example
//!
//! ```rust,ignore
//! use grocer_commerce::prelude::*;
//!
//! let policy = ShippingPolicy::default();
//! let summary = CartSummary::from_items(&items)?;
//! let fee = policy.delivery_fee(&summary.total);
//! println!("Total: {}", summary.total.display());
//! ```

pub mod account;
pub mod cart;
pub mod catalog;
pub mod entity;
pub mod error;
pub mod filter;
pub mod ids;
pub mod money;
pub mod news;
pub mod order;
pub mod shipping;

pub use entity::{Entity, Mutable};
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::entity::{Entity, Mutable};
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    pub use crate::account::{Address, AddressDraft, AddressPatch, UserProfile};
    pub use crate::cart::{CartItem, CartItemDraft, CartItemPatch, CartSummary};
    pub use crate::catalog::{Product, Review};
    pub use crate::filter::{OrderFilter, PriceRange};
    pub use crate::news::{NewsDraft, NewsItem, NewsPatch};
    pub use crate::order::{Order, OrderDraft, OrderLine, OrderPatch, OrderStatus, PaymentMethod};
    pub use crate::shipping::ShippingPolicy;
}
