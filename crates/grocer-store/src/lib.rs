//! Client-side state containers for the Groceteria storefront.
//!
//! Each storefront domain (news, products, cart, user, orders) follows the
//! same request lifecycle:
//!
//! 1. a high-level operation dispatches a `*Start` action,
//! 2. awaits its network collaborator,
//! 3. dispatches `*Success(payload)` or `*Failure(message)`.
//!
//! The domain's pure reducer turns each action into a new state value and the
//! [`Store`] publishes it to every subscriber.
//!
//! - [`Action`] - the closed vocabulary, one enum per domain
//! - [`ResourceState`] - loading flags, error and cached records
//! - [`Store`] / [`Reducer`] - the single mutation entry point
//! - [`Provider`] - owns a context for a subtree and runs the on-mount fetch
//! - [`Storefront`] - all five providers, handed to pages
//! - [`views`] - read-only page models rendered from store state
//!
//! # Example
//!
//! ```rust,ignore
//! use grocer_store::prelude::*;
//!
//! let mut storefront = Storefront::mount(services, Effects::headless(), StoreConfig::default());
//! storefront.settled().await;
//!
//! for item in storefront.news.state().news.collection.iter() {
//!     println!("{}", item.title);
//! }
//! ```

pub mod action;
pub mod config;
pub mod domains;
pub mod effects;
pub mod error;
mod operation;
pub mod provider;
pub mod resource;
pub mod store;
pub mod storefront;
pub mod views;

pub use action::Action;
pub use config::StoreConfig;
pub use effects::{Effects, Navigator, Notice, Notifier};
pub use error::CheckoutError;
pub use provider::{Mount, Provider};
pub use resource::{ResourceState, Slot};
pub use store::{Reducer, Store};
pub use storefront::{Services, Storefront};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::config::StoreConfig;
    pub use crate::domains::cart::{CartAction, CartContext, CartReducer, CartState};
    pub use crate::domains::news::{FieldRef, NewsAction, NewsContext, NewsReducer, NewsState};
    pub use crate::domains::order::{OrderAction, OrderContext, OrderReducer, OrderState};
    pub use crate::domains::product::{
        ProductAction, ProductContext, ProductReducer, ProductState,
    };
    pub use crate::domains::user::{UserAction, UserContext, UserReducer, UserState};
    pub use crate::effects::{Effects, HistoryNavigator, Notice, RecordingNotifier};
    pub use crate::error::CheckoutError;
    pub use crate::provider::{Mount, Provider};
    pub use crate::resource::{ResourceState, Slot};
    pub use crate::store::{Reducer, Store};
    pub use crate::storefront::{Services, Storefront};
    pub use crate::views::Render;
}
