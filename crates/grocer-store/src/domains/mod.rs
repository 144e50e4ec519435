//! One module per storefront domain: its actions, state, reducer and
//! context with the high-level operations.

pub mod cart;
pub mod news;
pub mod order;
pub mod product;
pub mod user;

use std::sync::Arc;

/// Wrap freshly fetched records for sharing between states.
pub(crate) fn shared<E>(records: Vec<E>) -> Vec<Arc<E>> {
    records.into_iter().map(Arc::new).collect()
}
