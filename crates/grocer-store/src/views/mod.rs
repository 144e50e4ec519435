//! Read-only page models.
//!
//! A page reads one or more stores and decides what to show: a spinner while
//! the relevant request is in flight, the error message after a failure, the
//! data otherwise. Pages never touch state except through context
//! operations.

mod checkout;
mod generation;
mod news_feed;
mod order_history;
mod product_details;

pub use checkout::{Bill, CheckoutPage};
pub use generation::{RequestGeneration, Ticket};
pub use news_feed::{NewsCard, NewsFeed};
pub use order_history::{OrderHistoryPage, OrderRow};
pub use product_details::{Opened, ProductDetails, ProductDetailsPage};

/// What a page shows for a piece of state.
#[derive(Debug, Clone, PartialEq)]
pub enum Render<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> Render<T> {
    /// Decide from a loading flag and an error; `data` is only built when
    /// neither is set.
    pub fn from_state(loading: bool, error: Option<&str>, data: impl FnOnce() -> T) -> Self {
        if loading {
            Render::Loading
        } else if let Some(message) = error {
            Render::Failed(message.to_string())
        } else {
            Render::Ready(data())
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Render::Loading)
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Render::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Render<U> {
        match self {
            Render::Loading => Render::Loading,
            Render::Failed(message) => Render::Failed(message),
            Render::Ready(data) => Render::Ready(f(data)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_wins_over_error() {
        let render = Render::from_state(true, Some("boom"), || 1);
        assert!(render.is_loading());
    }

    #[test]
    fn test_error_then_data() {
        assert_eq!(
            Render::from_state(false, Some("boom"), || 1),
            Render::Failed("boom".into())
        );
        assert_eq!(Render::from_state(false, None, || 1).map(|n| n + 1), Render::Ready(2));
    }
}
