//! The action vocabulary.

use crate::domains::cart::CartAction;
use crate::domains::news::NewsAction;
use crate::domains::order::OrderAction;
use crate::domains::product::ProductAction;
use crate::domains::user::UserAction;

/// Every action a dispatcher may emit.
///
/// A reducer only reacts to its own domain's variant and returns the state
/// unchanged for the others.
#[derive(Debug, Clone)]
pub enum Action {
    News(NewsAction),
    Product(ProductAction),
    Cart(CartAction),
    User(UserAction),
    Order(OrderAction),
}

impl Action {
    /// Wire tag, e.g. `"GET_NEWS_START"`.
    pub fn tag(&self) -> &'static str {
        match self {
            Action::News(action) => action.tag(),
            Action::Product(action) => action.tag(),
            Action::Cart(action) => action.tag(),
            Action::User(action) => action.tag(),
            Action::Order(action) => action.tag(),
        }
    }

    /// Domain the action belongs to.
    pub fn domain(&self) -> &'static str {
        match self {
            Action::News(_) => "news",
            Action::Product(_) => "product",
            Action::Cart(_) => "cart",
            Action::User(_) => "user",
            Action::Order(_) => "order",
        }
    }
}

impl From<NewsAction> for Action {
    fn from(action: NewsAction) -> Self {
        Action::News(action)
    }
}

impl From<ProductAction> for Action {
    fn from(action: ProductAction) -> Self {
        Action::Product(action)
    }
}

impl From<CartAction> for Action {
    fn from(action: CartAction) -> Self {
        Action::Cart(action)
    }
}

impl From<UserAction> for Action {
    fn from(action: UserAction) -> Self {
        Action::User(action)
    }
}

impl From<OrderAction> for Action {
    fn from(action: OrderAction) -> Self {
        Action::Order(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_and_domain() {
        let action: Action = NewsAction::GetNewsStart.into();
        assert_eq!(action.tag(), "GET_NEWS_START");
        assert_eq!(action.domain(), "news");

        let action: Action = OrderAction::CancelOrderFailure("too late".into()).into();
        assert_eq!(action.tag(), "CANCEL_ORDER_FAILURE");
        assert_eq!(action.domain(), "order");
    }
}
