//! Order history and order placement.

use std::sync::Arc;

use async_trait::async_trait;
use grocer_commerce::filter::OrderFilter;
use grocer_commerce::ids::OrderId;
use grocer_commerce::order::{Order, OrderDraft, OrderPatch};
use grocer_data::{ApiError, Mutate};

use super::shared;
use crate::action::Action;
use crate::effects::Effects;
use crate::operation::Operation;
use crate::provider::Mount;
use crate::resource::{ResourceState, Slot};
use crate::store::{Reducer, Store};

#[derive(Debug, Clone)]
pub enum OrderAction {
    GetOrdersStart,
    GetOrdersSuccess(Vec<Arc<Order>>),
    GetOrdersFailure(String),

    GetOrderStart,
    GetOrderSuccess(Arc<Order>),
    GetOrderFailure(String),

    CreateOrderStart,
    CreateOrderSuccess(Arc<Order>),
    CreateOrderFailure(String),

    CancelOrderStart,
    CancelOrderSuccess(Arc<Order>),
    CancelOrderFailure(String),
}

impl OrderAction {
    pub fn tag(&self) -> &'static str {
        use OrderAction::*;
        match self {
            GetOrdersStart => "GET_ORDERS_START",
            GetOrdersSuccess(_) => "GET_ORDERS_SUCCESS",
            GetOrdersFailure(_) => "GET_ORDERS_FAILURE",
            GetOrderStart => "GET_ORDER_START",
            GetOrderSuccess(_) => "GET_ORDER_SUCCESS",
            GetOrderFailure(_) => "GET_ORDER_FAILURE",
            CreateOrderStart => "CREATE_ORDER_START",
            CreateOrderSuccess(_) => "CREATE_ORDER_SUCCESS",
            CreateOrderFailure(_) => "CREATE_ORDER_FAILURE",
            CancelOrderStart => "CANCEL_ORDER_START",
            CancelOrderSuccess(_) => "CANCEL_ORDER_SUCCESS",
            CancelOrderFailure(_) => "CANCEL_ORDER_FAILURE",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderState {
    pub orders: ResourceState<Order>,
}

impl OrderState {
    /// Cached orders matching `filter`, in history order.
    pub fn filtered(&self, filter: &OrderFilter) -> Vec<Arc<Order>> {
        self.orders
            .collection
            .iter()
            .filter(|order| filter.matches(order))
            .cloned()
            .collect()
    }
}

pub struct OrderReducer;

impl Reducer for OrderReducer {
    type State = OrderState;
    const DOMAIN: &'static str = "order";

    fn reduce(state: &Arc<OrderState>, action: &Action) -> Arc<OrderState> {
        use OrderAction::*;

        let Action::Order(action) = action else {
            return Arc::clone(state);
        };
        let orders = &state.orders;
        let orders = match action {
            GetOrdersStart => orders.started(Slot::Collection),
            GetOrdersSuccess(list) => orders.collection_loaded(list),
            GetOrdersFailure(message) => orders.collection_failed(message),

            GetOrderStart => orders.started(Slot::Selected),
            GetOrderSuccess(order) => orders.item_loaded(order),
            GetOrderFailure(message) => orders.item_failed(message),

            CreateOrderStart | CancelOrderStart => orders.started(Slot::Mutation),
            CreateOrderSuccess(order) => orders.added(order),
            CancelOrderSuccess(order) => orders.updated(order),
            CreateOrderFailure(message) | CancelOrderFailure(message) => {
                orders.mutation_failed(message)
            }
        };
        Arc::new(OrderState { orders })
    }
}

/// Order store plus its collaborator.
#[derive(Clone)]
pub struct OrderContext {
    store: Store<OrderReducer>,
    api: Arc<dyn Mutate<Order>>,
    effects: Effects,
}

impl OrderContext {
    pub fn new(api: Arc<dyn Mutate<Order>>, effects: Effects) -> Self {
        Self {
            store: Store::new(),
            api,
            effects,
        }
    }

    pub fn store(&self) -> &Store<OrderReducer> {
        &self.store
    }

    pub fn state(&self) -> Arc<OrderState> {
        self.store.state()
    }

    pub fn dispatch(&self, action: OrderAction) {
        self.store.dispatch(action);
    }

    fn operation(&self, name: &'static str) -> Operation<'_> {
        Operation::new(OrderReducer::DOMAIN, name, &self.effects)
    }

    pub async fn get_orders(&self) -> Result<Vec<Arc<Order>>, ApiError> {
        self.dispatch(OrderAction::GetOrdersStart);
        self.operation("get_orders")
            .run(
                self.api.fetch_collection(),
                |list| {
                    let list = shared(list);
                    self.dispatch(OrderAction::GetOrdersSuccess(list.clone()));
                    list
                },
                |error| self.dispatch(OrderAction::GetOrdersFailure(error.message().to_string())),
            )
            .await
    }

    pub async fn get_order(&self, id: &OrderId) -> Result<Arc<Order>, ApiError> {
        self.dispatch(OrderAction::GetOrderStart);
        self.operation("get_order")
            .run(
                self.api.fetch_one(id),
                |order| {
                    let order = Arc::new(order);
                    self.dispatch(OrderAction::GetOrderSuccess(Arc::clone(&order)));
                    order
                },
                |error| self.dispatch(OrderAction::GetOrderFailure(error.message().to_string())),
            )
            .await
    }

    pub async fn create_order(&self, draft: OrderDraft) -> Result<Arc<Order>, ApiError> {
        self.dispatch(OrderAction::CreateOrderStart);
        self.operation("create_order")
            .announce("Your order has been placed")
            .run(
                self.api.create(&draft),
                |order| {
                    let order = Arc::new(order);
                    self.dispatch(OrderAction::CreateOrderSuccess(Arc::clone(&order)));
                    order
                },
                |error| self.dispatch(OrderAction::CreateOrderFailure(error.message().to_string())),
            )
            .await
    }

    /// Cancel an order.
    ///
    /// A cached order already past processing is refused without a request.
    pub async fn cancel_order(&self, id: &OrderId) -> Result<Arc<Order>, ApiError> {
        if let Some(order) = self.state().orders.find(id) {
            if !order.status.can_cancel() {
                let error = ApiError::validation(format!(
                    "Order {} is {} and can no longer be cancelled",
                    order.reference(),
                    order.status.display_name().to_lowercase()
                ));
                self.dispatch(OrderAction::CancelOrderStart);
                self.dispatch(OrderAction::CancelOrderFailure(error.message().to_string()));
                self.effects.error(error.message());
                return Err(error);
            }
        }

        self.dispatch(OrderAction::CancelOrderStart);
        self.operation("cancel_order")
            .announce("Order cancelled")
            .run(
                self.api.update(id, &OrderPatch::cancel()),
                |order| {
                    let order = Arc::new(order);
                    self.dispatch(OrderAction::CancelOrderSuccess(Arc::clone(&order)));
                    order
                },
                |error| self.dispatch(OrderAction::CancelOrderFailure(error.message().to_string())),
            )
            .await
    }
}

#[async_trait]
impl Mount for OrderContext {
    const NAME: &'static str = "order";

    async fn on_mount(&self) {
        let _ = self.get_orders().await;
    }
}
