//! Order history page with client-side filters.

use grocer_commerce::filter::OrderFilter;
use grocer_commerce::ids::OrderId;
use grocer_commerce::order::{Order, OrderStatus};
use grocer_commerce::Money;

use super::Render;
use crate::domains::order::OrderContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub id: OrderId,
    /// Short reference shown to the customer.
    pub reference: String,
    /// Placement day, `YYYY-MM-DD`.
    pub placed_on: String,
    pub status: OrderStatus,
    pub total: Money,
    pub item_count: u32,
    pub can_cancel: bool,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            reference: order.reference(),
            placed_on: order.created_at.format("%Y-%m-%d").to_string(),
            status: order.status,
            total: order.total_price,
            item_count: order.item_count(),
            can_cancel: order.status.can_cancel(),
        }
    }
}

pub struct OrderHistoryPage {
    orders: OrderContext,
    filter: OrderFilter,
}

impl OrderHistoryPage {
    pub fn new(orders: OrderContext) -> Self {
        Self {
            orders,
            filter: OrderFilter::default(),
        }
    }

    pub fn with_filter(mut self, filter: OrderFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn filter(&self) -> &OrderFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: OrderFilter) {
        self.filter = filter;
    }

    pub fn render(&self) -> Render<Vec<OrderRow>> {
        let state = self.orders.state();
        let orders = &state.orders;
        if orders.collection.is_empty() {
            return Render::from_state(
                orders.collection_loading,
                orders.error.as_deref(),
                Vec::new,
            );
        }
        if orders.collection_loading {
            return Render::Loading;
        }
        Render::Ready(
            state
                .filtered(&self.filter)
                .iter()
                .map(|order| OrderRow::from(&**order))
                .collect(),
        )
    }

    /// Error to show above the rows when a request failed but the history
    /// is still on screen.
    pub fn notice(&self) -> Option<String> {
        let state = self.orders.state();
        let orders = &state.orders;
        if orders.collection.is_empty() || orders.collection_loading {
            return None;
        }
        orders.error.clone()
    }
}
