//! Order-history filters.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::order::{Order, OrderStatus};

/// Inclusive price bracket over an order's total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

impl PriceRange {
    /// Brackets offered in the order-history price selector.
    pub const PRESETS: [PriceRange; 5] = [
        PriceRange::dollars(10, 50),
        PriceRange::dollars(50, 100),
        PriceRange::dollars(100, 150),
        PriceRange::dollars(150, 200),
        PriceRange::dollars(200, 300),
    ];

    /// Bracket between two whole-dollar USD amounts.
    pub const fn dollars(min: i64, max: i64) -> Self {
        Self {
            min: Money {
                amount_cents: min * 100,
                currency: crate::money::Currency::USD,
            },
            max: Money {
                amount_cents: max * 100,
                currency: crate::money::Currency::USD,
            },
        }
    }

    pub fn contains(&self, amount: &Money) -> bool {
        amount.currency == self.min.currency
            && amount.amount_cents >= self.min.amount_cents
            && amount.amount_cents <= self.max.amount_cents
    }

    /// Label as shown in the selector ("Min $10 - Max $50").
    pub fn label(&self) -> String {
        format!(
            "Min {}{} - Max {}{}",
            self.min.currency.symbol(),
            self.min.amount_cents / 100,
            self.max.currency.symbol(),
            self.max.amount_cents / 100
        )
    }
}

/// Criteria applied to the cached order history. Unset criteria match
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub price: Option<PriceRange>,
    /// Exact placement day (UTC).
    pub day: Option<NaiveDate>,
    /// Placement month as (year, month).
    pub month: Option<(i32, u32)>,
}

impl OrderFilter {
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_price(mut self, range: PriceRange) -> Self {
        self.price = Some(range);
        self
    }

    pub fn on_day(mut self, day: NaiveDate) -> Self {
        self.day = Some(day);
        self
    }

    pub fn in_month(mut self, year: i32, month: u32) -> Self {
        self.month = Some((year, month));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.price.is_none() && self.day.is_none() && self.month.is_none()
    }

    pub fn matches(&self, order: &Order) -> bool {
        let placed = order.created_at.date_naive();

        self.status.map_or(true, |s| order.status == s)
            && self.price.map_or(true, |r| r.contains(&order.total_price))
            && self.day.map_or(true, |d| placed == d)
            && self
                .month
                .map_or(true, |(y, m)| placed.year() == y && placed.month() == m)
    }
}
