//! Delivery fee policy applied at checkout.

use serde::{Deserialize, Serialize};

use crate::money::{dollars, Money};

/// Flat delivery fee waived above a cart total threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    /// Carts at or above this total ship for free.
    #[serde(with = "dollars")]
    pub free_threshold: Money,
    /// Fee charged below the threshold.
    #[serde(with = "dollars")]
    pub fee: Money,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_threshold: Money::usd(5000),
            fee: Money::usd(500),
        }
    }
}

impl ShippingPolicy {
    /// Fee for a cart with the given total.
    pub fn delivery_fee(&self, cart_total: &Money) -> Money {
        if cart_total.amount_cents < self.free_threshold.amount_cents {
            self.fee
        } else {
            Money::zero(self.fee.currency)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_below_threshold() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.delivery_fee(&Money::usd(4999)), Money::usd(500));
    }

    #[test]
    fn test_free_at_threshold() {
        let policy = ShippingPolicy::default();
        assert!(policy.delivery_fee(&Money::usd(5000)).is_zero());
    }

    #[test]
    fn test_policy_from_toml_style_decimals() {
        let policy: ShippingPolicy =
            serde_json::from_str(r#"{"free_threshold": 30.0, "fee": 2.5}"#).unwrap();
        assert_eq!(policy.fee, Money::usd(250));
        assert_eq!(policy.free_threshold, Money::usd(3000));
    }
}
