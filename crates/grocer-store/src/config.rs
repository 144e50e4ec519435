//! Store configuration.

use std::time::Duration;

use grocer_commerce::shipping::ShippingPolicy;
use serde::{Deserialize, Serialize};

/// Settings shared by every domain context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// How long an unrecoverable page stays on screen before redirecting.
    pub redirect_delay_ms: u64,
    /// Route to leave to when a single-item page cannot load.
    pub not_found_redirect: String,
    /// Delivery fee rule applied at checkout.
    pub shipping: ShippingPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: 4000,
            not_found_redirect: "/".to_string(),
            shipping: ShippingPolicy::default(),
        }
    }
}

impl StoreConfig {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    /// Set the redirect delay.
    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_commerce::Money;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.redirect_delay(), Duration::from_secs(4));
        assert_eq!(config.not_found_redirect, "/");
        assert_eq!(config.shipping.fee, Money::usd(500));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"redirect_delay_ms": 1500}"#).unwrap();
        assert_eq!(config.redirect_delay(), Duration::from_millis(1500));
        assert_eq!(config.not_found_redirect, "/");
    }
}
