//! Money type for representing monetary values.
//!
//! Amounts are kept in cents. The API speaks decimal dollars (`"price": 12.5`),
//! so entity fields go through the [`dollars`] serde adapter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CAD => "CAD",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::CAD => "CA$",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "CAD" => Some(Currency::CAD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A monetary value with currency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use grocer_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::USD);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new((amount * 100.0).round() as i64, currency)
    }

    /// Shorthand for a USD amount in cents.
    pub fn usd(amount_cents: i64) -> Self {
        Self::new(amount_cents, Currency::USD)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency.symbol(), self.to_decimal())
    }

    /// Add another value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Sum an iterator of values, returning None on currency mismatch or overflow.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Serde adapter for API fields carrying decimal USD amounts.
pub mod dollars {
    use super::{Currency, Money};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Ok(Money::from_decimal(amount, Currency::USD))
    }

    /// Same as the parent adapter, for optional fields.
    pub mod option {
        use super::super::{Currency, Money};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            money: &Option<Money>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match money {
                Some(m) => serializer.serialize_some(&m.to_decimal()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Money>, D::Error> {
            let amount = Option::<f64>::deserialize(deserializer)?;
            Ok(amount.map(|a| Money::from_decimal(a, Currency::USD)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_cents, 4999);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::usd(4999).display(), "$49.99");
        assert_eq!(Money::new(500, Currency::GBP).display(), "\u{00a3}5.00");
    }

    #[test]
    fn test_money_try_add_mismatch() {
        let usd = Money::usd(1000);
        let eur = Money::new(1000, Currency::EUR);
        assert_eq!(usd.try_add(&eur), None);
        assert_eq!(usd.try_add(&usd), Some(Money::usd(2000)));
    }

    #[test]
    fn test_money_try_multiply_overflow() {
        assert_eq!(Money::usd(250).try_multiply(3), Some(Money::usd(750)));
        assert_eq!(Money::usd(i64::MAX).try_multiply(2), None);
    }

    #[test]
    fn test_money_try_sum() {
        let values = [Money::usd(100), Money::usd(250)];
        assert_eq!(
            Money::try_sum(values.iter(), Currency::USD),
            Some(Money::usd(350))
        );

        let mixed = [Money::usd(100), Money::new(100, Currency::EUR)];
        assert_eq!(Money::try_sum(mixed.iter(), Currency::USD), None);
        assert_eq!(
            Money::try_sum(std::iter::empty(), Currency::USD),
            Some(Money::zero(Currency::USD))
        );
    }

    #[test]
    fn test_money_ordering() {
        let mut prices = vec![Money::usd(500), Money::usd(120), Money::usd(999)];
        prices.sort();
        assert_eq!(prices, vec![Money::usd(120), Money::usd(500), Money::usd(999)]);
        assert_eq!(prices.iter().max(), Some(&Money::usd(999)));
        assert!(Currency::USD < Currency::EUR);
    }

    #[test]
    fn test_dollars_adapter() {
        #[derive(Serialize, Deserialize)]
        struct Priced {
            #[serde(with = "dollars")]
            price: Money,
            #[serde(default, with = "dollars::option")]
            discounted: Option<Money>,
        }

        let parsed: Priced = serde_json::from_str(r#"{"price": 12.5}"#).unwrap();
        assert_eq!(parsed.price, Money::usd(1250));
        assert_eq!(parsed.discounted, None);

        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, r#"{"price":12.5,"discounted":null}"#);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("usd"), Some(Currency::USD));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
