//! Newtype IDs for type-safe identifiers.
//!
//! The API uses opaque string ids (Mongo `_id`). Wrapping them keeps a
//! `ProductId` from being passed where an `OrderId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new unique ID.
            pub fn generate() -> Self {
                Self(generate_id())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(NewsItemId);
define_id!(AddressId);
define_id!(OrderId);
define_id!(UserId);

/// Generate a 24-hex-digit id shaped like the server's object ids.
fn generate_id() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);

    format!("{:08x}{:016x}", seconds as u32, counter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
    }

    #[test]
    fn test_id_generation() {
        let id1 = OrderId::generate();
        let id2 = OrderId::generate();
        assert_ne!(id1, id2);
        assert_eq!(id1.as_str().len(), 24);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = NewsItemId::new("64b7f0");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"64b7f0\"");
        let back: NewsItemId = serde_json::from_str("\"64b7f0\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_display() {
        let id = AddressId::new("addr-789");
        assert_eq!(format!("{}", id), "addr-789");
    }
}
