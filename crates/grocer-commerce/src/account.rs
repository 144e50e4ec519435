//! Signed-in user profile and address book.

use crate::entity::{Entity, Mutable};
use crate::ids::{AddressId, UserId};
use serde::{Deserialize, Serialize};

/// The signed-in customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

impl UserProfile {
    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for UserProfile {
    type Id = UserId;
    const KIND: &'static str = "user";

    fn id(&self) -> &UserId {
        &self.id
    }
}

/// A saved delivery address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "_id")]
    pub id: AddressId,
    /// Label shown in the address list ("Home", "Office").
    #[serde(default)]
    pub label: String,
    pub full_name: String,
    pub address1: String,
    #[serde(default)]
    pub address2: Option<String>,
    pub city: String,
    #[serde(default)]
    pub province_code: Option<String>,
    pub zip: String,
    pub country_code: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Address {
    /// Format as single line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.address1.clone()];
        if let Some(ref addr2) = self.address2 {
            parts.push(addr2.clone());
        }
        parts.push(self.city.clone());
        if let Some(ref province) = self.province_code {
            parts.push(province.clone());
        }
        parts.push(self.zip.clone());
        parts.push(self.country_code.clone());
        parts.join(", ")
    }

    /// Format as multi-line label for the address card.
    pub fn multi_line(&self) -> String {
        let mut lines = vec![self.full_name.clone(), self.address1.clone()];
        if let Some(ref addr2) = self.address2 {
            lines.push(addr2.clone());
        }
        let city_line = match self.province_code {
            Some(ref province) => format!("{}, {} {}", self.city, province, self.zip),
            None => format!("{} {}", self.city, self.zip),
        };
        lines.push(city_line);
        lines.push(self.country_code.clone());
        lines.join("\n")
    }
}

impl Entity for Address {
    type Id = AddressId;
    const KIND: &'static str = "address";

    fn id(&self) -> &AddressId {
        &self.id
    }
}

impl Mutable for Address {
    type Draft = AddressDraft;
    type Patch = AddressPatch;
}

/// A new address before the server assigns an id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddressDraft {
    pub label: String,
    pub full_name: String,
    pub address1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province_code: Option<String>,
    pub zip: String,
    pub country_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl AddressDraft {
    /// Check that every required field is filled in.
    pub fn is_complete(&self) -> bool {
        !self.full_name.is_empty()
            && !self.address1.is_empty()
            && !self.city.is_empty()
            && !self.country_code.is_empty()
            && !self.zip.is_empty()
    }

    /// Attach a server-assigned id.
    pub fn into_address(self, id: AddressId) -> Address {
        Address {
            id,
            label: self.label,
            full_name: self.full_name,
            address1: self.address1,
            address2: self.address2,
            city: self.city,
            province_code: self.province_code,
            zip: self.zip,
            country_code: self.country_code,
            phone: self.phone,
        }
    }
}

/// Partial edit of a saved address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddressPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> AddressDraft {
        AddressDraft {
            label: "Home".into(),
            full_name: "Jane Smith".into(),
            address1: "456 Oak Ave".into(),
            city: "Los Angeles".into(),
            province_code: Some("CA".into()),
            zip: "90001".into(),
            country_code: "US".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_draft_completeness() {
        assert!(draft().is_complete());
        let mut missing = draft();
        missing.zip.clear();
        assert!(!missing.is_complete());
    }

    #[test]
    fn test_address_formatting() {
        let addr = draft().into_address(AddressId::new("a1"));
        assert_eq!(addr.one_line(), "456 Oak Ave, Los Angeles, CA, 90001, US");
        assert!(addr.multi_line().starts_with("Jane Smith\n456 Oak Ave"));
    }

    #[test]
    fn test_profile_full_name() {
        let user = UserProfile {
            id: UserId::new("u1"),
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john@example.com".into(),
            phone: None,
            photo: None,
        };
        assert_eq!(user.full_name(), "John Doe");
    }
}
