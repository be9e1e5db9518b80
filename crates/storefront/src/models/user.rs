//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.
//! The user record is document-shaped: cart and wishlist ride on the record
//! itself so a single read answers every count and profile question.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use xs_platform_core::{Email, UserId};

/// A storefront user (domain type).
///
/// The password hash never rides on this type; the store hands it out
/// separately to the one caller that verifies credentials.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Given name, as entered at registration.
    pub first_name: Option<String>,
    /// Family name, as entered at registration.
    pub last_name: Option<String>,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// Items currently in the cart.
    pub cart: Vec<CartItem>,
    /// Items currently on the wishlist.
    pub wishlist: Vec<WishlistItem>,
}

/// Data required to create a user record.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    /// Argon2id PHC string, produced by the auth service.
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// One line in a user's cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Upstream catalog identifier (opaque here).
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

/// One entry on a user's wishlist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    /// Upstream catalog identifier (opaque here).
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub added_at: DateTime<Utc>,
}

/// Public view of a user, safe to serialize to the browser.
///
/// This is the only user shape that crosses the wire: API responses and the
/// identity block injected into composed pages both use it. No hash, no
/// timestamps, no collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.as_str().to_owned(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_serializes_camel_case() {
        let profile = UserProfile {
            id: UserId::new(9),
            email: "shopper@example.com".to_string(),
            first_name: Some("Ada".to_string()),
            last_name: None,
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["email"], "shopper@example.com");
        assert_eq!(json["firstName"], "Ada");
        assert!(json["lastName"].is_null());
    }

    #[test]
    fn test_cart_item_roundtrip() {
        let json = serde_json::json!({
            "productId": "p-100",
            "name": "Mechanical Keyboard",
            "price": "89.99",
            "quantity": 2,
            "addedAt": "2025-11-02T10:30:00Z"
        });

        let item: CartItem = serde_json::from_value(json).unwrap();
        assert_eq!(item.product_id, "p-100");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.price, Decimal::new(8999, 2));
    }
}
