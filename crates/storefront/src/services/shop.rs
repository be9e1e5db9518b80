//! Shop counter service.
//!
//! Backs the cart and wishlist badges in the header widget. Counts are
//! best-effort: a missing user or a failed load degrades to zero so the
//! storefront chrome renders regardless of backend health.

use std::sync::Arc;

use xs_platform_core::UserId;

use crate::db::UserStore;

/// Shop counter service.
pub struct ShopService {
    users: Arc<dyn UserStore>,
}

impl ShopService {
    /// Create a new shop counter service.
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Total quantity across all cart lines.
    ///
    /// Returns zero when the user cannot be loaded.
    pub async fn cart_count(&self, user_id: UserId) -> u64 {
        match self.users.get_by_id(user_id).await {
            Ok(Some(user)) => user
                .cart
                .iter()
                .map(|item| u64::from(item.quantity))
                .sum(),
            Ok(None) => {
                tracing::warn!(user_id = %user_id, "Cart count requested for unknown user");
                0
            }
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to load cart count");
                0
            }
        }
    }

    /// Number of wishlist entries.
    ///
    /// Returns zero when the user cannot be loaded.
    pub async fn wishlist_count(&self, user_id: UserId) -> u64 {
        match self.users.get_by_id(user_id).await {
            Ok(Some(user)) => u64::try_from(user.wishlist.len()).unwrap_or(0),
            Ok(None) => {
                tracing::warn!(user_id = %user_id, "Wishlist count requested for unknown user");
                0
            }
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to load wishlist count");
                0
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;

    use xs_platform_core::Email;

    use crate::db::memory::MemoryUserStore;
    use crate::db::RepositoryError;
    use crate::models::{CartItem, NewUser, User, WishlistItem};

    /// Store whose every operation fails, standing in for a dead database.
    struct FailingUserStore;

    impl FailingUserStore {
        fn error() -> RepositoryError {
            RepositoryError::Database(sqlx::Error::PoolClosed)
        }
    }

    #[async_trait]
    impl UserStore for FailingUserStore {
        async fn create(&self, _new_user: NewUser) -> Result<User, RepositoryError> {
            Err(Self::error())
        }

        async fn get_by_id(&self, _id: UserId) -> Result<Option<User>, RepositoryError> {
            Err(Self::error())
        }

        async fn get_by_email(&self, _email: &Email) -> Result<Option<User>, RepositoryError> {
            Err(Self::error())
        }

        async fn get_password_hash(
            &self,
            _email: &Email,
        ) -> Result<Option<(User, String)>, RepositoryError> {
            Err(Self::error())
        }

        async fn set_cart(
            &self,
            _id: UserId,
            _items: Vec<CartItem>,
        ) -> Result<bool, RepositoryError> {
            Err(Self::error())
        }

        async fn set_wishlist(
            &self,
            _id: UserId,
            _items: Vec<WishlistItem>,
        ) -> Result<bool, RepositoryError> {
            Err(Self::error())
        }

        async fn ping(&self) -> Result<(), RepositoryError> {
            Err(Self::error())
        }
    }

    async fn seeded_store() -> (Arc<dyn UserStore>, UserId) {
        let store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
        let user = store
            .create(NewUser {
                email: Email::parse("shopper@example.com").unwrap(),
                password_hash: "$argon2id$test".to_owned(),
                first_name: None,
                last_name: None,
            })
            .await
            .unwrap();
        (store, user.id)
    }

    fn cart_item(product_id: &str, quantity: u32) -> CartItem {
        CartItem {
            product_id: product_id.to_owned(),
            name: format!("Product {product_id}"),
            price: Decimal::new(1999, 2),
            quantity,
            added_at: Utc::now(),
        }
    }

    fn wishlist_item(product_id: &str) -> WishlistItem {
        WishlistItem {
            product_id: product_id.to_owned(),
            name: format!("Product {product_id}"),
            price: Decimal::new(4500, 2),
            added_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn cart_count_sums_line_quantities() {
        let (store, user_id) = seeded_store().await;
        store
            .set_cart(user_id, vec![cart_item("p-1", 2), cart_item("p-2", 3)])
            .await
            .unwrap();

        let shop = ShopService::new(store);

        assert_eq!(shop.cart_count(user_id).await, 5);
    }

    #[tokio::test]
    async fn wishlist_count_is_entry_count() {
        let (store, user_id) = seeded_store().await;
        store
            .set_wishlist(user_id, vec![wishlist_item("p-1"), wishlist_item("p-2")])
            .await
            .unwrap();

        let shop = ShopService::new(store);

        assert_eq!(shop.wishlist_count(user_id).await, 2);
    }

    #[tokio::test]
    async fn counts_are_zero_for_fresh_users() {
        let (store, user_id) = seeded_store().await;
        let shop = ShopService::new(store);

        assert_eq!(shop.cart_count(user_id).await, 0);
        assert_eq!(shop.wishlist_count(user_id).await, 0);
    }

    #[tokio::test]
    async fn counts_degrade_to_zero_for_unknown_users() {
        let store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
        let shop = ShopService::new(store);

        assert_eq!(shop.cart_count(UserId::new(404)).await, 0);
        assert_eq!(shop.wishlist_count(UserId::new(404)).await, 0);
    }

    #[tokio::test]
    async fn counts_degrade_to_zero_when_the_store_fails() {
        let shop = ShopService::new(Arc::new(FailingUserStore));

        assert_eq!(shop.cart_count(UserId::new(1)).await, 0);
        assert_eq!(shop.wishlist_count(UserId::new(1)).await, 0);
    }
}
