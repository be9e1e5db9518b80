//! In-memory user store for tests and local development.
//!
//! Mirrors the semantics of [`super::PgUserStore`]: unique emails, atomic
//! whole-collection replaces, no partial state across await points. A single
//! `RwLock` over the map stands in for per-row locking.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use xs_platform_core::{Email, UserId};

use super::{RepositoryError, UserStore};
use crate::models::user::{CartItem, NewUser, User, WishlistItem};

struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Default)]
struct Inner {
    users: HashMap<i32, StoredUser>,
    next_id: i32,
}

/// User store held entirely in process memory.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

impl MemoryUserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut inner = self.inner.write().await;

        // Duplicate check and insert under one write lock, like the unique index.
        if inner
            .users
            .values()
            .any(|stored| stored.user.email == new_user.email)
        {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        inner.next_id += 1;
        let user = User {
            id: UserId::new(inner.next_id),
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            created_at: Utc::now(),
            cart: Vec::new(),
            wishlist: Vec::new(),
        };

        inner.users.insert(
            user.id.as_i32(),
            StoredUser {
                user: user.clone(),
                password_hash: new_user.password_hash,
            },
        );

        Ok(user)
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id.as_i32()).map(|s| s.user.clone()))
    }

    async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|s| s.user.email == *email)
            .map(|s| s.user.clone()))
    }

    async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|s| s.user.email == *email)
            .map(|s| (s.user.clone(), s.password_hash.clone())))
    }

    async fn set_cart(&self, id: UserId, items: Vec<CartItem>) -> Result<bool, RepositoryError> {
        let mut inner = self.inner.write().await;
        match inner.users.get_mut(&id.as_i32()) {
            Some(stored) => {
                stored.user.cart = items;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_wishlist(
        &self,
        id: UserId,
        items: Vec<WishlistItem>,
    ) -> Result<bool, RepositoryError> {
        let mut inner = self.inner.write().await;
        match inner.users.get_mut(&id.as_i32()) {
            Some(stored) => {
                stored.user.wishlist = items;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
