//! `PostgreSQL`-backed user store.
//!
//! One row per user; `cart` and `wishlist` are JSONB columns, so a
//! whole-collection replace is a single `UPDATE` and the row lock serializes
//! concurrent writers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use xs_platform_core::{Email, UserId};

use super::{RepositoryError, UserStore};
use crate::models::user::{CartItem, NewUser, User, WishlistItem};

/// User store backed by the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw `users` row; converted to the domain [`User`] after validation.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    created_at: DateTime<Utc>,
    cart: Json<Vec<CartItem>>,
    wishlist: Json<Vec<WishlistItem>>,
}

impl UserRow {
    fn into_user(self) -> Result<User, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(User {
            id: self.id,
            email,
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: self.created_at,
            cart: self.cart.0,
            wishlist: self.wishlist.0,
        })
    }
}

/// Row shape for credential verification; carries the hash alongside the user columns.
#[derive(sqlx::FromRow)]
struct UserWithHashRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

const USER_COLUMNS: &str = "id, email, first_name, last_name, created_at, cart, wishlist";

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let query = format!(
            "INSERT INTO users (email, password_hash, first_name, last_name) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(new_user.email.as_str())
            .bind(&new_user.password_hash)
            .bind(&new_user.first_name)
            .bind(&new_user.last_name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return RepositoryError::Conflict("email already exists".to_owned());
                }
                RepositoryError::Database(e)
            })?;

        row.into_user()
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let query = format!("SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1");

        let row = sqlx::query_as::<_, UserWithHashRow>(&query)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => Ok(Some((r.user.into_user()?, r.password_hash))),
            None => Ok(None),
        }
    }

    async fn set_cart(&self, id: UserId, items: Vec<CartItem>) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE users SET cart = $2 WHERE id = $1")
            .bind(id)
            .bind(Json(&items))
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_wishlist(
        &self,
        id: UserId,
        items: Vec<WishlistItem>,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE users SET wishlist = $2 WHERE id = $1")
            .bind(id)
            .bind(Json(&items))
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
