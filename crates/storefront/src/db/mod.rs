//! User storage for the storefront.
//!
//! # Tables
//!
//! - `users` - account record with embedded `cart`/`wishlist` JSONB documents
//! - `tower_sessions` - session storage (owned by tower-sessions)
//!
//! The user record is document-shaped on purpose: cart and wishlist are
//! collections on the row, so reads and whole-collection replaces are single
//! statements and the database serializes conflicting writers per record.
//!
//! Queries are runtime-bound (`sqlx::query_as` + `FromRow`) rather than the
//! compile-time checked macros, so the workspace builds without a reachable
//! database. Migrations live in `crates/storefront/migrations/` and are
//! embedded via `sqlx::migrate!`; the binary applies them at startup.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use xs_platform_core::{Email, UserId};

use crate::models::user::{CartItem, NewUser, User, WishlistItem};

pub mod memory;
pub mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Atomic per-record access to user documents.
///
/// The one seam between the request path and storage. Production uses
/// [`PgUserStore`]; tests and local development use [`MemoryUserStore`].
/// Every method is a single logical read or whole-record update - callers
/// never see partial state.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError>;

    /// Get a user by ID. `None` if no such record.
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Get a user by email. `None` if no such record.
    async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Get a user and their password hash by email.
    ///
    /// The hash never rides on [`User`]; only credential verification sees it.
    async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError>;

    /// Replace a user's cart wholesale. Returns `false` if the record is gone.
    async fn set_cart(&self, id: UserId, items: Vec<CartItem>) -> Result<bool, RepositoryError>;

    /// Replace a user's wishlist wholesale. Returns `false` if the record is gone.
    async fn set_wishlist(
        &self,
        id: UserId,
        items: Vec<WishlistItem>,
    ) -> Result<bool, RepositoryError>;

    /// Verify the backing store is reachable. Used by the readiness probe.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
