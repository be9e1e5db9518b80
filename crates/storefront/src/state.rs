//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::db::UserStore;
use crate::pages::PageStore;
use crate::services::{AuthService, ShopService};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Carries the configuration, the loaded page
/// namespace, and the services; all read-only after startup, so handlers
/// never coordinate through shared mutable state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pages: PageStore,
    users: Arc<dyn UserStore>,
    auth: AuthService,
    shop: ShopService,
}

impl AppState {
    /// Create a new application state over a user store.
    ///
    /// The store is the only swap point: production hands in a
    /// [`crate::db::PgUserStore`], tests a [`crate::db::MemoryUserStore`].
    #[must_use]
    pub fn new(config: StorefrontConfig, users: Arc<dyn UserStore>, pages: PageStore) -> Self {
        let auth = AuthService::new(Arc::clone(&users));
        let shop = ShopService::new(Arc::clone(&users));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pages,
                users,
                auth,
                shop,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the page store.
    #[must_use]
    pub fn pages(&self) -> &PageStore {
        &self.inner.pages
    }

    /// Get a reference to the user store.
    #[must_use]
    pub fn users(&self) -> &Arc<dyn UserStore> {
        &self.inner.users
    }

    /// Get a reference to the authentication service.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    /// Get a reference to the shop counter service.
    #[must_use]
    pub fn shop(&self) -> &ShopService {
        &self.inner.shop
    }
}
