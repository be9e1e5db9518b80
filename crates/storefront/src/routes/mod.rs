//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Redirect to /home
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (store ping)
//!
//! # Pages (composed HTML)
//! GET  /{page}                  - Composed storefront page, 404 if unknown;
//!                                 302 to /auth/login when protected + anonymous
//! GET  /auth/{subpage}          - Auth form pages; 302 home when already
//!                                 authenticated and asking for login/register
//!
//! # Auth API (JSON)
//! POST /api/auth/register       - Create account, establish session
//! POST /api/auth/login          - Establish session
//! POST /api/auth/logout         - Flush session
//! GET  /api/auth/me             - Session probe for the header widget
//!
//! # Shop API (JSON)
//! GET  /api/shop/cart/count     - Cart badge count
//! GET  /api/shop/wishlist/count - Wishlist badge count
//!
//! # Static
//! GET  /static/*                - css/js assets (ServeDir)
//! ```

pub mod api;
pub mod pages;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_sessions::{SessionManagerLayer, SessionStore, service::SignedCookie};

use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

pub use pages::warn_missing_protected_pages;

/// Create the auth API routes router.
fn auth_api_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(api::auth::register))
        .route("/login", post(api::auth::login))
        .route("/logout", post(api::auth::logout))
        .route("/me", get(api::auth::me))
}

/// Create the shop API routes router.
fn shop_api_routes() -> Router<AppState> {
    Router::new()
        .route("/cart/count", get(api::shop::cart_count))
        .route("/wishlist/count", get(api::shop::wishlist_count))
}

/// Create the page and API routes (everything behind the session layer).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::root))
        .route("/auth/{subpage}", get(pages::auth_page))
        .route("/{page}", get(pages::content_page))
        .nest("/api/auth", auth_api_routes())
        .nest("/api/shop", shop_api_routes())
        .fallback(pages::not_found)
}

/// Assemble the full application router.
///
/// Shared between `main` and the integration tests so both exercise the same
/// middleware stack; only the session store (Postgres vs. memory) and the
/// Sentry layers differ between the two.
pub fn app<Store: SessionStore + Clone>(
    state: AppState,
    session_layer: SessionManagerLayer<Store, SignedCookie>,
) -> Router {
    let assets_dir = state.config().assets_dir.clone();

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .nest_service("/static", ServeDir::new(assets_dir))
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the backing store is reachable before returning OK.
/// Returns 503 Service Unavailable if it is not.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.users().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Readiness probe failed: {e}");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
