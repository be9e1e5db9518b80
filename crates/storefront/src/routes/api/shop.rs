//! Cart and wishlist count API routes.
//!
//! These feed the header badges. Counts are advisory: anonymous callers get
//! zero, and every store-side failure already degrades to zero inside
//! [`crate::services::ShopService`], so the handlers are infallible.

use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

use crate::middleware::OptionalAuth;
use crate::state::AppState;

/// Response body for the count endpoints.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub success: bool,
    pub count: u64,
}

impl CountResponse {
    const fn of(count: u64) -> Self {
        Self {
            success: true,
            count,
        }
    }
}

/// `GET /api/shop/cart/count`
pub async fn cart_count(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> impl IntoResponse {
    let count = match user {
        Some(current) => state.shop().cart_count(current.id).await,
        None => 0,
    };

    Json(CountResponse::of(count))
}

/// `GET /api/shop/wishlist/count`
pub async fn wishlist_count(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> impl IntoResponse {
    let count = match user {
        Some(current) => state.shop().wishlist_count(current.id).await,
        None => 0,
    };

    Json(CountResponse::of(count))
}
