//! Storefront page routes.
//!
//! Every HTML page goes through the same terminal dispatch: resolve the
//! visitor, gate protected pages, look the fragment up, compose it into the
//! shared shell. There is no per-page handler; pages are data, not code.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header::LOCATION},
    response::{Html, IntoResponse, Response},
};
use tracing::instrument;

use crate::compose::compose;
use crate::error::AppError;
use crate::middleware::{OptionalAuth, is_protected};
use crate::pages::PageStore;
use crate::state::AppState;

/// Page name `GET /` redirects to.
pub const HOME_PAGE: &str = "home";

/// Where anonymous requests for protected pages are sent.
pub const LOGIN_PATH: &str = "/auth/login";

/// A plain `302 Found` redirect.
///
/// `axum::response::Redirect` only issues 303/307/308; browsers chasing a
/// storefront page expect the classic 302.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_owned())]).into_response()
}

/// `GET /` - redirect to the home page.
pub async fn root() -> Response {
    found(&format!("/{HOME_PAGE}"))
}

/// `GET /{page}` - serve a composed storefront page.
///
/// Anonymous requests for protected pages are redirected to the login form;
/// unknown page names render the 404 page. A protected name missing from the
/// namespace falls through to the 404, never a redirect loop.
#[instrument(skip_all, fields(page = %page))]
pub async fn content_page(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(page): Path<String>,
) -> Response {
    if is_protected(&page) && user.is_none() {
        return found(LOGIN_PATH);
    }

    let Some(fragment) = state.pages().get(&page) else {
        return AppError::NotFound(page).into_response();
    };

    Html(compose(state.pages().shell(), fragment, user.as_ref())).into_response()
}

/// `GET /auth/{subpage}` - serve an auth form page.
///
/// Logged-in visitors asking for the login or registration form are sent
/// home instead of being shown a re-authentication UI.
#[instrument(skip_all, fields(subpage = %subpage))]
pub async fn auth_page(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(subpage): Path<String>,
) -> Response {
    if user.is_some() && matches!(subpage.as_str(), "login" | "register") {
        return found("/");
    }

    let name = format!("auth/{subpage}");
    let Some(fragment) = state.pages().get(&name) else {
        return AppError::NotFound(name).into_response();
    };

    Html(compose(state.pages().shell(), fragment, user.as_ref())).into_response()
}

/// Fallback for any path no route matched.
pub async fn not_found() -> Response {
    AppError::NotFound("unmatched path".to_owned()).into_response()
}

/// Log a warning for protected page names absent from the namespace.
///
/// Such a name still serves a 404 (the gate runs before the lookup, so there
/// is no redirect loop), but it usually means a fragment file went missing.
pub fn warn_missing_protected_pages(pages: &PageStore) {
    for name in crate::middleware::PROTECTED_PAGES {
        if !pages.contains(name) {
            tracing::warn!("Protected page {name:?} has no fragment; it will serve 404");
        }
    }
}
