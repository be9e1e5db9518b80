//! Identity resolution and the protected-page gate.
//!
//! [`OptionalAuth`] resolves the current user from the session. Resolution
//! never fails: a missing, expired, or undecodable session yields `None`,
//! and handlers treat `None` as an anonymous visitor.
//!
//! [`is_protected`] classifies page names against a fixed set. The router
//! redirects anonymous requests for protected pages to the login form.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// Page names that require an authenticated session.
pub const PROTECTED_PAGES: [&str; 4] = ["profile", "wishlist", "orders", "checkout"];

/// Whether a page name requires authentication.
///
/// The cart page is deliberately absent: carts are browsable anonymously
/// and only persist server-side once the visitor signs in.
#[must_use]
pub fn is_protected(page: &str) -> bool {
    PROTECTED_PAGES.contains(&page)
}

/// Extractor that resolves the current user, if any.
///
/// Never rejects: anonymous and broken sessions both resolve to `None`.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(
///     OptionalAuth(user): OptionalAuth,
/// ) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Hello, {}!", u.email),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // The session is placed in extensions by SessionManagerLayer.
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Helper to set the current user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_set_matches_account_pages() {
        assert!(is_protected("profile"));
        assert!(is_protected("wishlist"));
        assert!(is_protected("orders"));
        assert!(is_protected("checkout"));
    }

    #[test]
    fn public_pages_are_not_protected() {
        assert!(!is_protected("home"));
        assert!(!is_protected("shop"));
        assert!(!is_protected("cart"));
        assert!(!is_protected(""));
        // Classification is exact, not prefix-based.
        assert!(!is_protected("profiles"));
        assert!(!is_protected("Profile"));
    }
}
