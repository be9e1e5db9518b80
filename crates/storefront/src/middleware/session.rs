//! Session middleware configuration.
//!
//! Sets up tower-sessions over a pluggable store (`PostgreSQL` in
//! production, memory in tests). The session cookie is signed; the key is
//! derived from the configured session secret, so a tampered or forged
//! cookie never resolves to a session.

use secrecy::ExposeSecret;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "xs_platform_session";

/// Sessions expire after this many hours without a request.
const SESSION_EXPIRY_HOURS: i64 = 24;

/// Build the session layer over any backing store.
///
/// Shared between the production `PostgreSQL` store and the in-memory store
/// used in tests, so both carry the identical cookie policy: signed, lax
/// same-site, HTTP-only, 24-hour inactivity expiry.
///
/// # Panics
///
/// `Key::derive_from` panics on secrets shorter than 32 bytes;
/// [`StorefrontConfig`] rejects those before this point.
#[must_use]
pub fn session_layer<Store: SessionStore>(
    store: Store,
    config: &StorefrontConfig,
) -> SessionManagerLayer<Store, SignedCookie> {
    let key = Key::derive_from(config.session_secret.expose_secret().as_bytes());

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::hours(SESSION_EXPIRY_HOURS),
        ))
        .with_secure(config.is_https())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key)
}
