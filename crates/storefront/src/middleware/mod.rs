//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors; production only, added in `main`)
//! 2. Request ID (honor or mint `x-request-id`)
//! 3. Security headers (CSP, frame/sniffing protections)
//! 4. Session layer (tower-sessions, signed cookie)

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{
    OptionalAuth, PROTECTED_PAGES, clear_current_user, is_protected, set_current_user,
};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{SESSION_COOKIE_NAME, session_layer};
