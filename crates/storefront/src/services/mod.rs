//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Email/password registration and login
//! - `shop` - Cart and wishlist counters for the header widget

pub mod auth;
pub mod shop;

pub use auth::{AuthError, AuthService};
pub use shop::ShopService;
