//! XS Platform Core - Shared domain types.
//!
//! Types used by the storefront server and anything that later grows around
//! it (background jobs, tooling). The crate contains only types - no I/O, no
//! database access, no HTTP - so it can be pulled in anywhere without
//! dragging the web stack along.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and validated emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
