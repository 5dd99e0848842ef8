//! Domain models for storefront.
//!
//! Types stored in the browser session and shared between services and
//! route handlers.

pub mod session;

pub use session::{Toast, keys as session_keys};
