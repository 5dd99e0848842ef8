//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Landing page with product grid
//! GET  /health                 - Health check
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add a product card (redirects back)
//! POST /cart/update            - Set a line quantity (redirects to /cart)
//! POST /cart/remove            - Remove a line (redirects to /cart)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout               - Order summary and checkout form
//! POST /checkout               - Submit the mock checkout
//! ```
//!
//! Every mutation ends in a redirect, so the page the shopper lands on is
//! re-rendered in full from the stored cart.

pub mod cart;
pub mod checkout;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show).post(checkout::submit))
}

/// Resolve a post-action redirect target.
///
/// Only same-site absolute paths are honoured; anything else (missing,
/// relative, protocol-relative, or a full URL) falls back to the landing page.
#[must_use]
pub fn local_redirect_target(raw: Option<&str>) -> &str {
    match raw.map(str::trim) {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path
        }
        _ => "/",
    }
}
