//! Cart route handlers.
//!
//! The cart lives in the session (see [`SessionCartStore`]). Rows are
//! addressed by line item ID, never by position, so a form rendered before
//! another tab edited the cart cannot hit the wrong row.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use stylemart_core::{Cart, LineItem, LineItemId};
use tower_sessions::Session;
use tracing::instrument;

use super::local_redirect_target;
use crate::chrome::PageChrome;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::Toast;
use crate::services::{CartStore, Notifier, SessionCartStore, SessionToasts};
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub image: String,
    pub quantity: u32,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            price: item.price.clone(),
            image: item.image.clone(),
            quantity: item.quantity.get(),
            line_price: item.subtotal().to_string(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub handle: String,
    pub return_to: Option<String>,
}

/// Update quantity form data.
///
/// `quantity` is kept as raw text; anything unusable becomes 1.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: String,
    #[serde(default)]
    pub quantity: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub chrome: PageChrome,
    pub cart: CartView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Parse a line item ID from a form, treating garbage as "no such line".
fn parse_line_id(raw: &str) -> Option<LineItemId> {
    raw.parse().ok()
}

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let store = SessionCartStore::new(session.clone());
    let toasts = SessionToasts::new(session);

    let cart = store.load().await;
    let chrome = PageChrome::new("/cart", cart.item_count(), toasts.take().await);

    CartShowTemplate {
        chrome,
        cart: CartView::from(&cart),
    }
}

/// Add one unit of a catalog product to the cart.
///
/// Redirects back to `return_to` (a local path) with an "added" toast.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let product = state
        .catalog()
        .find(&form.handle)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.handle)))?;

    let store = SessionCartStore::new(session.clone());
    let mut cart = store.load().await;
    let quantity = cart.add_item(&product.name, &product.price, &product.image);
    store.save(&cart).await?;

    SessionToasts::new(session)
        .show(Toast::new(format!("{} added to cart", product.name)))
        .await?;

    add_breadcrumb("cart", "Added item", Some(&[("handle", product.handle.as_str())]));
    tracing::info!(handle = %product.handle, %quantity, "Added to cart");

    Ok(Redirect::to(local_redirect_target(form.return_to.as_deref())))
}

/// Set the quantity of a cart line.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    let store = SessionCartStore::new(session);
    let mut cart = store.load().await;

    match parse_line_id(&form.id).and_then(|id| cart.set_quantity(id, &form.quantity)) {
        Some(quantity) => {
            store.save(&cart).await?;
            tracing::debug!(id = %form.id, %quantity, "Updated cart line");
        }
        None => tracing::debug!(id = %form.id, "Ignoring update for unknown cart line"),
    }

    Ok(Redirect::to("/cart"))
}

/// Remove a cart line.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let store = SessionCartStore::new(session);
    let mut cart = store.load().await;

    match parse_line_id(&form.id).and_then(|id| cart.remove(id)) {
        Some(item) => {
            store.save(&cart).await?;
            tracing::debug!(name = %item.name, "Removed cart line");
        }
        None => tracing::debug!(id = %form.id, "Ignoring removal of unknown cart line"),
    }

    Ok(Redirect::to("/cart"))
}

/// Get cart count badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let count = SessionCartStore::new(session).load().await.item_count();
    CartCountTemplate { count }
}
