//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use stylemart_core::Price;
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::Product;
use crate::chrome::{PageChrome, RevealSettings};
use crate::filters;
use crate::services::{SessionCartStore, SessionToasts};
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub handle: String,
    pub name: String,
    pub price: String,
    pub image: String,
    /// Stagger delay applied when the card scrolls into view.
    pub reveal_delay_ms: u64,
}

impl ProductCardView {
    fn new(product: &Product, index: usize, reveal: &RevealSettings) -> Self {
        Self {
            handle: product.handle.clone(),
            name: product.name.clone(),
            price: Price::parse(&product.price).to_string(),
            image: product.image.clone(),
            reveal_delay_ms: reveal.stagger_delay_ms(index),
        }
    }
}

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub chrome: PageChrome,
    pub products: Vec<ProductCardView>,
}

/// Display the landing page.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let store = SessionCartStore::new(session.clone());
    let toasts = SessionToasts::new(session);
    let chrome = PageChrome::load("/", &store, &toasts).await;

    let products = state
        .catalog()
        .products()
        .iter()
        .enumerate()
        .map(|(index, product)| ProductCardView::new(product, index, &chrome.reveal))
        .collect();

    HomeTemplate { chrome, products }
}
