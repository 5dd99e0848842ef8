//! Integration tests for StyleMart.
//!
//! Each test starts the storefront in-process on an ephemeral port and talks
//! to it over HTTP with a cookie-keeping client, the way a browser would.
//! Every [`TestServer`] has its own session store, so tests never share carts.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p stylemart-integration-tests
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use stylemart_storefront::catalog::Catalog;
use stylemart_storefront::config::{CheckoutTimings, StorefrontConfig};
use stylemart_storefront::state::AppState;

/// Delays short enough to keep checkout tests fast.
pub const FAST_CHECKOUT: CheckoutTimings = CheckoutTimings {
    processing_delay: Duration::from_millis(5),
    redirect_delay: Duration::from_millis(5),
};

/// A running storefront plus a client that behaves like one browser.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestServer {
    /// Start a storefront with the built-in catalog and fast checkout timings.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound or the client cannot be built.
    pub async fn start() -> Self {
        Self::start_with(test_config()).await
    }

    /// Start a storefront with an explicit configuration.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound or the client cannot be built.
    pub async fn start_with(config: StorefrontConfig) -> Self {
        let state = AppState::new(config, Catalog::default());
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        tokio::spawn(async move {
            axum::serve(listener, stylemart_storefront::app(state))
                .await
                .expect("Test server error");
        });

        Self {
            addr,
            client: browser(),
        }
    }

    /// A second browser: same server, separate cookie jar.
    #[must_use]
    pub fn other_browser(&self) -> Client {
        browser()
    }

    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// GET `path` and return status and body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET failed");
        read(resp).await
    }

    /// POST a form to `path`, following the redirect like a browser.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> (StatusCode, String) {
        let resp = self
            .client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST failed");
        read(resp).await
    }

    /// Add a catalog product by handle.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn add(&self, handle: &str) -> (StatusCode, String) {
        self.post("/cart/add", &[("handle", handle), ("return_to", "/cart")])
            .await
    }

    /// The badge count as reported by `/cart/count`.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the fragment holds no number.
    pub async fn badge_count(&self) -> u64 {
        let (_, body) = self.get("/cart/count").await;
        extract_badge(&body).expect("No count in badge fragment")
    }
}

/// Configuration for tests: fast checkout and the storefront's static files.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/static"),
        checkout: FAST_CHECKOUT,
        ..StorefrontConfig::default()
    }
}

/// Line item IDs in the order they appear on the cart page.
#[must_use]
pub fn line_ids(cart_page: &str) -> Vec<String> {
    cart_page
        .split(r#"class="cart-item" data-id=""#)
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .map(str::to_string)
        .collect()
}

/// The number inside a `cart-count` badge.
#[must_use]
pub fn extract_badge(html: &str) -> Option<u64> {
    let (_, rest) = html.split_once(r#"class="cart-count""#)?;
    let (_, rest) = rest.split_once('>')?;
    let (count, _) = rest.split_once('<')?;
    count.trim().parse().ok()
}

fn browser() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

async fn read(resp: Response) -> (StatusCode, String) {
    let status = resp.status();
    let body = resp.text().await.expect("Failed to read body");
    (status, body)
}
