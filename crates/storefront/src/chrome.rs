//! Page chrome shared by every page: navigation, cart badge, toast, and the
//! settings the browser script needs for the reveal and fade-in effects.
//!
//! The effects themselves run in `static/js/site.js`. Reveal is driven by an
//! `IntersectionObserver` whose root margins are rendered from here, so
//! nothing is recomputed on every scroll event.

use crate::models::Toast;
use crate::services::{CartStore, SessionToasts};

/// File name standing in for the landing page.
const LANDING: &str = "index";

/// Navigation entries as `(label, href)`. `#` is a placeholder for pages that
/// do not exist yet; it highlights together with the landing page.
const NAV_ENTRIES: &[(&str, &str)] = &[
    ("Home", "/"),
    ("New Arrivals", "#"),
    ("Cart", "/cart"),
    ("Checkout", "/checkout"),
];

/// One navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

/// Build the navigation for the page at `current_path`.
#[must_use]
pub fn nav_links(current_path: &str) -> Vec<NavLink> {
    NAV_ENTRIES
        .iter()
        .map(|&(label, href)| NavLink {
            label,
            href,
            active: is_active(href, current_path),
        })
        .collect()
}

/// Whether a link to `href` should be highlighted on `current_path`.
///
/// Compares file names: the last path segment, with an empty segment meaning
/// the landing page. A `#` placeholder matches the landing page.
#[must_use]
pub fn is_active(href: &str, current_path: &str) -> bool {
    let target = if href == "#" {
        LANDING
    } else {
        page_name(href)
    };
    target == page_name(current_path)
}

/// Last path segment, ignoring query and fragment.
fn page_name(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.rsplit('/').next() {
        Some("" | "index.html") | None => LANDING,
        Some(name) => name,
    }
}

/// Reveal-on-scroll settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealSettings {
    /// Distance above the viewport bottom at which `.reveal` elements activate.
    pub offset_px: u32,
    /// Same, for product cards.
    pub product_offset_px: u32,
    /// Extra delay per product card index.
    pub stagger_ms: u32,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            offset_px: 80,
            product_offset_px: 60,
            stagger_ms: 80,
        }
    }
}

impl RevealSettings {
    /// Observer root margin for `.reveal` elements.
    #[must_use]
    pub fn root_margin(&self) -> String {
        bottom_margin(self.offset_px)
    }

    /// Observer root margin for product cards.
    #[must_use]
    pub fn product_root_margin(&self) -> String {
        bottom_margin(self.product_offset_px)
    }

    /// Appearance delay of the product card at `index`.
    #[must_use]
    pub fn stagger_delay_ms(&self, index: usize) -> u64 {
        u64::try_from(index)
            .unwrap_or(u64::MAX)
            .saturating_mul(u64::from(self.stagger_ms))
    }
}

fn bottom_margin(px: u32) -> String {
    format!("0px 0px -{px}px 0px")
}

/// Delay between the first frame and the `in` class on `<body>`.
pub const FADE_IN_DELAY_MS: u32 = 40;

/// Everything the base layout needs.
#[derive(Debug, Clone)]
pub struct PageChrome {
    pub nav: Vec<NavLink>,
    pub cart_count: u64,
    pub toast: Option<Toast>,
    pub reveal: RevealSettings,
    pub fade_in_delay_ms: u32,
}

impl PageChrome {
    /// Chrome for `current_path`, without touching any session state.
    #[must_use]
    pub fn new(current_path: &str, cart_count: u64, toast: Option<Toast>) -> Self {
        Self {
            nav: nav_links(current_path),
            cart_count,
            toast,
            reveal: RevealSettings::default(),
            fade_in_delay_ms: FADE_IN_DELAY_MS,
        }
    }

    /// Chrome for `current_path`: reads the badge count and takes the pending toast.
    pub async fn load<S: CartStore>(current_path: &str, store: &S, toasts: &SessionToasts) -> Self {
        let cart_count = store.load().await.item_count();
        let toast = toasts.take().await;
        Self::new(current_path, cart_count, toast)
    }

    /// Whether the cart badge should be displayed.
    #[must_use]
    pub const fn show_badge(&self) -> bool {
        self.cart_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_name() {
        assert_eq!(page_name("/"), LANDING);
        assert_eq!(page_name(""), LANDING);
        assert_eq!(page_name("/index.html"), LANDING);
        assert_eq!(page_name("/cart"), "cart");
        assert_eq!(page_name("/shop/cart?x=1"), "cart");
        assert_eq!(page_name("/checkout#form"), "checkout");
    }

    #[test]
    fn test_is_active_matches_file_name() {
        assert!(is_active("/cart", "/cart"));
        assert!(is_active("/", "/"));
        assert!(!is_active("/cart", "/checkout"));
        assert!(!is_active("/", "/cart"));
    }

    #[test]
    fn test_placeholder_matches_landing_only() {
        assert!(is_active("#", "/"));
        assert!(!is_active("#", "/cart"));
    }

    #[test]
    fn test_nav_links_on_cart_page() {
        let active: Vec<&str> = nav_links("/cart")
            .into_iter()
            .filter(|link| link.active)
            .map(|link| link.label)
            .collect();
        assert_eq!(active, ["Cart"]);
    }

    #[test]
    fn test_nav_links_on_landing_page() {
        let active: Vec<&str> = nav_links("/")
            .into_iter()
            .filter(|link| link.active)
            .map(|link| link.label)
            .collect();
        assert_eq!(active, ["Home", "New Arrivals"]);
    }

    #[test]
    fn test_reveal_settings() {
        let reveal = RevealSettings::default();
        assert_eq!(reveal.root_margin(), "0px 0px -80px 0px");
        assert_eq!(reveal.product_root_margin(), "0px 0px -60px 0px");
        assert_eq!(reveal.stagger_delay_ms(0), 0);
        assert_eq!(reveal.stagger_delay_ms(3), 240);
    }

    #[test]
    fn test_badge_hidden_when_empty() {
        assert!(!PageChrome::new("/", 0, None).show_badge());
        assert!(PageChrome::new("/", 2, None).show_badge());
    }
}
