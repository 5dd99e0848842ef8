//! Cart persistence.
//!
//! The cart lives in a single slot: one JSON string under a fixed key. Every
//! save overwrites the whole slot, so concurrent writers from the same browser
//! resolve as last-write-wins.
//!
//! Loading never fails. A missing slot, a blob that does not parse, or a
//! session backend error all produce an empty cart.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use stylemart_core::Cart;
use tower_sessions::Session;

use super::StoreError;
use crate::models::session_keys;

/// Storage for the shopper's cart.
pub trait CartStore: Send + Sync {
    /// Read the cart, substituting an empty one for anything unreadable.
    fn load(&self) -> impl Future<Output = Cart> + Send;

    /// Overwrite the stored cart.
    fn save(&self, cart: &Cart) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete the stored cart entirely.
    fn clear(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Decode a stored blob.
fn decode(raw: Option<&str>) -> Cart {
    let Some(raw) = raw else {
        return Cart::new();
    };
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Discarding unreadable cart");
        Cart::new()
    })
}

// =============================================================================
// Session-backed store
// =============================================================================

/// Cart store backed by the browser's session.
#[derive(Clone, Debug)]
pub struct SessionCartStore {
    session: Session,
}

impl SessionCartStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl CartStore for SessionCartStore {
    async fn load(&self) -> Cart {
        match self.session.get::<String>(session_keys::CART).await {
            Ok(raw) => decode(raw.as_deref()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read cart from session");
                Cart::new()
            }
        }
    }

    async fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        let raw = serde_json::to_string(cart)?;
        self.session.insert(session_keys::CART, raw).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.session.remove_value(session_keys::CART).await?;
        Ok(())
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// Cart store holding the slot in memory.
///
/// Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryCartStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryCartStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose slot already holds `raw`.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    /// The raw slot contents, or `None` if the slot is absent.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn write(&self, value: Option<String>) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = value;
    }
}

impl CartStore for MemoryCartStore {
    async fn load(&self) -> Cart {
        decode(self.raw().as_deref())
    }

    async fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        let raw = serde_json::to_string(cart)?;
        self.write(Some(raw));
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.write(None);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_load_missing_slot_is_empty() {
        let store = MemoryCartStore::new();
        assert!(store.load().await.is_empty());
        assert!(store.raw().is_none());
    }

    #[tokio::test]
    async fn test_load_corrupt_slot_is_empty() {
        for raw in ["not json", "null", "{\"name\":\"x\"}", "[{\"price\":\"$1\"}]"] {
            let store = MemoryCartStore::with_raw(raw);
            assert!(store.load().await.is_empty(), "raw {raw:?}");
        }
    }

    #[tokio::test]
    async fn test_save_overwrites_slot() {
        let store = MemoryCartStore::new();
        let mut cart = Cart::new();
        cart.add_item("Blue Shirt", "$50", "");
        store.save(&cart).await.unwrap();

        let other = MemoryCartStore::with_raw("[]");
        other.save(&cart).await.unwrap();
        assert_eq!(store.raw(), other.raw());

        store.save(&Cart::new()).await.unwrap();
        assert_eq!(store.raw().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_clones_share_slot() {
        let store = MemoryCartStore::new();
        let view = store.clone();
        let mut cart = Cart::new();
        cart.add_item("Hat", "$15", "");
        store.save(&cart).await.unwrap();

        assert_eq!(view.load().await, cart);
    }

    #[tokio::test]
    async fn test_clear_removes_slot() {
        let store = MemoryCartStore::with_raw("[]");
        store.clear().await.unwrap();
        assert!(store.raw().is_none());
    }

    #[tokio::test]
    async fn test_session_store_round_trip() {
        let store = SessionCartStore::new(session());
        let mut cart = Cart::new();
        cart.add_item("Blue Shirt", "$50", "");
        cart.add_item("Blue Shirt", "$50.00", "");
        store.save(&cart).await.unwrap();

        let loaded = store.load().await;
        assert_eq!(loaded, cart);
        assert_eq!(loaded.items()[0].quantity.get(), 2);
    }

    #[tokio::test]
    async fn test_session_store_holds_json_string() {
        let session = session();
        let store = SessionCartStore::new(session.clone());
        let mut cart = Cart::new();
        cart.add_item("Hat", "$15", "");
        store.save(&cart).await.unwrap();

        let raw: String = session.get(session_keys::CART).await.unwrap().unwrap();
        assert!(raw.starts_with('['));
        assert!(raw.contains("\"name\":\"Hat\""));
    }

    #[tokio::test]
    async fn test_session_store_tolerates_foreign_value() {
        let session = session();
        session
            .insert(session_keys::CART, vec![1, 2, 3])
            .await
            .unwrap();

        let store = SessionCartStore::new(session);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_session_store_clear() {
        let session = session();
        let store = SessionCartStore::new(session.clone());
        store.save(&Cart::new()).await.unwrap();
        store.clear().await.unwrap();

        let raw: Option<String> = session.get(session_keys::CART).await.unwrap();
        assert!(raw.is_none());
    }
}
