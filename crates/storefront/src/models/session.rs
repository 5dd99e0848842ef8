//! Session-related types.
//!
//! Everything the storefront remembers about a browser lives in its session:
//! the serialized cart and the pending toast.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A transient on-screen notification.
///
/// Stored in the session by whoever raises it and taken by the next page
/// render. There is only one slot, so a later toast replaces an earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    /// Text shown to the shopper.
    pub message: String,
    /// How long the toast stays visible before fading, in milliseconds.
    pub duration_ms: u64,
}

impl Toast {
    /// Display time used when none is given.
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(1200);

    /// Create a toast with the default display time.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_duration(message, Self::DEFAULT_DURATION)
    }

    /// Create a toast with an explicit display time.
    #[must_use]
    pub fn with_duration(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Session keys.
pub mod keys {
    /// Key for the serialized cart. The suffix doubles as the schema version.
    pub const CART: &str = "stylemart_cart_v1";

    /// Key for the pending toast.
    pub const TOAST: &str = "toast";
}
