//! The shared toast slot.
//!
//! There is one pending toast per browser. Raising a toast replaces whatever
//! was pending (last call wins); rendering a page takes it out of the slot,
//! so each toast is shown once.

use std::future::Future;

use tower_sessions::Session;

use super::StoreError;
use crate::models::{Toast, session_keys};

/// Something that can put a toast in front of the shopper.
pub trait Notifier: Send + Sync {
    /// Show `toast`, replacing any pending one.
    fn show(&self, toast: Toast) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Toast slot stored in the browser session.
#[derive(Clone, Debug)]
pub struct SessionToasts {
    session: Session,
}

impl SessionToasts {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Take the pending toast, leaving the slot empty.
    ///
    /// An unreadable slot is treated as empty.
    pub async fn take(&self) -> Option<Toast> {
        self.session
            .remove::<Toast>(session_keys::TOAST)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to read toast from session");
                None
            })
    }
}

impl Notifier for SessionToasts {
    async fn show(&self, toast: Toast) -> Result<(), StoreError> {
        tracing::debug!(message = %toast.message, duration_ms = toast.duration_ms, "Toast");
        self.session.insert(session_keys::TOAST, toast).await?;
        Ok(())
    }
}
