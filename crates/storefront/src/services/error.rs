//! Session storage error types.

use thiserror::Error;

/// Errors that can occur while writing to the browser session.
///
/// Reads never surface these: a cart or toast that cannot be read is treated
/// as absent.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The session backend rejected the operation.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// The value could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
