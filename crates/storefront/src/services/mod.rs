//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart_store` - Loading and saving the cart in the browser session
//! - `toast` - The single pending on-screen notification
//! - `checkout` - The staged mock checkout pipeline

pub mod cart_store;
pub mod checkout;
pub mod error;
pub mod toast;

pub use cart_store::{CartStore, MemoryCartStore, SessionCartStore};
pub use checkout::{CheckoutOutcome, CheckoutPipeline, Clock, TokioClock, processing_toast};
pub use error::StoreError;
pub use toast::{Notifier, SessionToasts};
