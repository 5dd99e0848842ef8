//! StyleMart Core - Shared cart and checkout types.
//!
//! This crate provides the domain types used by the StyleMart storefront:
//! - `cart` - Line items and the ordered cart they live in
//! - `checkout` - Checkout form validation and the checkout stage machine
//! - `types` - Newtype wrappers for prices, quantities, and IDs
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no
//! session access, no HTTP. Persistence is the storefront's concern; this
//! crate only defines the JSON shape of a cart.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod types;

pub use cart::{Cart, LineItem};
pub use checkout::{CheckoutDetails, CheckoutError, CheckoutForm, CheckoutStage};
pub use types::*;
