//! Mock checkout pipeline.
//!
//! A submission walks through named stages:
//!
//! ```text
//! Idle -> Validating -> Invalid                       (toast, back to the form)
//!                    -> Processing -> Completed       (toast, wait, toast, clear, wait)
//! ```
//!
//! No payment provider is contacted. The delays stand in for one and come
//! from an injectable [`Clock`] so tests can run without real timers. Once
//! processing starts there is no cancellation and no retry.

use std::future::Future;
use std::time::Duration;

use stylemart_core::{CheckoutDetails, CheckoutError, CheckoutForm, CheckoutStage};

use super::{CartStore, Notifier, StoreError};
use crate::config::CheckoutTimings;
use crate::models::Toast;

/// Where the shopper lands after a completed checkout.
pub const LANDING_PAGE: &str = "/";

/// Toast shown while the simulated payment runs.
pub const PROCESSING_MESSAGE: &str = "Processing payment...";
const PROCESSING_TOAST_DURATION: Duration = Duration::from_millis(1000);

/// The toast announcing the simulated payment.
///
/// The checkout page also renders it onto the form so the browser can show
/// it while the submission is held.
#[must_use]
pub fn processing_toast() -> Toast {
    Toast::with_duration(PROCESSING_MESSAGE, PROCESSING_TOAST_DURATION)
}

/// Toast shown once the order is placed.
pub const SUCCESS_MESSAGE: &str = "✅ Order placed! Thank you.";
const SUCCESS_TOAST_DURATION: Duration = Duration::from_millis(2200);

/// Source of delays.
pub trait Clock: Send + Sync {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Wall-clock delays via `tokio::time`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Result of a checkout submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// A required field was blank; the cart is untouched.
    Invalid(CheckoutError),
    /// The order was placed and the cart cleared.
    Completed {
        details: CheckoutDetails,
        redirect_to: &'static str,
    },
}

/// The staged mock checkout.
#[derive(Debug, Clone)]
pub struct CheckoutPipeline<C = TokioClock> {
    timings: CheckoutTimings,
    clock: C,
}

impl<C: Clock> CheckoutPipeline<C> {
    #[must_use]
    pub const fn new(timings: CheckoutTimings, clock: C) -> Self {
        Self { timings, clock }
    }

    #[must_use]
    pub const fn timings(&self) -> CheckoutTimings {
        self.timings
    }

    /// Run a submission through every stage.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if a toast or the cleared cart cannot be written
    /// to the session. Validation failures are not errors; they come back as
    /// [`CheckoutOutcome::Invalid`].
    pub async fn submit<S, N>(
        &self,
        form: &CheckoutForm,
        store: &S,
        notifier: &N,
    ) -> Result<CheckoutOutcome, StoreError>
    where
        S: CartStore,
        N: Notifier,
    {
        let mut stage = advance(CheckoutStage::Idle, CheckoutStage::Validating);

        let details = match form.validate() {
            Ok(details) => details,
            Err(err) => {
                stage = advance(stage, CheckoutStage::Invalid);
                tracing::info!(error = %err, "Checkout rejected");
                notifier.show(Toast::new(err.to_string())).await?;
                advance(stage, CheckoutStage::Idle);
                return Ok(CheckoutOutcome::Invalid(err));
            }
        };

        stage = advance(stage, CheckoutStage::Processing);
        notifier.show(processing_toast()).await?;
        self.clock.sleep(self.timings.processing_delay).await;

        notifier
            .show(Toast::with_duration(SUCCESS_MESSAGE, SUCCESS_TOAST_DURATION))
            .await?;
        store.clear().await?;
        tracing::info!(payment = ?details.payment, "Order placed");

        self.clock.sleep(self.timings.redirect_delay).await;
        advance(stage, CheckoutStage::Completed);

        Ok(CheckoutOutcome::Completed {
            details,
            redirect_to: LANDING_PAGE,
        })
    }
}

/// Log a stage transition and return the new stage.
fn advance(from: CheckoutStage, to: CheckoutStage) -> CheckoutStage {
    debug_assert!(from.can_transition_to(to), "illegal transition {from} -> {to}");
    tracing::debug!(%from, %to, "Checkout stage");
    to
}
