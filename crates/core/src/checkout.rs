//! Checkout form validation and the checkout stage machine.
//!
//! ```text
//! Idle -> Validating -> Invalid -> Idle
//!                    -> Processing -> Completed
//! ```
//!
//! Validation is presence-only: `name`, `email` and `address` must be
//! non-empty once trimmed. `payment` is optional and passed through as-is.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Raw checkout form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub payment: Option<String>,
}

/// A checkout submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutDetails {
    pub name: String,
    pub email: String,
    pub address: String,
    pub payment: Option<String>,
}

/// Errors that can occur when validating a [`CheckoutForm`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// One or more required fields were blank.
    #[error("Please fill in required fields")]
    MissingFields(Vec<&'static str>),
}

impl CheckoutForm {
    /// Validate the submission.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingFields`] naming every required field
    /// that is empty after trimming whitespace.
    pub fn validate(&self) -> Result<CheckoutDetails, CheckoutError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let address = self.address.trim();

        let missing: Vec<&'static str> = [("name", name), ("email", email), ("address", address)]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| field)
            .collect();
        if !missing.is_empty() {
            return Err(CheckoutError::MissingFields(missing));
        }

        Ok(CheckoutDetails {
            name: name.to_string(),
            email: email.to_string(),
            address: address.to_string(),
            payment: self.payment.clone(),
        })
    }
}

/// Named stages of a checkout submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckoutStage {
    /// Form rendered, nothing submitted.
    #[default]
    Idle,
    /// Submission received, checking required fields.
    Validating,
    /// A required field was blank. The form stays usable.
    Invalid,
    /// Simulated payment in flight. No way back from here.
    Processing,
    /// Cart cleared, heading to the landing page.
    Completed,
}

impl CheckoutStage {
    /// Whether moving from `self` to `next` is a legal transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Validating)
                | (Self::Validating, Self::Invalid | Self::Processing)
                | (Self::Invalid, Self::Idle)
                | (Self::Processing, Self::Completed)
        )
    }

    /// Lowercase stage name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Invalid => "invalid",
            Self::Processing => "processing",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
