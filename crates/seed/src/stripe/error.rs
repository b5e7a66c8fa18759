//! Stripe-related errors.

use thiserror::Error;

/// Errors that can occur when interacting with Stripe.
#[derive(Debug, Error)]
pub enum StripeError {
    /// HTTP request failed (connection refused, DNS, TLS, ...).
    #[error("Stripe request failed: {0}")]
    Request(String),

    /// Failed to read or parse the response.
    #[error("Stripe response error: {0}")]
    Response(String),

    /// Stripe API returned an error object.
    #[error("Stripe API error ({status} {kind}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Stripe error type (e.g., `invalid_request_error`).
        kind: String,
        /// Stripe error code (e.g., `resource_already_exists`).
        code: Option<String>,
        /// Human-readable message.
        message: String,
    },
}

impl StripeError {
    /// Returns true if Stripe could not be reached at all.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::Request(_))
    }
}
