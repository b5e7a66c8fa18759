//! Unified error handling for reseeding.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::stripe::StripeError;

/// Errors that abort a reseed.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    /// The payment provider rejected or never received a coupon.
    ///
    /// `orphaned` lists coupons created remotely earlier in the same batch
    /// that have no local row.
    #[error("{source}")]
    Provider {
        #[source]
        source: StripeError,
        orphaned: Vec<String>,
    },

    /// The fixture password could not be hashed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Coupons were requested without a Stripe secret key.
    #[error("STRIPE_SECRET_KEY is not set; coupons cannot be mirrored")]
    StripeNotConfigured,
}

impl SeedError {
    /// Remote coupon ids left without a local row, if any.
    #[must_use]
    pub fn orphaned(&self) -> &[String] {
        match self {
            Self::Provider { orphaned, .. } => orphaned,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display_and_orphans() {
        let err = SeedError::Provider {
            source: StripeError::Request("connection refused".to_string()),
            orphaned: vec!["ACDE-FGHJ-KLMN".to_string()],
        };
        assert_eq!(err.to_string(), "Stripe request failed: connection refused");
        assert_eq!(err.orphaned(), ["ACDE-FGHJ-KLMN".to_string()]);
    }

    #[test]
    fn test_other_errors_have_no_orphans() {
        assert!(SeedError::StripeNotConfigured.orphaned().is_empty());
    }
}
