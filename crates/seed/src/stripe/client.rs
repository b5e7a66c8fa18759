//! Stripe REST API client.
//!
//! Provides coupon creation over form-encoded requests authenticated with
//! the account's secret key.

use std::future::Future;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, instrument};

use super::error::StripeError;
use super::types::{CreateCouponParams, ErrorResponse, StripeCoupon};
use crate::config::StripeConfig;

/// Something that can create coupons remotely.
///
/// The reseed pipeline only talks to the payment provider through this
/// trait, so it can run against [`StripeClient`] or a test double.
pub trait CouponProvider {
    /// Create a coupon and return the provider's copy of it.
    fn create_coupon(
        &self,
        params: &CreateCouponParams,
    ) -> impl Future<Output = Result<StripeCoupon, StripeError>> + Send;
}

/// Stripe API client for creating coupons.
#[derive(Clone)]
pub struct StripeClient {
    /// HTTP client.
    client: Client,
    /// Secret key for authentication.
    secret_key: SecretString,
    /// API base URL without trailing slash.
    api_base: String,
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("secret_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl StripeClient {
    /// Create a new Stripe client.
    #[must_use]
    pub fn new(secret_key: SecretString, api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            secret_key,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from loaded configuration.
    #[must_use]
    pub fn from_config(config: &StripeConfig) -> Self {
        Self::new(config.secret_key.clone(), config.api_base.clone())
    }

    /// Get the API base URL.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Create a coupon.
    ///
    /// # Errors
    ///
    /// Returns `StripeError::Request` if Stripe cannot be reached,
    /// `StripeError::Api` if Stripe rejects the coupon, and
    /// `StripeError::Response` if the response cannot be read.
    #[instrument(skip(self, params), fields(code = %params.id))]
    pub async fn create_coupon(
        &self,
        params: &CreateCouponParams,
    ) -> Result<StripeCoupon, StripeError> {
        let response = self
            .client
            .post(format!("{}/coupons", self.api_base))
            .bearer_auth(self.secret_key.expose_secret())
            .form(params)
            .send()
            .await
            .map_err(|e| StripeError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StripeError::Response(e.to_string()))?;

        if !status.is_success() {
            let Ok(ErrorResponse { error: api }) = serde_json::from_str::<ErrorResponse>(&body)
            else {
                error!(%status, "Stripe returned a non-JSON error");
                return Err(StripeError::Response(format!(
                    "Stripe returned {status}: {body}"
                )));
            };

            error!(
                %status,
                kind = %api.kind,
                code = ?api.code,
                param = ?api.param,
                "Stripe API error creating coupon"
            );
            return Err(StripeError::Api {
                status: status.as_u16(),
                kind: api.kind,
                code: api.code,
                message: api.message.unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        let coupon: StripeCoupon =
            serde_json::from_str(&body).map_err(|e| StripeError::Response(e.to_string()))?;

        debug!(id = ?coupon.id, livemode = coupon.livemode, "Coupon created in Stripe");

        Ok(coupon)
    }
}

impl CouponProvider for StripeClient {
    fn create_coupon(
        &self,
        params: &CreateCouponParams,
    ) -> impl Future<Output = Result<StripeCoupon, StripeError>> + Send {
        Self::create_coupon(self, params)
    }
}
