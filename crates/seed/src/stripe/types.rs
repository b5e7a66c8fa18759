//! Stripe coupon API types.
//!
//! These types represent the subset of the Stripe Coupons API the seeder
//! needs: the create request and the returned coupon object.
//!
//! See: <https://docs.stripe.com/api/coupons/create>

use serde::{Deserialize, Serialize};

use catwatch_core::{CouponDuration, CouponRecord, Currency};

/// Form parameters for `POST /v1/coupons`.
///
/// Unset options are left out of the request body entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateCouponParams {
    /// Requested coupon identifier (the local code).
    pub id: String,
    pub duration: CouponDuration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_off: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_off: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    /// Unix timestamp (seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redeem_by: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_redemptions: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_in_months: Option<i32>,
}

impl CreateCouponParams {
    /// Build the request for a generated coupon.
    #[must_use]
    pub fn from_record(coupon: &CouponRecord) -> Self {
        Self {
            id: coupon.code.clone(),
            duration: coupon.duration(),
            percent_off: coupon.discount.percent_off(),
            amount_off: coupon.discount.amount_off(),
            currency: coupon.discount.currency(),
            redeem_by: coupon.redeem_by.map(|at| at.timestamp()),
            max_redemptions: coupon.max_redemptions,
            duration_in_months: coupon.duration_in_months(),
        }
    }
}

/// A coupon object returned by Stripe.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StripeCoupon {
    /// Stripe-assigned identifier.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub percent_off: Option<f64>,
    #[serde(default)]
    pub amount_off: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub redeem_by: Option<i64>,
    #[serde(default)]
    pub max_redemptions: Option<i64>,
    #[serde(default)]
    pub duration_in_months: Option<i64>,
    #[serde(default)]
    pub livemode: bool,
}

/// Error envelope returned by Stripe on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ApiErrorBody,
}

/// Body of a Stripe API error.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Error type (e.g., `invalid_request_error`, `api_error`).
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Parameter the error relates to, if any.
    #[serde(default)]
    pub param: Option<String>,
}
