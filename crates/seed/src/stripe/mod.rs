//! Stripe integration for coupon mirroring.
//!
//! This module provides:
//! - [`StripeClient`] for creating coupons through the Stripe REST API
//! - [`CouponProvider`], the seam the reseed pipeline calls through
//! - Request/response types for the coupon endpoint
//!
//! Every seeded coupon must exist at Stripe before its local row is written;
//! the local `code` column holds the identifier Stripe assigned.

mod client;
mod error;
mod types;

pub use client::{CouponProvider, StripeClient};
pub use error::StripeError;
pub use types::{ApiErrorBody, CreateCouponParams, ErrorResponse, StripeCoupon};
