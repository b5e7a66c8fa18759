//! Coupon records.
//!
//! A coupon mirrors a coupon created at the payment provider. Two column
//! invariants of the `coupons` table are carried by the types here instead of
//! being checked at runtime:
//!
//! - exactly one of `percent_off` or `amount_off` + `currency` is set
//!   ([`Discount`])
//! - `duration_in_months` is set only for repeating coupons ([`CouponTerm`])

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::define_text_enum;

define_text_enum! {
    /// How long a coupon applies once redeemed.
    CouponDuration {
        /// Applies to every invoice.
        Forever => "forever",
        /// Applies to a single invoice.
        Once => "once",
        /// Applies for a number of months.
        Repeating => "repeating",
    }
}

define_text_enum! {
    /// Currency of a fixed-amount coupon.
    Currency {
        Usd => "usd",
    }
}

/// Coupon duration together with its month count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "duration", rename_all = "snake_case")]
pub enum CouponTerm {
    Forever,
    Once,
    Repeating {
        /// Number of months the discount repeats for.
        months: i32,
    },
}

impl CouponTerm {
    /// The duration column value.
    #[must_use]
    pub const fn duration(&self) -> CouponDuration {
        match self {
            Self::Forever => CouponDuration::Forever,
            Self::Once => CouponDuration::Once,
            Self::Repeating { .. } => CouponDuration::Repeating,
        }
    }

    /// The `duration_in_months` column value.
    #[must_use]
    pub const fn duration_in_months(&self) -> Option<i32> {
        match self {
            Self::Repeating { months } => Some(*months),
            Self::Forever | Self::Once => None,
        }
    }
}

/// The discount a coupon grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discount {
    /// Percentage off the invoice total.
    Percent {
        /// Whole percent, 1-100.
        percent_off: i32,
    },
    /// Fixed amount off the invoice total.
    Amount {
        /// Amount in the smallest currency unit (e.g., cents for USD).
        amount_off: i32,
        currency: Currency,
    },
}

impl Discount {
    /// The `percent_off` column value.
    #[must_use]
    pub const fn percent_off(&self) -> Option<i32> {
        match self {
            Self::Percent { percent_off } => Some(*percent_off),
            Self::Amount { .. } => None,
        }
    }

    /// The `amount_off` column value.
    #[must_use]
    pub const fn amount_off(&self) -> Option<i32> {
        match self {
            Self::Amount { amount_off, .. } => Some(*amount_off),
            Self::Percent { .. } => None,
        }
    }

    /// The `currency` column value.
    #[must_use]
    pub const fn currency(&self) -> Option<Currency> {
        match self {
            Self::Amount { currency, .. } => Some(*currency),
            Self::Percent { .. } => None,
        }
    }
}

/// A row of the `coupons` table as written by the seeder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponRecord {
    /// Coupon code. Locally generated until the coupon has been mirrored,
    /// then the provider-assigned identifier.
    pub code: String,
    pub term: CouponTerm,
    pub discount: Discount,
    /// Last moment the coupon can be redeemed.
    pub redeem_by: Option<DateTime<Utc>>,
    /// Maximum number of redemptions across all customers.
    pub max_redemptions: Option<i32>,
}

impl CouponRecord {
    /// The duration column value.
    #[must_use]
    pub const fn duration(&self) -> CouponDuration {
        self.term.duration()
    }

    /// The `duration_in_months` column value.
    #[must_use]
    pub const fn duration_in_months(&self) -> Option<i32> {
        self.term.duration_in_months()
    }
}
