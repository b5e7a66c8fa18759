//! Core types for Catwatch.
//!
//! This module provides the records written by the seeder and the
//! enumerations their columns draw from.

pub mod coupon;
pub mod issue;
pub mod text_enum;
pub mod user;

pub use coupon::{CouponDuration, CouponRecord, CouponTerm, Currency, Discount};
pub use issue::{IssueLabel, IssueRecord, IssueStatus};
pub use text_enum::ParseEnumError;
pub use user::{UserRecord, UserRole};
