//! Catwatch seed library.
//!
//! Fills a Catwatch development database with fake users, issues and
//! coupons. Coupons are created at Stripe first so the local `code` column
//! matches a real remote coupon.
//!
//! # Security
//!
//! This crate DELETES every row of the tables it seeds and creates coupons
//! on whichever Stripe account the secret key belongs to. Point it at
//! development databases and test-mode keys only.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration
//! - [`generators`] - Random record batches
//! - [`stripe`] - Coupon creation over the Stripe REST API
//! - [`db`] - Bulk replace of seeded tables
//! - [`reseed`] - The generate, mirror and replace pipeline

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod generators;
pub mod reseed;
pub mod stripe;

pub use config::{ConfigError, SeedConfig, StripeConfig};
pub use error::SeedError;
pub use reseed::{SeedReport, reseed_coupons, reseed_issues, reseed_users};
