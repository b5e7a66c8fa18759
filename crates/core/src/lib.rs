//! Catwatch Core - Shared record types.
//!
//! This crate provides the types used across the Catwatch seed tools:
//! - `seed` - Generators, Stripe mirroring and the bulk replace pipeline
//! - `cli` - The `catwatch add` command group
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. Records here are the rows the seeder writes; how they are
//! generated and stored lives in `catwatch-seed`.
//!
//! # Modules
//!
//! - [`types`] - Roles, issue and coupon enumerations, and the three record kinds

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
