//! Reseed pipeline.
//!
//! Each operation generates a fresh batch and replaces the table with it.
//! Coupons are mirrored to Stripe first, one at a time, and only written
//! locally once every remote call has succeeded.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{info, instrument, warn};

use catwatch_core::CouponRecord;

use crate::db::{SeedRow, SeedStore};
use crate::error::SeedError;
use crate::generators::{coupons, issues, users};
use crate::stripe::{CouponProvider, CreateCouponParams, StripeCoupon};

/// Outcome of one successful reseed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Plural entity label (e.g., "users").
    pub label: &'static str,
    /// Rows in the table after the replace.
    pub count: i64,
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Created {} {}", self.count, self.label)
    }
}

/// Replace every user with a fresh batch.
///
/// # Errors
///
/// Returns `SeedError::PasswordHash` if the fixture password cannot be
/// hashed, or `SeedError::Repository` if the replace fails.
#[instrument(skip(store, rng))]
pub async fn reseed_users<S, R>(
    store: &S,
    rng: &mut R,
    seed_admin_email: &str,
) -> Result<SeedReport, SeedError>
where
    S: SeedStore + Sync,
    R: Rng + ?Sized,
{
    let password_hash = users::hash_fixture_password()?;
    let batch = users::generate(rng, seed_admin_email, &password_hash);
    replace(store, &batch).await
}

/// Replace every issue with a fresh batch.
///
/// # Errors
///
/// Returns `SeedError::Repository` if the replace fails.
#[instrument(skip(store, rng))]
pub async fn reseed_issues<S, R>(store: &S, rng: &mut R) -> Result<SeedReport, SeedError>
where
    S: SeedStore + Sync,
    R: Rng + ?Sized,
{
    let batch = issues::generate(rng);
    replace(store, &batch).await
}

/// Generate coupons, create each one at the provider, then replace every
/// local coupon with the mirrored batch.
///
/// Remote coupons are never rolled back. If a provider call fails, the
/// coupons created before it are logged and returned in
/// `SeedError::Provider::orphaned`, and nothing is written locally.
///
/// # Errors
///
/// Returns `SeedError::Provider` on the first failed provider call, or
/// `SeedError::Repository` if the local replace fails.
#[instrument(skip(store, provider, rng))]
pub async fn reseed_coupons<S, P, R>(
    store: &S,
    provider: &P,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<SeedReport, SeedError>
where
    S: SeedStore + Sync,
    P: CouponProvider + Sync,
    R: Rng + ?Sized,
{
    let drafts = coupons::generate(rng, now);
    let mut mirrored: Vec<CouponRecord> = Vec::with_capacity(drafts.len());

    for draft in drafts {
        let params = CreateCouponParams::from_record(&draft);
        match provider.create_coupon(&params).await {
            Ok(remote) => mirrored.push(apply_remote(draft, &remote)),
            Err(source) => {
                let orphaned = codes(&mirrored);
                warn_orphaned(&orphaned);
                return Err(SeedError::Provider { source, orphaned });
            }
        }
    }
    info!(count = mirrored.len(), "Mirrored coupons to Stripe");

    match replace(store, &mirrored).await {
        Ok(report) => Ok(report),
        Err(e) => {
            warn_orphaned(&codes(&mirrored));
            Err(e)
        }
    }
}

/// Take the identifier Stripe assigned, and its expiration for coupons that
/// requested one.
fn apply_remote(mut coupon: CouponRecord, remote: &StripeCoupon) -> CouponRecord {
    if let Some(id) = &remote.id {
        coupon.code.clone_from(id);
    }
    if coupon.redeem_by.is_some()
        && let Some(at) = remote.redeem_by.and_then(|secs| DateTime::from_timestamp(secs, 0))
    {
        coupon.redeem_by = Some(at);
    }
    coupon
}

fn codes(coupons: &[CouponRecord]) -> Vec<String> {
    coupons.iter().map(|c| c.code.clone()).collect()
}

fn warn_orphaned(orphaned: &[String]) {
    if orphaned.is_empty() {
        return;
    }
    warn!(
        count = orphaned.len(),
        ?orphaned,
        "Coupons exist at Stripe without local rows"
    );
}

async fn replace<S, T>(store: &S, rows: &[T]) -> Result<SeedReport, SeedError>
where
    S: SeedStore + Sync,
    T: SeedRow + Sync,
{
    let count = store.replace_all(rows).await?;
    Ok(SeedReport {
        label: T::LABEL,
        count,
    })
}
