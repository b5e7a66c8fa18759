//! Reseed commands.
//!
//! # Usage
//!
//! ```bash
//! # Replace every user (49 fake accounts plus the seed admin)
//! catwatch add users
//!
//! # Replace every issue
//! catwatch add issues
//!
//! # Create coupons at Stripe, then replace every local coupon
//! catwatch add coupons
//!
//! # All of the above, in order
//! catwatch add all
//! ```
//!
//! # Environment Variables
//!
//! - `CATWATCH_DATABASE_URL` - `PostgreSQL` connection string (or `DATABASE_URL`)
//! - `SEED_ADMIN_EMAIL` - Account that always gets the admin role
//! - `STRIPE_SECRET_KEY` - Secret key used to create coupons (coupons only)

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;

use catwatch_seed::db::{self, SeedRepository};
use catwatch_seed::stripe::StripeClient;
use catwatch_seed::{
    SeedConfig, SeedError, SeedReport, reseed_coupons, reseed_issues, reseed_users,
};

/// Loaded configuration plus the database pool, shared by every command.
pub struct AppContext {
    pool: PgPool,
    config: SeedConfig,
}

impl AppContext {
    /// Connect to the database named in `config`.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the connection cannot be established.
    pub async fn connect(config: SeedConfig) -> Result<Self, sqlx::Error> {
        info!("Connecting to database...");
        let pool = db::create_pool(&config.database_url).await?;
        Ok(Self { pool, config })
    }
}

/// Replace every user.
///
/// # Errors
///
/// Returns `SeedError` if hashing or the database replace fails.
pub async fn users(ctx: &AppContext) -> Result<SeedReport, SeedError> {
    let store = SeedRepository::new(&ctx.pool);
    let mut rng = rand::rng();
    reseed_users(&store, &mut rng, &ctx.config.seed_admin_email).await
}

/// Replace every issue.
///
/// # Errors
///
/// Returns `SeedError` if the database replace fails.
pub async fn issues(ctx: &AppContext) -> Result<SeedReport, SeedError> {
    let store = SeedRepository::new(&ctx.pool);
    let mut rng = rand::rng();
    reseed_issues(&store, &mut rng).await
}

/// Mirror a fresh coupon batch to Stripe and replace every local coupon.
///
/// # Errors
///
/// Returns `SeedError::StripeNotConfigured` without touching anything if no
/// secret key is set, otherwise any error from the pipeline.
pub async fn coupons(ctx: &AppContext) -> Result<SeedReport, SeedError> {
    let stripe = ctx.config.stripe().ok_or(SeedError::StripeNotConfigured)?;
    let client = StripeClient::from_config(stripe);
    let store = SeedRepository::new(&ctx.pool);
    let mut rng = rand::rng();
    reseed_coupons(&store, &client, &mut rng, Utc::now()).await
}

/// Print a completed step on stdout.
pub fn report(report: &SeedReport) {
    #[allow(clippy::print_stdout)]
    {
        println!("{report}");
    }
}
