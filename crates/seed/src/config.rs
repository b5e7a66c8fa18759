//! Seed configuration loaded from environment variables.
//!
//! # Sources
//!
//! Values are looked up in this order, first match wins:
//!
//! 1. The process environment
//! 2. `instance/.env` - per-checkout instance overrides
//! 3. `.env` - shared development defaults
//! 4. Built-in defaults (below)
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATWATCH_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `SEED_ADMIN_EMAIL` - Address that always receives the admin role (default: dev@localhost.com)
//! - `STRIPE_SECRET_KEY` - Stripe secret key, required only for `add coupons`
//! - `STRIPE_API_BASE` - Stripe API base URL (default: <https://api.stripe.com/v1>)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::path::Path;

use secrecy::SecretString;
use thiserror::Error;

/// Instance-level override file, loaded before `.env`.
pub const INSTANCE_ENV_FILE: &str = "instance/.env";

/// Seed admin used when no instance sets one.
pub const DEFAULT_SEED_ADMIN_EMAIL: &str = "dev@localhost.com";

/// Stripe REST API base URL.
pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Seed tool configuration.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// Address that is always seeded as an admin
    pub seed_admin_email: String,
    /// Stripe configuration (optional - only `add coupons` needs it)
    pub stripe: Option<StripeConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging")
    pub sentry_environment: Option<String>,
}

/// Stripe API configuration.
///
/// Implements `Debug` manually to redact the secret key.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret key (sk_...)
    pub secret_key: SecretString,
    /// API base URL, overridable for tests and proxies
    pub api_base: String,
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl StripeConfig {
    fn from_source(source: &Source<'_>) -> Result<Option<Self>, ConfigError> {
        let Some(key) = source.optional("STRIPE_SECRET_KEY") else {
            return Ok(None);
        };

        if key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "STRIPE_SECRET_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        // Weak keys only warn
        if let Err(e) = validate_secret_strength(&key, "STRIPE_SECRET_KEY") {
            tracing::warn!("STRIPE_SECRET_KEY validation warning: {e}");
        }

        let api_base = source.or_default("STRIPE_API_BASE", DEFAULT_STRIPE_API_BASE);
        if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
            return Err(ConfigError::InvalidEnvVar(
                "STRIPE_API_BASE".to_string(),
                format!("not an http(s) URL: {api_base}"),
            ));
        }

        Ok(Some(Self {
            secret_key: SecretString::from(key),
            api_base: api_base.trim_end_matches('/').to_string(),
        }))
    }
}

impl SeedConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads `instance/.env` and then `.env` if present. Neither file
    /// overrides variables that are already set, so the instance file takes
    /// precedence over the shared one.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Missing files are fine; the defaults below apply
        let _ = dotenvy::from_path(Path::new(INSTANCE_ENV_FILE));
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = Source { lookup: &lookup };

        let database_url = source.database_url("CATWATCH_DATABASE_URL")?;
        let seed_admin_email = source.or_default("SEED_ADMIN_EMAIL", DEFAULT_SEED_ADMIN_EMAIL);
        let stripe = StripeConfig::from_source(&source)?;
        let sentry_dsn = source.optional("SENTRY_DSN");
        let sentry_environment = source.optional("SENTRY_ENVIRONMENT");

        Ok(Self {
            database_url,
            seed_admin_email,
            stripe,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns a reference to the Stripe configuration, if available.
    ///
    /// Returns `None` if `STRIPE_SECRET_KEY` was not set, which disables
    /// coupon seeding.
    #[must_use]
    pub const fn stripe(&self) -> Option<&StripeConfig> {
        self.stripe.as_ref()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Key lookup with the fallbacks shared by every variable.
struct Source<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl Source<'_> {
    /// Get an optional variable; empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Get database URL with fallback to generic `DATABASE_URL`.
    fn database_url(&self, primary_key: &str) -> Result<SecretString, ConfigError> {
        self.optional(primary_key)
            .or_else(|| self.optional("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<SeedConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        SeedConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_missing_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "CATWATCH_DATABASE_URL"));
    }

    #[test]
    fn test_database_url_fallback() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/catwatch")]).unwrap();
        assert_eq!(
            config.database_url.expose_secret(),
            "postgres://localhost/catwatch"
        );

        let config = load(&[
            ("CATWATCH_DATABASE_URL", "postgres://localhost/primary"),
            ("DATABASE_URL", "postgres://localhost/fallback"),
        ])
        .unwrap();
        assert_eq!(
            config.database_url.expose_secret(),
            "postgres://localhost/primary"
        );
    }

    #[test]
    fn test_seed_admin_default_and_override() {
        let config = load(&[("DATABASE_URL", "postgres://db")]).unwrap();
        assert_eq!(config.seed_admin_email, DEFAULT_SEED_ADMIN_EMAIL);

        let config = load(&[
            ("DATABASE_URL", "postgres://db"),
            ("SEED_ADMIN_EMAIL", "admin@example.com"),
        ])
        .unwrap();
        assert_eq!(config.seed_admin_email, "admin@example.com");
    }

    #[test]
    fn test_seed_admin_is_not_validated() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db"),
            ("SEED_ADMIN_EMAIL", "not-an-email"),
        ])
        .unwrap();
        assert_eq!(config.seed_admin_email, "not-an-email");
    }

    #[test]
    fn test_stripe_optional() {
        let config = load(&[("DATABASE_URL", "postgres://db")]).unwrap();
        assert!(config.stripe().is_none());
    }

    #[test]
    fn test_stripe_config() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db"),
            ("STRIPE_SECRET_KEY", "sk_test_4eC39HqLyjWDarjtT1zdp7dc"),
            ("STRIPE_API_BASE", "http://127.0.0.1:12111/v1/"),
        ])
        .unwrap();
        let stripe = config.stripe().unwrap();
        assert_eq!(stripe.api_base, "http://127.0.0.1:12111/v1");
        assert_eq!(
            stripe.secret_key.expose_secret(),
            "sk_test_4eC39HqLyjWDarjtT1zdp7dc"
        );
    }

    #[test]
    fn test_stripe_invalid_api_base() {
        let err = load(&[
            ("DATABASE_URL", "postgres://db"),
            ("STRIPE_SECRET_KEY", "sk_test_4eC39HqLyjWDarjtT1zdp7dc"),
            ("STRIPE_API_BASE", "api.stripe.com"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "STRIPE_API_BASE"));
    }

    #[test]
    fn test_stripe_debug_redacts_key() {
        let config = StripeConfig {
            secret_key: SecretString::from("sk_test_4eC39HqLyjWDarjtT1zdp7dc".to_string()),
            api_base: DEFAULT_STRIPE_API_BASE.to_string(),
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("sk_test"));
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_secret_placeholder() {
        let result = validate_secret_strength("sk_test_changeme_please", "KEY");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaa", "KEY");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_real_key() {
        assert!(validate_secret_strength("sk_test_4eC39HqLyjWDarjtT1zdp7dc", "KEY").is_ok());
    }
}
