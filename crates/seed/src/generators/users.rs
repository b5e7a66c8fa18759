//! User batch generator.

use std::collections::HashSet;

use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use rand::Rng;

use catwatch_core::{UserRecord, UserRole};

use super::pick;

/// Random addresses drawn per batch, before the seed admin is added.
pub const RANDOM_EMAIL_COUNT: usize = 49;

/// Upper bound on the batch size (random addresses plus the seed admin).
pub const MAX_USERS: usize = RANDOM_EMAIL_COUNT + 1;

/// Plain-text password every seeded user signs in with.
pub const FIXTURE_PASSWORD: &str = "password";

/// Hash [`FIXTURE_PASSWORD`] for storage.
///
/// Hashing is slow on purpose, so do it once per batch and share the result.
///
/// # Errors
///
/// Returns `bcrypt::BcryptError` if hashing fails.
pub fn hash_fixture_password() -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(FIXTURE_PASSWORD, bcrypt::DEFAULT_COST)
}

/// Generate a batch of users.
///
/// Draws [`RANDOM_EMAIL_COUNT`] fake addresses plus `seed_admin_email`,
/// drops duplicates (first occurrence wins) and gives every address a random
/// role and name. The seed admin always ends up with the admin role.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    seed_admin_email: &str,
    password_hash: &str,
) -> Vec<UserRecord> {
    let mut emails: Vec<String> = (0..RANDOM_EMAIL_COUNT)
        .map(|_| SafeEmail().fake_with_rng(rng))
        .collect();
    emails.push(seed_admin_email.to_string());

    let mut seen = HashSet::with_capacity(emails.len());
    emails.retain(|email| seen.insert(email.clone()));

    emails
        .into_iter()
        .map(|email| {
            let mut role = pick(rng, UserRole::ALL);
            if email == seed_admin_email {
                role = UserRole::PRIVILEGED;
            }

            UserRecord {
                role,
                email,
                password: password_hash.to_string(),
                name: Name().fake_with_rng(rng),
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const ADMIN: &str = "admin@example.com";

    #[test]
    fn test_batch_size_and_unique_emails() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let users = generate(&mut rng, ADMIN, "hash");

            assert!(!users.is_empty());
            assert!(users.len() <= MAX_USERS);

            let emails: HashSet<&str> = users.iter().map(|u| u.email.as_str()).collect();
            assert_eq!(emails.len(), users.len(), "duplicate email with seed {seed}");
        }
    }

    #[test]
    fn test_seed_admin_is_always_admin() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let users = generate(&mut rng, ADMIN, "hash");

            let admins: Vec<&UserRecord> = users.iter().filter(|u| u.email == ADMIN).collect();
            assert_eq!(admins.len(), 1);
            assert_eq!(admins.first().unwrap().role, UserRole::Admin);
        }
    }

    #[test]
    fn test_other_users_get_random_roles() {
        let mut rng = StdRng::seed_from_u64(3);
        let users = generate(&mut rng, ADMIN, "hash");

        let members = users.iter().filter(|u| u.role == UserRole::Member).count();
        assert!(members > 0);
    }

    #[test]
    fn test_password_hash_is_shared() {
        let mut rng = StdRng::seed_from_u64(5);
        let users = generate(&mut rng, ADMIN, "$2b$12$fixture");
        assert!(users.iter().all(|u| u.password == "$2b$12$fixture"));
        assert!(users.iter().all(|u| !u.name.is_empty()));
    }

    #[test]
    fn test_malformed_seed_admin_is_kept() {
        let mut rng = StdRng::seed_from_u64(9);
        let users = generate(&mut rng, "not-an-email", "hash");
        let admin = users.iter().find(|u| u.email == "not-an-email").unwrap();
        assert!(admin.is_admin());
    }

    #[test]
    fn test_same_seed_same_batch() {
        let first = generate(&mut StdRng::seed_from_u64(11), ADMIN, "hash");
        let second = generate(&mut StdRng::seed_from_u64(11), ADMIN, "hash");
        assert_eq!(first, second);
    }

    #[test]
    fn test_fixture_password_hash_verifies() {
        let hash = hash_fixture_password().unwrap();
        assert_ne!(hash, FIXTURE_PASSWORD);
        assert!(bcrypt::verify(FIXTURE_PASSWORD, &hash).unwrap());
    }
}
