//! Random record generators.
//!
//! Each generator produces one complete batch for a table. Randomness is
//! always injected, so callers decide between the thread RNG and a seeded
//! `StdRng`:
//!
//! ```rust
//! use rand::{SeedableRng, rngs::StdRng};
//! use catwatch_seed::generators::issues;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let batch = issues::generate(&mut rng);
//! assert_eq!(batch.len(), issues::ISSUE_COUNT);
//! ```

pub mod coupons;
pub mod issues;
pub mod users;

use rand::Rng;

/// Pick one of `variants` uniformly.
///
/// # Panics
///
/// Panics if `variants` is empty. Text enum `ALL` lists never are.
pub(crate) fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, variants: &[T]) -> T {
    let index = rng.random_range(0..variants.len());
    #[allow(clippy::indexing_slicing)] // index is drawn from 0..len
    variants[index]
}
