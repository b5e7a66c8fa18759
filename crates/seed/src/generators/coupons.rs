//! Coupon batch generator.
//!
//! A coupon's shape follows one uniform draw, `random_pct` in `[0, 1)`:
//!
//! | `random_pct` | discount             | `max_redemptions` | `redeem_by`      |
//! |--------------|----------------------|-------------------|------------------|
//! | `< 0.5`      | 1..=1337 cents, USD  | none              | none             |
//! | `>= 0.5`     | 1..=100 percent      | 15..=50           | none             |
//! | `>= 0.75`    | 1..=100 percent      | 15..=50           | within one year  |
//!
//! Repeating coupons additionally get 1..=12 months.

use chrono::{DateTime, Utc};
use rand::Rng;

use catwatch_core::{CouponDuration, CouponRecord, CouponTerm, Currency, Discount};

use super::pick;

/// Coupons generated per batch.
pub const COUPON_COUNT: usize = 5;

/// Draws at or above this get a percentage discount and a redemption cap.
pub const PERCENT_OFF_THRESHOLD: f64 = 0.5;

/// Draws at or above this also get a redemption deadline.
pub const REDEEM_BY_THRESHOLD: f64 = 0.75;

const ONE_YEAR_SECS: i64 = 365 * 24 * 60 * 60;

/// Unambiguous code characters: no `0 1 B I O S`.
const CODE_ALPHABET: &[u8] = b"23456789ACDEFGHJKLMNPQRTUVWXYZ";
const CODE_GROUPS: usize = 3;
const CODE_GROUP_LEN: usize = 4;

/// The random choices that decide a coupon's shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CouponDraw {
    /// Uniform draw in `[0, 1)`.
    pub random_pct: f64,
    pub duration: CouponDuration,
}

impl CouponDraw {
    /// Draw `random_pct` uniformly from `[0, 1)` and a uniform duration.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            random_pct: rng.random::<f64>(),
            duration: pick(rng, CouponDuration::ALL),
        }
    }
}

/// Build one coupon from `draw`. Amounts, caps and dates are drawn from `rng`.
pub fn build<R: Rng + ?Sized>(rng: &mut R, draw: CouponDraw, now: DateTime<Utc>) -> CouponRecord {
    let code = random_code(rng);

    let (discount, max_redemptions) = if draw.random_pct >= PERCENT_OFF_THRESHOLD {
        (
            Discount::Percent {
                percent_off: rng.random_range(1..=100),
            },
            Some(rng.random_range(15..=50)),
        )
    } else {
        (
            Discount::Amount {
                amount_off: rng.random_range(1..=1337),
                currency: Currency::Usd,
            },
            None,
        )
    };

    let redeem_by = if draw.random_pct >= REDEEM_BY_THRESHOLD {
        random_redeem_by(rng, now)
    } else {
        None
    };

    let term = match draw.duration {
        CouponDuration::Forever => CouponTerm::Forever,
        CouponDuration::Once => CouponTerm::Once,
        CouponDuration::Repeating => CouponTerm::Repeating {
            months: rng.random_range(1..=12),
        },
    };

    CouponRecord {
        code,
        term,
        discount,
        redeem_by,
        max_redemptions,
    }
}

/// Generate [`COUPON_COUNT`] coupons.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Vec<CouponRecord> {
    (0..COUPON_COUNT)
        .map(|_| {
            let draw = CouponDraw::random(rng);
            build(rng, draw, now)
        })
        .collect()
}

/// A random `XXXX-XXXX-XXXX` code.
pub fn random_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_GROUPS)
        .map(|_| {
            (0..CODE_GROUP_LEN)
                .map(|_| char::from(pick(rng, CODE_ALPHABET)))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// A whole-second instant between `now` and one year later.
fn random_redeem_by<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let offset = rng.random_range(0..=ONE_YEAR_SECS);
    DateTime::from_timestamp(now.timestamp() + offset, 0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_high_draw_gets_percent_cap_and_deadline() {
        let mut rng = StdRng::seed_from_u64(1);
        let draw = CouponDraw {
            random_pct: 0.9,
            duration: CouponDuration::Forever,
        };
        let coupon = build(&mut rng, draw, now());

        let percent = coupon.discount.percent_off().unwrap();
        assert!((1..=100).contains(&percent));
        assert_eq!(coupon.discount.amount_off(), None);
        assert_eq!(coupon.discount.currency(), None);

        let cap = coupon.max_redemptions.unwrap();
        assert!((15..=50).contains(&cap));

        let redeem_by = coupon.redeem_by.unwrap();
        assert!(redeem_by >= now());
        assert!(redeem_by <= now() + Duration::days(365));

        assert_eq!(coupon.duration_in_months(), None);
    }

    #[test]
    fn test_mid_draw_has_no_deadline() {
        let mut rng = StdRng::seed_from_u64(2);
        let draw = CouponDraw {
            random_pct: 0.6,
            duration: CouponDuration::Once,
        };
        let coupon = build(&mut rng, draw, now());

        assert!(coupon.discount.percent_off().is_some());
        assert!(coupon.max_redemptions.is_some());
        assert_eq!(coupon.redeem_by, None);
    }

    #[test]
    fn test_low_draw_gets_usd_amount() {
        let mut rng = StdRng::seed_from_u64(3);
        let draw = CouponDraw {
            random_pct: 0.2,
            duration: CouponDuration::Forever,
        };
        let coupon = build(&mut rng, draw, now());

        let amount = coupon.discount.amount_off().unwrap();
        assert!((1..=1337).contains(&amount));
        assert_eq!(coupon.discount.currency(), Some(Currency::Usd));
        assert_eq!(coupon.discount.percent_off(), None);
        assert_eq!(coupon.max_redemptions, None);
        assert_eq!(coupon.redeem_by, None);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut rng = StdRng::seed_from_u64(4);
        let draw = CouponDraw {
            random_pct: PERCENT_OFF_THRESHOLD,
            duration: CouponDuration::Forever,
        };
        assert!(build(&mut rng, draw, now()).discount.percent_off().is_some());
    }

    #[test]
    fn test_repeating_gets_months() {
        let mut rng = StdRng::seed_from_u64(5);
        let draw = CouponDraw {
            random_pct: 0.1,
            duration: CouponDuration::Repeating,
        };
        let coupon = build(&mut rng, draw, now());

        assert_eq!(coupon.duration(), CouponDuration::Repeating);
        let months = coupon.duration_in_months().unwrap();
        assert!((1..=12).contains(&months));
    }

    #[test]
    fn test_generated_batch_invariants() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let coupons = generate(&mut rng, now());
            assert_eq!(coupons.len(), COUPON_COUNT);

            for coupon in coupons {
                let percent = coupon.discount.percent_off().is_some();
                let amount = coupon.discount.amount_off().is_some();
                assert!(percent ^ amount);
                assert_eq!(coupon.discount.currency().is_some(), amount);
                assert_eq!(coupon.max_redemptions.is_some(), percent);
                assert_eq!(
                    coupon.duration_in_months().is_some(),
                    coupon.duration() == CouponDuration::Repeating
                );
                if coupon.redeem_by.is_some() {
                    assert!(percent);
                }
            }
        }
    }

    #[test]
    fn test_code_format() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..50 {
            let code = random_code(&mut rng);
            assert_eq!(code.len(), 14);

            let groups: Vec<&str> = code.split('-').collect();
            assert_eq!(groups.len(), 3);
            for group in groups {
                assert_eq!(group.len(), 4);
                assert!(group.bytes().all(|b| CODE_ALPHABET.contains(&b)));
            }
            assert!(!code.contains(['0', '1', 'B', 'I', 'O', 'S']));
        }
    }
}
