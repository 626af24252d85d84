//! Integer Root Search - binary search for the closest integer root
//!
//! Every search shares the same base case: n <= 4 returns 2. That seed is
//! where the recursive refiners bottom out, not a general answer for small n
//! (sqrt(0) and sqrt(1) are not 2), so inputs below 4 only make sense through
//! the refiners that correct it.
//!
//! The i64, f64 and BigInt searches return `high`, which sits at or above the
//! root; the truncating searches used by the scaling variants return `low`.

use std::cmp::Ordering;

use num_bigint::BigInt;

use super::bignum::{FOUR, ONE, TWO};

/// Seed returned for every n <= 4
pub const BASE_ROOT: i64 = 2;

/// Largest f64 below which every integer is exactly representable
pub const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Closest integer root of an i64, searching [1, n]
pub fn closest_int(n: i64) -> i64 {
    if n <= 4 {
        return BASE_ROOT;
    }

    let (mut low, mut high) = (1_i64, n);
    while low + 1 < high {
        let closest = low + (high - low) / 2;

        // Squares past i64::MAX are certainly above n
        let ordering = closest
            .checked_mul(closest)
            .map_or(Ordering::Greater, |squared| squared.cmp(&n));

        match ordering {
            Ordering::Equal => return closest,
            Ordering::Less => low = closest,
            Ordering::Greater => high = closest,
        }
    }

    high
}

/// Closest integer root of an f64, searching [1, n] with floored midpoints
pub fn closest_float(n: f64) -> f64 {
    if n <= 4.0 {
        return BASE_ROOT as f64;
    }

    let (mut low, mut high) = (1.0_f64, n);
    while low + 1.0 < high {
        let closest = ((high + low) / 2.0).floor();
        // Above 2^53 neighbouring doubles can leave no midpoint
        if closest <= low || closest >= high {
            break;
        }

        let squared = closest * closest;
        if squared == n {
            return closest;
        } else if squared < n {
            low = closest;
        } else {
            high = closest;
        }
    }

    high
}

/// Closest integer root searching [2, n] with truncated midpoints, returning `low`
pub fn closest_truncated(n: f64) -> f64 {
    search_low(n, |closest| {
        let squared = closest * closest;
        squared.partial_cmp(&n)
    })
}

/// Like [`closest_truncated`] but compares n / k / k against 1 instead of
/// squaring, so heavily scaled inputs never square a large k
pub fn closest_by_ratio(n: f64) -> f64 {
    search_low(n, |closest| {
        let comparison = n / closest / closest;
        1.0_f64.partial_cmp(&comparison)
    })
}

/// Shared bracket loop of the `low`-returning searches.
/// `probe` orders closest^2 against n.
fn search_low(n: f64, probe: impl Fn(f64) -> Option<Ordering>) -> f64 {
    if n <= 4.0 {
        return BASE_ROOT as f64;
    }

    let (mut low, mut high) = (2.0_f64, n);
    while low + 1.0 < high {
        let closest = ((high + low) / 2.0).trunc();
        if closest <= low || closest >= high {
            break;
        }

        match probe(closest) {
            Some(Ordering::Equal) => return closest,
            Some(Ordering::Less) => low = closest,
            Some(Ordering::Greater) => high = closest,
            None => break,
        }
    }

    low
}

/// Closest integer root of a BigInt, searching [1, n]
///
/// `low`, `high` and every midpoint are separately owned values; the shared
/// constants are only ever read.
pub fn closest_big(n: &BigInt) -> BigInt {
    if *n <= *FOUR {
        return TWO.clone();
    }

    let mut low = ONE.clone();
    let mut high = n.clone();
    while &low + &*ONE < high {
        let closest: BigInt = (&low + &high) / &*TWO;
        let squared = &closest * &closest;

        match squared.cmp(n) {
            Ordering::Equal => return closest,
            Ordering::Less => low = closest,
            Ordering::Greater => high = closest,
        }
    }

    high
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_case_returns_two() {
        for n in 0..=4 {
            assert_eq!(closest_int(n), 2);
            assert_eq!(closest_big(&BigInt::from(n)), BigInt::from(2));
            let n = n as f64;
            assert_eq!(closest_float(n), 2.0);
            assert_eq!(closest_truncated(n), 2.0);
            assert_eq!(closest_by_ratio(n), 2.0);
        }
        assert_eq!(closest_float(3.5), 2.0);
    }

    #[test]
    fn test_perfect_squares_are_exact() {
        for root in [3_i64, 5, 42, 1000, 1337, 21398, 3_037_000_499] {
            let n = root * root;
            assert_eq!(closest_int(n), root);
            assert_eq!(closest_big(&BigInt::from(n)), BigInt::from(root));
            if n < 1 << 52 {
                let (r, n) = (root as f64, n as f64);
                assert_eq!(closest_float(n), r);
                assert_eq!(closest_truncated(n), r);
                assert_eq!(closest_by_ratio(n), r);
            }
        }
    }

    #[test]
    fn test_high_brackets_the_root_from_above() {
        for n in [5_i64, 7, 105, 1337, 999_999_999, 2_389_981_090] {
            let k = closest_int(n);
            assert!(k * k >= n, "k={} n={}", k, n);
            assert!((k - 1) * (k - 1) < n, "k={} n={}", k, n);

            let kf = closest_float(n as f64);
            assert_eq!(kf, k as f64);
            assert_eq!(closest_big(&BigInt::from(n)), BigInt::from(k));
        }
    }

    #[test]
    fn test_low_is_the_floor_root() {
        for n in [5.0_f64, 7.0, 105.0, 1337.0, 123_456_789.0] {
            let k = closest_truncated(n);
            assert!(k * k <= n);
            assert!((k + 1.0) * (k + 1.0) > n);
            assert_eq!(closest_by_ratio(n), k);
        }
    }

    #[test]
    fn test_big_search_beyond_i64() {
        let root = BigInt::from(10).pow(30) + BigInt::from(7);
        let n = &root * &root;
        assert_eq!(closest_big(&n), root);

        let k = closest_big(&(&n + BigInt::from(1)));
        assert_eq!(k, &root + BigInt::from(1));
    }

    #[test]
    fn test_int_search_near_i64_max() {
        let k = closest_int(i64::MAX);
        assert_eq!(k, 3_037_000_500);
    }

    #[test]
    fn test_float_search_terminates_past_exact_range() {
        for n in [1e17, 1e30, 1e300, f64::MAX] {
            let k = closest_float(n);
            assert!(k.is_finite());
            let k = closest_truncated(n);
            assert!(k.is_finite());
        }
        assert!(closest_float(f64::INFINITY).is_infinite());
        assert!(closest_float(f64::NAN).is_nan());
    }
}
