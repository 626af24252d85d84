//! Little squares over big integers
//!
//! Same recursion as the i64 refiner, without overflow: the search and the
//! coefficients are BigInt, the ratio test and the correction are carried in
//! fixed-precision big floats. Depth stays bounded because the ratio falls
//! below 2 / sqrt(n) while n quadruples every level.

use std::cmp::Ordering;

use num_bigint::BigInt;
use super::bignum::{FixedFloat, FOUR, MINUS_TWO, ZERO};
use super::search::closest_big;
use super::{Precision, Refinement, MAX_REFINEMENT_DEPTH};

/// sqrt of a BigInt as a big float of `precision.big_float_bits` bits
pub fn sqrt_little_squares_big(n: &BigInt, precision: &Precision) -> FixedFloat {
    sqrt_little_squares_big_traced(n, precision).root
}

pub fn sqrt_little_squares_big_traced(n: &BigInt, precision: &Precision) -> Refinement<FixedFloat> {
    refine_big(n, precision, 0)
}

fn refine_big(n: &BigInt, precision: &Precision, depth: u32) -> Refinement<FixedFloat> {
    let closest = closest_big(n);
    let b = &closest * &*MINUS_TWO;
    let c = &closest * &closest - n;

    let correction = quadratic_big(&b, &c, precision, depth);
    let root = FixedFloat::from_int(&closest, precision.big_float_bits).sub(&correction.root);

    Refinement { root, depth: correction.depth }
}

// ( -b - sqrt(b^2 - 4c) ) / 2
fn quadratic_big(b: &BigInt, c: &BigInt, precision: &Precision, depth: u32) -> Refinement<FixedFloat> {
    let bits = precision.big_float_bits;
    let diff = &*FOUR * c;
    let disc = b * b - &diff;
    let minus_b = FixedFloat::from_int(&-b, bits);

    if disc <= *ZERO {
        return Refinement { root: minus_b.half(), depth };
    }

    let ratio = FixedFloat::from_int(&diff, bits).div(&FixedFloat::from_int(&disc, bits));
    let threshold = FixedFloat::from_f64(precision.big_threshold(), bits);
    tracing::trace!(depth, disc_bits = disc.bits(), ratio = %ratio, "big refinement level");

    if ratio.compare(&threshold) == Some(Ordering::Less) {
        return Refinement { root: ratio, depth };
    }
    if depth >= MAX_REFINEMENT_DEPTH {
        tracing::debug!(depth, "big refinement depth exhausted");
        return Refinement { root: FixedFloat::zero(bits), depth };
    }

    let disc_sqrt = refine_big(&disc, precision, depth + 1);
    Refinement {
        root: minus_b.sub(&disc_sqrt.root).half(),
        depth: disc_sqrt.depth,
    }
}
