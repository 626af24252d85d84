//! Little squares - quadratic refinement of the closest integer root
//!
//! With k the closest root, the correction x solves x^2 + b*x + c = 0 for
//! b = -2k and c = k^2 - n, so sqrt(n) = k - x with
//!
//!   x = (-b - sqrt(b^2 - 4c)) / 2
//!
//! The discriminant needs a square root of its own, so the refiner calls back
//! into itself. Since b^2 - 4c = 4n, each level works on four times the input
//! of the level above; the recursion depth is the progress measure and every
//! level either short-circuits on the ratio test or moves one step further up.

use super::search::{closest_float, closest_int, EXACT_INTEGER_LIMIT};
use super::{Precision, Refinement, MAX_REFINEMENT_DEPTH};

/// The f64 refiner stops once disc / b^2 reaches this ratio
pub const FLOAT_CONVERGENCE_RATIO: f64 = 0.9999999;

/// sqrt of an i64 using integer coefficients and an f64 correction
pub fn sqrt_little_squares(n: i64, precision: &Precision) -> f64 {
    sqrt_little_squares_traced(n, precision).root
}

pub fn sqrt_little_squares_traced(n: i64, precision: &Precision) -> Refinement<f64> {
    refine_int(n, precision, 0)
}

fn refine_int(n: i64, precision: &Precision, depth: u32) -> Refinement<f64> {
    let closest = closest_int(n);

    let coefficients = closest
        .checked_mul(closest)
        .and_then(|squared| squared.checked_sub(n))
        .map(|c| (-2 * closest, c));

    let correction = match coefficients {
        Some((b, c)) => quadratic_int(b, c, precision, depth),
        None => {
            tracing::debug!(depth, n, "coefficients overflow i64, no correction");
            Refinement { root: 0.0, depth }
        }
    };

    Refinement {
        root: closest as f64 - correction.root,
        depth: correction.depth,
    }
}

// ( -b - sqrt(b^2 - 4c) ) / 2
fn quadratic_int(b: i64, c: i64, precision: &Precision, depth: u32) -> Refinement<f64> {
    let terms = c
        .checked_mul(4)
        .and_then(|diff| b.checked_mul(b)?.checked_sub(diff).map(|disc| (diff, disc)));

    let Some((diff, disc)) = terms else {
        tracing::debug!(depth, b, c, "discriminant overflows i64, no correction");
        return Refinement { root: 0.0, depth };
    };

    if disc <= 0 {
        return Refinement { root: -b as f64 / 2.0, depth };
    }

    let ratio = diff as f64 / disc as f64;
    tracing::trace!(depth, disc, ratio, "integer refinement level");
    if ratio <= precision.integer_threshold() {
        return Refinement { root: ratio, depth };
    }
    if depth >= MAX_REFINEMENT_DEPTH {
        tracing::debug!(depth, disc, "refinement depth exhausted");
        return Refinement { root: 0.0, depth };
    }

    let disc_sqrt = refine_int(disc, precision, depth + 1);
    Refinement {
        root: (-b as f64 - disc_sqrt.root) / 2.0,
        depth: disc_sqrt.depth,
    }
}

/// sqrt of an f64 with the same structure, floating point throughout
pub fn sqrt_little_squares_float(n: f64, precision: &Precision) -> f64 {
    sqrt_little_squares_float_traced(n, precision).root
}

pub fn sqrt_little_squares_float_traced(n: f64, precision: &Precision) -> Refinement<f64> {
    refine_float(n, precision, 0)
}

fn refine_float(n: f64, precision: &Precision, depth: u32) -> Refinement<f64> {
    let closest = closest_float(n);
    let correction = quadratic_float(-2.0 * closest, closest * closest - n, precision, depth);

    Refinement {
        root: closest - correction.root,
        depth: correction.depth,
    }
}

fn quadratic_float(b: f64, c: f64, precision: &Precision, depth: u32) -> Refinement<f64> {
    let disc = b * b - 4.0 * c;

    if disc <= 0.0 {
        return Refinement { root: -b / 2.0, depth };
    }

    let ratio = disc / (b * b);
    tracing::trace!(depth, disc, ratio, "float refinement level");
    if ratio >= FLOAT_CONVERGENCE_RATIO {
        return Refinement { root: 0.0, depth };
    }
    // Past 2^53 the search can no longer land on exact integers
    if !disc.is_finite() || disc > EXACT_INTEGER_LIMIT || depth >= MAX_REFINEMENT_DEPTH {
        tracing::debug!(depth, disc, "float refinement exhausted, no correction");
        return Refinement { root: 0.0, depth };
    }

    let disc_sqrt = refine_float(disc, precision, depth + 1);
    Refinement {
        root: (-b - disc_sqrt.root) / 2.0,
        depth: disc_sqrt.depth,
    }
}
