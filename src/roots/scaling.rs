//! Scaling identity: sqrt(n) = sqrt(4n) / 2
//!
//! Instead of correcting the closest root with a quadratic, push n up by
//! factors of 4 until its floor root alone carries enough digits, then halve
//! the root back down once per step.

use super::search::{closest_by_ratio, closest_truncated};
use super::{Precision, Refinement, MAX_REFINEMENT_DEPTH};

/// Recursive form: f(n) = f(4n) / 2 until n > 2^scaling_bound_log2
pub fn sqrt_scaling(n: f64, precision: &Precision) -> f64 {
    sqrt_scaling_traced(n, precision).root
}

pub fn sqrt_scaling_traced(n: f64, precision: &Precision) -> Refinement<f64> {
    let bound = 2f64.powi(precision.scaling_bound_log2 as i32);
    scale(n, bound, 0)
}

fn scale(n: f64, bound: f64, depth: u32) -> Refinement<f64> {
    // n = 0 never grows, so the depth is the measure that ends it
    if n > bound || depth >= MAX_REFINEMENT_DEPTH {
        if n <= bound {
            tracing::debug!(depth, n, "scaling depth exhausted");
        }
        return Refinement { root: closest_truncated(n), depth };
    }

    let scaled = scale(4.0 * n, bound, depth + 1);
    Refinement {
        root: scaled.root / 2.0,
        depth: scaled.depth,
    }
}

/// Fixed-point form: one search on n * 2^(2*bits), divided by 2^bits
///
/// Inputs near the top of the f64 range leave no room for the full
/// pre-scale, so the scale drops one bit at a time until n * 2^(2*bits) is
/// finite. At that magnitude the search resolves far below one unit anyway.
pub fn sqrt_fixed_point(n: f64, precision: &Precision) -> f64 {
    let mut bits = precision.fixed_point_bits as i32;
    while bits > 0 && !(n * 2f64.powi(2 * bits)).is_finite() {
        bits -= 1;
    }
    if bits < precision.fixed_point_bits as i32 {
        tracing::debug!(n, bits, "fixed-point scale reduced to stay finite");
    }

    closest_by_ratio(n * 2f64.powi(2 * bits)) / 2f64.powi(bits)
}
