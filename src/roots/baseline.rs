//! Baselines - Newton-Raphson and bisection over f64
//!
//! Neither needs an integer root search, which makes them a useful yardstick
//! for the little-squares refiners.

/// Newton-Raphson from x0 = max(n, 1)
///
/// From there every iterate sits at or above sqrt(n) and shrinks, so the loop
/// ends as soon as a step fails to make the iterate smaller.
pub fn sqrt_newton(n: f64) -> f64 {
    if n == 0.0 {
        return 0.0;
    }

    let mut x = n.max(1.0);
    let mut steps = 0_u32;
    loop {
        let next = (x + n / x) / 2.0;
        if next >= x {
            break;
        }
        x = next;
        steps += 1;
    }

    tracing::trace!(n, steps, "newton converged");
    x
}

/// Bisection on [0, max(n, 1)] until the midpoint collides with an endpoint
pub fn sqrt_bisection(n: f64) -> f64 {
    // tiny midpoints square to zero and would match
    if n == 0.0 {
        return 0.0;
    }

    let (mut low, mut high) = (0.0_f64, n.max(1.0));
    loop {
        let mid = low + (high - low) / 2.0;
        if mid <= low || mid >= high {
            break;
        }

        let squared = mid * mid;
        if squared == n {
            return mid;
        } else if squared < n {
            low = mid;
        } else {
            high = mid;
        }
    }

    low
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newton_perfect_squares() {
        for root in [1.0_f64, 2.0, 3.0, 5.0, 42.0, 1337.0, 21398.0, 0.5] {
            let actual = sqrt_newton(root * root);
            assert!((actual - root).abs() <= 1e-12 * root, "sqrt({}) = {}", root * root, actual);
        }
    }

    #[test]
    fn test_newton_matches_hardware() {
        for n in [2.0_f64, 105.0, 1337.0, 1e-8, 0.3, 1e15 + 7.0, 1e300] {
            let actual = sqrt_newton(n);
            assert!((actual / n.sqrt() - 1.0).abs() < 1e-15, "sqrt({}) = {}", n, actual);
        }
    }

    #[test]
    fn test_newton_zero() {
        assert_eq!(sqrt_newton(0.0), 0.0);
    }

    #[test]
    fn test_bisection_brackets_root() {
        for n in [2.0_f64, 3.0, 105.0, 1337.0, 0.5, 1e-10, 1e200] {
            let low = sqrt_bisection(n);
            assert!(low * low <= n, "n={} low={}", n, low);
            assert!((low / n.sqrt() - 1.0).abs() < 1e-15, "n={} low={}", n, low);
        }
    }

    #[test]
    fn test_bisection_edges() {
        assert_eq!(sqrt_bisection(0.0), 0.0);
        // the midpoint never reaches the upper endpoint
        assert!((sqrt_bisection(1.0) - 1.0).abs() < 1e-15);
        assert_eq!(sqrt_bisection(0.25), 0.5);
        assert_eq!(sqrt_bisection(4.0), 2.0);
        assert!(sqrt_bisection(f64::MAX).is_finite());
    }
}
