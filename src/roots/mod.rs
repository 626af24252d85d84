//! Square Roots by Hand - elementary-arithmetic square root algorithms
//!
//! Every variant computes sqrt(n) with +, -, *, / and comparisons only:
//! - Little squares: floor root + quadratic correction, recursing on the discriminant
//!   (i64, f64 and BigInt/big-float flavours)
//! - Scaling identity: f(n) = f(4n) / 2, recursive and fixed-point
//! - Digit extraction: bit-by-bit significand generation on the IEEE-754 layout
//! - Baselines: Newton-Raphson and bisection

pub mod baseline;
pub mod bigint;
pub mod bignum;
pub mod digits;
pub mod quadratic;
pub mod scaling;
pub mod search;

pub use baseline::*;
pub use bigint::*;
pub use digits::*;
pub use quadratic::*;
pub use scaling::*;
pub use search::*;

use num_bigint::BigInt;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Deepest recursion any refiner will descend to.
///
/// Each quadratic level recurses on exactly 4n, so 600 levels lift even the
/// smallest subnormal double past 2^53.
pub const MAX_REFINEMENT_DEPTH: u32 = 600;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SqrtError {
    #[error("Unknown variant: {0}")]
    UnknownVariant(String),
    #[error("Negative input: {0}")]
    NegativeInput(f64),
    #[error("Non-finite input: {0}")]
    NonFiniteInput(f64),
    #[error("Variant {variant} needs an integer input, got {input}")]
    NotAnInteger { variant: &'static str, input: f64 },
    #[error("Invalid precision: {0}")]
    InvalidPrecision(String),
}

/// Precision budget shared by every variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Precision {
    /// Relative error budget (absolute below 1)
    pub epsilon: f64,
    /// Mantissa bits of the big-float results
    pub big_float_bits: usize,
    /// Fixed-point variant scales n by 2^(2*bits) and divides the root by 2^bits
    pub fixed_point_bits: u32,
    /// Recursive scaling stops once n > 2^scaling_bound_log2
    pub scaling_bound_log2: u32,
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            big_float_bits: 50,
            fixed_point_bits: 20,
            scaling_bound_log2: 50,
        }
    }
}

impl Precision {
    /// Short-circuit ratio for the i64 refiner: diff/disc <= epsilon/42
    pub fn integer_threshold(&self) -> f64 {
        self.epsilon / 42.0
    }

    /// Short-circuit ratio for the BigInt refiner: diff/disc < epsilon/1e9
    pub fn big_threshold(&self) -> f64 {
        self.epsilon / 1e9
    }

    /// Acceptance test used by the verifier and the tests.
    ///
    /// The refiners converge on a ratio, so the tolerance grows with the root.
    pub fn accepts(&self, actual: f64, expected: f64) -> bool {
        (actual - expected).abs() <= self.epsilon * expected.abs().max(1.0)
    }

    pub fn validate(&self) -> Result<(), SqrtError> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(SqrtError::InvalidPrecision(format!(
                "epsilon must be positive and finite, got {}",
                self.epsilon
            )));
        }
        if self.big_float_bits == 0 {
            return Err(SqrtError::InvalidPrecision(
                "big_float_bits must be at least 1".to_string(),
            ));
        }
        if !(1..=26).contains(&self.fixed_point_bits) {
            return Err(SqrtError::InvalidPrecision(format!(
                "fixed_point_bits must be within 1..=26, got {}",
                self.fixed_point_bits
            )));
        }
        if !(4..=52).contains(&self.scaling_bound_log2) {
            return Err(SqrtError::InvalidPrecision(format!(
                "scaling_bound_log2 must be within 4..=52, got {}",
                self.scaling_bound_log2
            )));
        }
        Ok(())
    }
}

/// A root together with the recursion depth it took to produce it
#[derive(Debug, Clone, PartialEq)]
pub struct Refinement<T> {
    pub root: T,
    pub depth: u32,
}

/// All available square root algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    LittleSquares,
    LittleSquaresFloat,
    LittleSquaresBig,
    Scaling,
    FixedPoint,
    DigitExtraction,
    Newton,
    Bisection,
}

impl Variant {
    pub const ALL: [Variant; 8] = [
        Variant::LittleSquares,
        Variant::LittleSquaresFloat,
        Variant::LittleSquaresBig,
        Variant::Scaling,
        Variant::FixedPoint,
        Variant::DigitExtraction,
        Variant::Newton,
        Variant::Bisection,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Variant::LittleSquares => "little-squares",
            Variant::LittleSquaresFloat => "little-squares-float",
            Variant::LittleSquaresBig => "little-squares-big",
            Variant::Scaling => "scaling",
            Variant::FixedPoint => "fixed-point",
            Variant::DigitExtraction => "digit-extraction",
            Variant::Newton => "newton",
            Variant::Bisection => "bisection",
        }
    }

    /// Input -> output representation
    pub fn representation(&self) -> &'static str {
        match self {
            Variant::LittleSquares => "i64 -> f64",
            Variant::LittleSquaresFloat => "f64 -> f64",
            Variant::LittleSquaresBig => "BigInt -> big-float",
            Variant::Scaling => "f64 -> f64 (recursive 4n scaling)",
            Variant::FixedPoint => "f64 -> f64 (fixed-point pre-scale)",
            Variant::DigitExtraction => "f64 -> f64 (IEEE-754 bits)",
            Variant::Newton => "f64 -> f64",
            Variant::Bisection => "f64 -> f64",
        }
    }

    /// Parse from a name like "little-squares" or "little_squares"
    pub fn from_name(s: &str) -> Option<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Variant::ALL.into_iter().find(|v| v.name() == normalized)
    }

    /// Variants whose input must be an integer
    pub fn takes_integer(&self) -> bool {
        matches!(self, Variant::LittleSquares | Variant::LittleSquaresBig)
    }

    /// Bit-identical to a correctly rounded oracle
    pub fn is_exact(&self) -> bool {
        matches!(self, Variant::DigitExtraction)
    }

    /// Run the variant on `n`, converting to and from its native representation
    pub fn evaluate(&self, n: f64, precision: &Precision) -> Result<f64, SqrtError> {
        if !n.is_finite() {
            return Err(SqrtError::NonFiniteInput(n));
        }
        if n < 0.0 {
            return Err(SqrtError::NegativeInput(n));
        }

        let root = match self {
            Variant::LittleSquares => sqrt_little_squares(self.integer_input(n)?, precision),
            Variant::LittleSquaresFloat => sqrt_little_squares_float(n, precision),
            Variant::LittleSquaresBig => {
                // every integral f64 is exact as a BigInt, however large
                let big = match BigInt::from_f64(n) {
                    Some(big) if n.fract() == 0.0 => big,
                    _ => return Err(SqrtError::NotAnInteger { variant: self.name(), input: n }),
                };
                sqrt_little_squares_big(&big, precision).to_f64()
            }
            Variant::Scaling => sqrt_scaling(n, precision),
            Variant::FixedPoint => sqrt_fixed_point(n, precision),
            Variant::DigitExtraction => sqrt_digits(n),
            Variant::Newton => sqrt_newton(n),
            Variant::Bisection => sqrt_bisection(n),
        };

        tracing::debug!(variant = self.name(), input = n, root, "evaluated");
        Ok(root)
    }

    fn integer_input(&self, n: f64) -> Result<i64, SqrtError> {
        // 2^63 itself is not representable as i64
        if n.fract() != 0.0 || n >= 9_223_372_036_854_775_808.0 {
            return Err(SqrtError::NotAnInteger { variant: self.name(), input: n });
        }
        Ok(n as i64)
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERFECT_ROOTS: [f64; 8] = [2.0, 3.0, 4.0, 5.0, 1000.0, 1337.0, 42.0, 21398.0];

    const IMPERFECT: [(f64, f64); 5] = [
        (2.0, 1.41421356237),
        (3.0, 1.73205081),
        (105.0, 10.246950766),
        (1337.0, 36.5650106),
        (1337.0 * 1337.0 * 1337.0 + 1337.0, 48887.4328432),
    ];

    #[test]
    fn test_perfect_squares_every_variant() {
        let precision = Precision::default();
        for variant in Variant::ALL {
            for root in PERFECT_ROOTS {
                let actual = variant.evaluate(root * root, &precision).unwrap();
                assert!(
                    (actual - root).abs() <= 1e-9,
                    "{}: sqrt({}) = {}, want {}",
                    variant,
                    root * root,
                    actual,
                    root
                );
            }
        }
    }

    #[test]
    fn test_imperfect_squares_every_variant() {
        let precision = Precision::default();
        for variant in Variant::ALL {
            for (input, expected) in IMPERFECT {
                let actual = variant.evaluate(input, &precision).unwrap();
                assert!(
                    precision.accepts(actual, expected),
                    "{}: sqrt({}) = {}, want {}",
                    variant,
                    input,
                    actual,
                    expected
                );
            }
        }
    }

    #[test]
    fn test_sqrt_1337_scenario() {
        let precision = Precision::default();
        for variant in Variant::ALL {
            let actual = variant.evaluate(1337.0, &precision).unwrap();
            // the f64 refiner stops with a zero correction, about 1.4e-6 away
            let tolerance = if variant == Variant::LittleSquaresFloat { 2e-6 } else { 1e-6 };
            assert!((actual - 36.5650106).abs() <= tolerance, "{}: {}", variant, actual);
        }
    }

    #[test]
    fn test_variants_agree() {
        let precision = Precision::default();
        for input in [2.0, 7.0, 105.0, 1337.0, 1_000_003.0, 987_654_321.0] {
            let reference = Variant::DigitExtraction.evaluate(input, &precision).unwrap();
            for variant in Variant::ALL {
                let actual = variant.evaluate(input, &precision).unwrap();
                assert!(
                    (actual - reference).abs() <= 1e-5 * reference,
                    "{} disagrees on {}: {} vs {}",
                    variant,
                    input,
                    actual,
                    reference
                );
            }
        }
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let precision = Precision::default();
        assert_eq!(
            Variant::Newton.evaluate(-1.0, &precision),
            Err(SqrtError::NegativeInput(-1.0))
        );
        assert!(matches!(
            Variant::Scaling.evaluate(f64::NAN, &precision),
            Err(SqrtError::NonFiniteInput(_))
        ));
        assert!(matches!(
            Variant::LittleSquares.evaluate(2.5, &precision),
            Err(SqrtError::NotAnInteger { .. })
        ));
        assert!(matches!(
            Variant::LittleSquares.evaluate(1e19, &precision),
            Err(SqrtError::NotAnInteger { .. })
        ));
        assert!(matches!(
            Variant::LittleSquaresBig.evaluate(0.5, &precision),
            Err(SqrtError::NotAnInteger { .. })
        ));
        // non-integral inputs are fine for the real-valued variants
        assert!(Variant::LittleSquaresFloat.evaluate(2.5, &precision).is_ok());
    }

    #[test]
    fn test_big_variant_takes_integers_past_i64() {
        let precision = Precision::default();
        for n in [1e19, 1e30, f64::MAX] {
            let root = Variant::LittleSquaresBig.evaluate(n, &precision).unwrap();
            assert!((root / n.sqrt() - 1.0).abs() < 1e-12, "sqrt({:e}) = {:e}", n, root);
        }
    }

    #[test]
    fn test_fixed_point_near_f64_max() {
        let precision = Precision::default();
        for n in [1e297, 1e300, f64::MAX] {
            let root = Variant::FixedPoint.evaluate(n, &precision).unwrap();
            assert!(precision.accepts(root, n.sqrt()), "sqrt({:e}) = {:e}", n, root);
        }
    }

    #[test]
    fn test_acceptance_is_relative_not_absolute() {
        let precision = Precision::default();
        let n = 1337.0 * 1337.0 * 1337.0 + 1337.0;
        let root = Variant::LittleSquares.evaluate(n, &precision).unwrap();
        // the ratio short-circuit leaves an error proportional to the root
        assert!((root - n.sqrt()).abs() > precision.epsilon);
        assert!(precision.accepts(root, n.sqrt()));
        // below 1 the tolerance is absolute
        assert!(!precision.accepts(0.5 + 2e-6, 0.5));
    }

    #[test]
    fn test_variant_names_round_trip() {
        for variant in Variant::ALL {
            assert_eq!(Variant::from_name(variant.name()), Some(variant));
        }
        assert_eq!(Variant::from_name("little_squares_big"), Some(Variant::LittleSquaresBig));
        assert_eq!(Variant::from_name("Newton"), Some(Variant::Newton));
        assert_eq!(Variant::from_name("sqrt"), None);
    }

    #[test]
    fn test_precision_validation() {
        assert!(Precision::default().validate().is_ok());

        let bad = Precision { epsilon: 0.0, ..Precision::default() };
        assert!(matches!(bad.validate(), Err(SqrtError::InvalidPrecision(_))));

        let bad = Precision { fixed_point_bits: 40, ..Precision::default() };
        assert!(bad.validate().is_err());

        let bad = Precision { scaling_bound_log2: 60, ..Precision::default() };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_accepts_scales_with_root() {
        let precision = Precision::default();
        assert!(precision.accepts(1.0000005, 1.0));
        assert!(!precision.accepts(1.000002, 1.0));
        assert!(precision.accepts(48887.43, 48887.4328432));
    }
}
