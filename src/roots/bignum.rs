//! Arbitrary precision arithmetic
//!
//! Unbounded integers come from `num-bigint`; fixed-precision floats wrap
//! astro-float's `BigFloat` so every operation rounds to one configured
//! mantissa width. The backend rounds widths up to a whole machine word, so
//! 50 requested bits are carried as 64.

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use astro_float::{BigFloat, Exponent, RoundingMode, Sign as FloatSign, Word, WORD_BIT_SIZE};
use num_bigint::{BigInt, Sign};

/// Default mantissa width of big-float results, in bits
pub const DEFAULT_FLOAT_BITS: usize = 50;

/// Rounding used by every big-float operation
pub const ROUNDING: RoundingMode = RoundingMode::ToEven;

// Read-only shared constants. Arithmetic always builds new values from them.
pub static ZERO: LazyLock<BigInt> = LazyLock::new(|| BigInt::from(0));
pub static ONE: LazyLock<BigInt> = LazyLock::new(|| BigInt::from(1));
pub static TWO: LazyLock<BigInt> = LazyLock::new(|| BigInt::from(2));
pub static FOUR: LazyLock<BigInt> = LazyLock::new(|| BigInt::from(4));
pub static MINUS_TWO: LazyLock<BigInt> = LazyLock::new(|| BigInt::from(-2));

/// Floating point value with a fixed mantissa precision
#[derive(Debug, Clone)]
pub struct FixedFloat {
    value: BigFloat,
    bits: usize,
}

impl FixedFloat {
    /// Exact conversion from a BigInt followed by a single rounding to `bits`
    pub fn from_int(n: &BigInt, bits: usize) -> Self {
        let (sign, limbs) = n.to_u64_digits();
        if limbs.is_empty() {
            return Self::zero(bits);
        }

        let words = limbs_to_words(&limbs);
        // Mantissa words read as 0.m, so an integer of w words has exponent w * WORD_BIT_SIZE
        let exponent = (words.len() * WORD_BIT_SIZE) as Exponent;
        let sign = if sign == Sign::Minus { FloatSign::Neg } else { FloatSign::Pos };

        let mut value = BigFloat::from_words(&words, sign, exponent);
        if let Err(err) = value.set_precision(bits, ROUNDING) {
            value = BigFloat::nan(Some(err));
        }
        Self { value, bits }
    }

    pub fn from_f64(f: f64, bits: usize) -> Self {
        Self { value: BigFloat::from_f64(f, bits), bits }
    }

    pub fn zero(bits: usize) -> Self {
        Self { value: BigFloat::from_word(0, bits), bits }
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    pub fn add(&self, other: &Self) -> Self {
        self.with(self.value.add(&other.value, self.bits, ROUNDING))
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.with(self.value.sub(&other.value, self.bits, ROUNDING))
    }

    pub fn mul(&self, other: &Self) -> Self {
        self.with(self.value.mul(&other.value, self.bits, ROUNDING))
    }

    pub fn div(&self, other: &Self) -> Self {
        self.with(self.value.div(&other.value, self.bits, ROUNDING))
    }

    /// self * 0.5
    pub fn half(&self) -> Self {
        let half = BigFloat::from_f64(0.5, self.bits);
        self.with(self.value.mul(&half, self.bits, ROUNDING))
    }

    /// None when either side is NaN
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        self.value.cmp(&other.value).map(|c| c.cmp(&0))
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_nan(&self) -> bool {
        self.value.is_nan()
    }

    /// Nearest f64, read from the normalized top mantissa words
    pub fn to_f64(&self) -> f64 {
        if self.value.is_nan() {
            return f64::NAN;
        }
        if self.value.is_inf_pos() {
            return f64::INFINITY;
        }
        if self.value.is_inf_neg() {
            return f64::NEG_INFINITY;
        }

        let Some((mantissa, _, sign, exponent, _)) = self.value.as_raw_parts() else {
            return f64::NAN;
        };

        // 128 bits is plenty for a 53-bit significand
        let taken = (128 / WORD_BIT_SIZE).min(mantissa.len());
        let mut fraction = 0.0_f64;
        for &word in mantissa.iter().rev().take(taken) {
            fraction = fraction * 2f64.powi(WORD_BIT_SIZE as i32) + word as f64;
        }
        if fraction == 0.0 {
            return 0.0;
        }

        // fraction * 2^-(taken bits) lies in [0.5, 1)
        let fraction = fraction * 2f64.powi(-((taken * WORD_BIT_SIZE) as i32));
        let magnitude = scale_by_power_of_two(fraction, exponent);
        if sign == FloatSign::Neg {
            -magnitude
        } else {
            magnitude
        }
    }

    fn with(&self, value: BigFloat) -> Self {
        Self { value, bits: self.bits }
    }
}

impl fmt::Display for FixedFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Split 64-bit limbs into backend words, least significant first
fn limbs_to_words(limbs: &[u64]) -> Vec<Word> {
    let per_limb = 64 / WORD_BIT_SIZE;
    limbs
        .iter()
        .flat_map(|&limb| (0..per_limb).map(move |i| (limb >> (i * WORD_BIT_SIZE)) as Word))
        .collect()
}

/// x * 2^e in steps that stay inside the f64 exponent range
fn scale_by_power_of_two(mut x: f64, mut e: Exponent) -> f64 {
    const STEP: Exponent = 1000;
    while e > STEP && x.is_finite() {
        x *= 2f64.powi(STEP);
        e -= STEP;
    }
    while e < -STEP && x != 0.0 {
        x *= 2f64.powi(-STEP);
        e += STEP;
    }
    x * 2f64.powi(e)
}
