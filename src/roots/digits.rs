//! Digit-by-digit square root on the IEEE-754 bit layout
//!
//! Non-recursive and allocation free: the significand of the root is produced
//! one bit at a time, most significant first, with round-half-even on the
//! final bit. The result is the correctly rounded square root.

/// Exponent field mask (after shifting)
const MASK: u64 = 0x7FF;
/// Position of the exponent field
const SHIFT: u32 = 64 - 11 - 1;
/// Exponent bias
const BIAS: i32 = 1023;

/// Raw bit pattern of an f64
///
/// Every shift and mask in this module operates on this integer view; the
/// float is only touched when converting in and out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct F64Bits(pub u64);

impl F64Bits {
    pub fn from_f64(x: f64) -> Self {
        Self(x.to_bits())
    }

    pub fn to_f64(self) -> f64 {
        f64::from_bits(self.0)
    }

    pub fn sign(self) -> bool {
        self.0 >> 63 == 1
    }

    /// Biased exponent field
    pub fn exponent(self) -> i32 {
        ((self.0 >> SHIFT) & MASK) as i32
    }

    /// Stored significand, without the implicit leading bit
    pub fn significand(self) -> u64 {
        self.0 & ((1 << SHIFT) - 1)
    }

    /// Assemble a positive value from a biased exponent and a stored significand
    pub fn from_parts(exponent: i32, significand: u64) -> Self {
        Self(((exponent as u64 & MASK) << SHIFT) | (significand & ((1 << SHIFT) - 1)))
    }
}

/// Correctly rounded square root of a finite, non-negative f64
pub fn sqrt_digits(x: f64) -> f64 {
    if x == 0.0 || !x.is_finite() {
        // +-0 and non-finite inputs pass through
        return x;
    }
    if x < 0.0 {
        return f64::NAN;
    }

    let bits = F64Bits::from_f64(x);
    let mut ix = bits.0;

    // normalize x
    let mut exp = bits.exponent();
    if exp == 0 {
        // subnormal: shift until the implicit bit position is set
        while ix & (1 << SHIFT) == 0 {
            ix <<= 1;
            exp -= 1;
        }
        exp += 1;
    }
    exp -= BIAS;
    ix &= !(MASK << SHIFT);
    ix |= 1 << SHIFT;
    if exp & 1 == 1 {
        // odd exponent, double x to make it even
        ix <<= 1;
    }
    // arithmetic shift: floor(exp / 2) for negative exponents too
    exp >>= 1;

    // generate sqrt(x) bit by bit
    ix <<= 1;
    let (mut q, mut s) = (0_u64, 0_u64);
    let mut r: u64 = 1 << (SHIFT + 1);
    while r != 0 {
        let t = s + r;
        if t <= ix {
            s = t + r;
            ix -= t;
            q += r;
        }
        ix <<= 1;
        r >>= 1;
    }

    // final rounding
    if ix != 0 {
        q += q & 1;
    }

    let ix = (q >> 1) + (((exp - 1 + BIAS) as u64) << SHIFT);
    F64Bits(ix).to_f64()
}
