//! Reference square roots the hand-built variants are checked against

/// Something that knows the right answer
pub trait ReferenceOracle {
    fn name(&self) -> &str;

    fn sqrt(&self, n: f64) -> f64;
}

/// The platform's correctly rounded `f64::sqrt`
#[derive(Debug, Clone, Copy, Default)]
pub struct HardwareOracle;

impl ReferenceOracle for HardwareOracle {
    fn name(&self) -> &str {
        "hardware"
    }

    fn sqrt(&self, n: f64) -> f64 {
        n.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roots::sqrt_digits;

    #[test]
    fn test_hardware_oracle() {
        let oracle = HardwareOracle;
        assert_eq!(oracle.sqrt(1337.0 * 1337.0), 1337.0);
        assert!(oracle.sqrt(-1.0).is_nan());
        assert_eq!(oracle.name(), "hardware");
    }

    #[test]
    fn test_oracle_agrees_with_digit_extraction() {
        let oracle: &dyn ReferenceOracle = &HardwareOracle;
        for n in [2.0, 3.0, 105.0, 1337.0, 1e-310, 1e300] {
            assert_eq!(oracle.sqrt(n).to_bits(), sqrt_digits(n).to_bits());
        }
    }
}
