//! Representable range of a format, computed from its extremal patterns
//! without enumerating the pattern space.

use serde::Serialize;

use crate::bitarray::PackedBitArray;
use crate::decoder::{DecodedValue, Decoder};
use crate::error::{FormatError, Result};
use crate::format::FormatSpec;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min_positive: f64,
    pub max_positive: f64,
    pub min_negative: f64,
    pub max_negative: f64,
    pub zero: f64,
}

impl Decoder {
    /// Smallest and largest positive finite values and their negatives.
    ///
    /// The smallest positive value is the subnormal with only the mantissa LSB
    /// set, or the smallest normal when there are no mantissa bits. The largest
    /// uses the highest non-reserved exponent code with an all-ones mantissa.
    ///
    /// # Errors
    ///
    /// [`FormatError::DegenerateRange`] when the format has no strictly
    /// positive finite value (one exponent bit and no mantissa).
    pub fn range(&self) -> Result<ValueRange> {
        let spec = self.spec();

        let min_pattern = if spec.mantissa_bits() > 0 {
            spec.compose(false, 0, 1)
        } else {
            spec.compose(false, 1, 0)
        };
        // the reserved code minus one clears its lowest bit: 1…10
        let max_pattern = spec.compose(false, spec.reserved_exponent() - 1, spec.mantissa_mask());

        let min_positive = self.positive(min_pattern)?;
        let max_positive = self.positive(max_pattern)?;

        tracing::debug!(format = %spec, min_positive, max_positive, "computed range");

        Ok(ValueRange {
            min_positive,
            max_positive,
            min_negative: -max_positive,
            max_negative: -min_positive,
            zero: 0.0,
        })
    }

    fn positive(&self, pattern: Option<PackedBitArray>) -> Result<f64> {
        let pattern = pattern.ok_or(FormatError::DegenerateRange)?;
        match self.decode(&pattern)? {
            DecodedValue::Finite(value) if value > 0.0 => Ok(value),
            _ => Err(FormatError::DegenerateRange),
        }
    }
}

/// [`Decoder::range`] with the default subnormal policy.
pub fn compute_range(spec: &FormatSpec) -> Result<ValueRange> {
    Decoder::new(*spec).range()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::decoder::SubnormalExponent;

    #[rstest]
    #[case(4, 3, 2f64.powi(-10), 240.0)]
    #[case(2, 1, 0.25, 3.0)]
    #[case(5, 2, 2f64.powi(-17), 57344.0)]
    #[case(5, 10, 2f64.powi(-25), 65504.0)]
    #[case(8, 7, 2f64.powi(-134), (2.0 - 2f64.powi(-7)) * 2f64.powi(127))]
    #[case(8, 23, 2f64.powi(-150), f32::MAX as f64)]
    #[case(3, 0, 0.25, 8.0)]
    #[case(1, 1, 0.5, 0.5)]
    fn test_reference_range(
        #[case] exponent_bits: usize,
        #[case] mantissa_bits: usize,
        #[case] min_positive: f64,
        #[case] max_positive: f64,
    ) {
        let spec = FormatSpec::with_layout(exponent_bits, mantissa_bits).unwrap();
        let range = compute_range(&spec).unwrap();
        assert_eq!(range.min_positive, min_positive);
        assert_eq!(range.max_positive, max_positive);
        assert_eq!(range.min_negative, -max_positive);
        assert_eq!(range.max_negative, -min_positive);
        assert_eq!(range.zero, 0.0);
    }

    #[rstest]
    #[case(4, 3, 2f64.powi(-9), 240.0)]
    #[case(5, 10, 2f64.powi(-24), 65504.0)]
    #[case(8, 23, f64::from(f32::from_bits(1)), f32::MAX as f64)]
    #[case(3, 0, 0.25, 8.0)]
    fn test_ieee_range(
        #[case] exponent_bits: usize,
        #[case] mantissa_bits: usize,
        #[case] min_positive: f64,
        #[case] max_positive: f64,
    ) {
        let spec = FormatSpec::with_layout(exponent_bits, mantissa_bits).unwrap();
        let range = Decoder::new(spec)
            .with_subnormal_exponent(SubnormalExponent::Ieee)
            .range()
            .unwrap();
        assert_eq!(range.min_positive, min_positive);
        assert_eq!(range.max_positive, max_positive);
    }

    #[test]
    fn test_degenerate_range() {
        let spec = FormatSpec::with_layout(1, 0).unwrap();
        assert_eq!(compute_range(&spec), Err(FormatError::DegenerateRange));
    }
}
