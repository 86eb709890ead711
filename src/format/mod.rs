//! # Bit layouts
//!
//! A [`FormatSpec`] describes how a fixed-width word splits into sign,
//! exponent and mantissa fields:
//!
//! ```text
//! [Sign: 1 bit][Exponent: E bits][Mantissa: M bits]
//! index: 0      1 ..= E           E+1 ..= E+M
//! ```
//!
//! The exponent is stored with bias `2^(E-1) - 1`, the all-ones exponent code
//! is reserved for infinities and NaN.
//!
//! ```rust
//! use minifloat_scope::FormatSpec;
//!
//! let fp8 = FormatSpec::new(1, 4, 3).unwrap();
//! assert_eq!(fp8.total_bits(), 8);
//! assert_eq!(fp8.bias(), 7);
//! assert_eq!(fp8.to_string(), "e4m3");
//! ```

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::Serialize;

use crate::bitarray::packed::low_mask;
use crate::bitarray::{BitArray, MAX_BITS, PackedBitArray};
use crate::error::{FormatError, Result};

pub mod presets;

/// Widest exponent whose full range still fits `f64` (the binary64 exponent).
pub const MAX_EXPONENT_BITS: usize = 11;

/// Field widths of a binary floating-point format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FormatSpec {
    sign_bits: usize,
    exponent_bits: usize,
    mantissa_bits: usize,
    total_bits: usize,
    bias: i64,
}

impl FormatSpec {
    /// Validates a layout and derives its total width and exponent bias.
    ///
    /// # Arguments
    ///
    /// * `sign_bits` - Width of the sign field, must be 1
    /// * `exponent_bits` - Width of the biased exponent field, `1..=11`
    /// * `mantissa_bits` - Width of the fraction field, may be 0
    ///
    /// # Returns
    ///
    /// The layout with `total_bits = 1 + E + M` and bias `2^(E-1) - 1`.
    ///
    /// # Exponent limit
    ///
    /// Exponents wider than [`MAX_EXPONENT_BITS`] are rejected even when the
    /// total width is small (`e12m3` is only 16 bits). Their largest values
    /// exceed `f64::MAX` and their smallest fall below the binary64
    /// subnormals, so decoding them as `f64` would silently produce infinities
    /// and zeros.
    ///
    /// # Errors
    ///
    /// [`FormatError::InvalidFormat`] when `sign_bits != 1`,
    /// `exponent_bits` outside `1..=11`, or a total width above 64 bits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use minifloat_scope::{FormatError, FormatSpec};
    ///
    /// let bf16 = FormatSpec::new(1, 8, 7).unwrap();
    /// assert_eq!((bf16.total_bits(), bf16.bias()), (16, 127));
    ///
    /// assert!(matches!(FormatSpec::new(1, 0, 3), Err(FormatError::InvalidFormat(_))));
    /// assert!(matches!(FormatSpec::new(1, 12, 3), Err(FormatError::InvalidFormat(_))));
    /// ```
    pub fn new(sign_bits: usize, exponent_bits: usize, mantissa_bits: usize) -> Result<Self> {
        if sign_bits != 1 {
            return Err(FormatError::InvalidFormat(format!(
                "sign bits must be 1, got {sign_bits}"
            )));
        }
        if exponent_bits < 1 {
            return Err(FormatError::InvalidFormat(
                "exponent bits must be at least 1".to_string(),
            ));
        }
        if exponent_bits > MAX_EXPONENT_BITS {
            return Err(FormatError::InvalidFormat(format!(
                "exponent bits must be at most {MAX_EXPONENT_BITS}, got {exponent_bits}"
            )));
        }
        let total_bits = sign_bits
            .checked_add(exponent_bits)
            .and_then(|n| n.checked_add(mantissa_bits))
            .filter(|&n| n <= MAX_BITS)
            .ok_or_else(|| {
                FormatError::InvalidFormat(format!(
                    "total width 1 + {exponent_bits} + {mantissa_bits} exceeds {MAX_BITS} bits"
                ))
            })?;

        let bias = (1i64 << (exponent_bits - 1)) - 1;
        tracing::trace!(exponent_bits, mantissa_bits, bias, "format created");

        Ok(Self {
            sign_bits,
            exponent_bits,
            mantissa_bits,
            total_bits,
            bias,
        })
    }

    /// Shorthand for a one-sign-bit layout.
    pub fn with_layout(exponent_bits: usize, mantissa_bits: usize) -> Result<Self> {
        Self::new(1, exponent_bits, mantissa_bits)
    }

    /// Width of the sign field, always 1.
    pub fn sign_bits(&self) -> usize {
        self.sign_bits
    }

    /// Width of the exponent field `E`.
    pub fn exponent_bits(&self) -> usize {
        self.exponent_bits
    }

    /// Width of the mantissa field `M`.
    pub fn mantissa_bits(&self) -> usize {
        self.mantissa_bits
    }

    /// Pattern width, `1 + E + M`.
    pub fn total_bits(&self) -> usize {
        self.total_bits
    }

    /// Exponent bias, `2^(E-1) - 1`. Zero for one exponent bit.
    pub fn bias(&self) -> i64 {
        self.bias
    }

    /// Bit indices of the exponent field, MSB first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use minifloat_scope::FormatSpec;
    ///
    /// let fp8 = FormatSpec::new(1, 5, 2).unwrap();
    /// assert_eq!(fp8.exponent_range(), 1..6);
    /// assert_eq!(fp8.mantissa_range(), 6..8);
    /// ```
    pub fn exponent_range(&self) -> Range<usize> {
        self.sign_bits..self.sign_bits + self.exponent_bits
    }

    /// Bit indices of the mantissa field; empty when `M = 0`.
    pub fn mantissa_range(&self) -> Range<usize> {
        self.sign_bits + self.exponent_bits..self.total_bits
    }

    /// Exponent code reserved for infinities and NaN.
    pub fn reserved_exponent(&self) -> u64 {
        low_mask(self.exponent_bits)
    }

    /// All-ones mantissa, `2^M - 1`.
    pub fn mantissa_mask(&self) -> u64 {
        low_mask(self.mantissa_bits)
    }

    /// Number of distinct patterns, `2^total_bits`.
    pub fn pattern_count(&self) -> u128 {
        1u128 << self.total_bits
    }

    /// Patterns whose exponent field is all ones, under both signs.
    pub fn reserved_count(&self) -> u128 {
        2u128 << self.mantissa_bits
    }

    /// Patterns that decode to a finite value.
    pub fn finite_count(&self) -> u128 {
        self.pattern_count() - self.reserved_count()
    }

    /// Assembles a pattern from its fields.
    ///
    /// Returns `None` if `exponent` or `mantissa` do not fit their widths.
    pub fn compose(&self, sign: bool, exponent: u64, mantissa: u64) -> Option<PackedBitArray> {
        if exponent & !self.reserved_exponent() != 0 || mantissa & !self.mantissa_mask() != 0 {
            return None;
        }
        let word = (u64::from(sign) << (self.total_bits - 1))
            | (exponent << self.mantissa_bits)
            | mantissa;
        PackedBitArray::from_u64(word, self.total_bits)
    }
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}m{}", self.exponent_bits, self.mantissa_bits)
    }
}

/// Parses `e<E>m<M>` (case-insensitive), e.g. `e5m2`.
impl FromStr for FormatSpec {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || FormatError::InvalidFormat(format!("cannot parse layout {s:?}"));
        let lower = s.trim().to_ascii_lowercase();
        let rest = lower.strip_prefix('e').ok_or_else(invalid)?;
        let (exponent, mantissa) = rest.split_once('m').ok_or_else(invalid)?;
        let exponent_bits = exponent.parse().map_err(|_| invalid())?;
        let mantissa_bits = mantissa.parse().map_err(|_| invalid())?;
        Self::with_layout(exponent_bits, mantissa_bits)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(8, 23, 32, 127)]
    #[case(8, 7, 16, 127)]
    #[case(5, 10, 16, 15)]
    #[case(4, 3, 8, 7)]
    #[case(5, 2, 8, 15)]
    #[case(2, 1, 4, 1)]
    #[case(1, 0, 2, 0)]
    #[case(11, 52, 64, 1023)]
    fn test_derived_constants(
        #[case] exponent_bits: usize,
        #[case] mantissa_bits: usize,
        #[case] total_bits: usize,
        #[case] bias: i64,
    ) {
        let spec = FormatSpec::new(1, exponent_bits, mantissa_bits).unwrap();
        assert_eq!(spec.sign_bits(), 1);
        assert_eq!(spec.exponent_bits(), exponent_bits);
        assert_eq!(spec.mantissa_bits(), mantissa_bits);
        assert_eq!(spec.total_bits(), total_bits);
        assert_eq!(spec.bias(), bias);
    }

    #[rstest]
    #[case(1, 0, 3)]
    #[case(0, 4, 3)]
    #[case(2, 4, 3)]
    #[case(1, 11, 53)]
    #[case(1, 12, 0)]
    #[case(1, 12, 3)]
    #[case(1, 64, 0)]
    #[case(1, 8, usize::MAX)]
    fn test_invalid_format(
        #[case] sign_bits: usize,
        #[case] exponent_bits: usize,
        #[case] mantissa_bits: usize,
    ) {
        let result = FormatSpec::new(sign_bits, exponent_bits, mantissa_bits);
        assert!(matches!(result, Err(FormatError::InvalidFormat(_))));
    }

    #[test]
    fn test_field_ranges() {
        let spec = FormatSpec::new(1, 4, 3).unwrap();
        assert_eq!(spec.exponent_range(), 1..5);
        assert_eq!(spec.mantissa_range(), 5..8);
        assert_eq!(spec.reserved_exponent(), 0b1111);
        assert_eq!(spec.mantissa_mask(), 0b111);
    }

    #[rstest]
    #[case(4, 3, 256, 16)]
    #[case(2, 1, 16, 4)]
    #[case(5, 10, 65536, 2048)]
    #[case(11, 52, 1u128 << 64, 1u128 << 53)]
    fn test_counts(
        #[case] exponent_bits: usize,
        #[case] mantissa_bits: usize,
        #[case] patterns: u128,
        #[case] reserved: u128,
    ) {
        let spec = FormatSpec::with_layout(exponent_bits, mantissa_bits).unwrap();
        assert_eq!(spec.pattern_count(), patterns);
        assert_eq!(spec.reserved_count(), reserved);
        assert_eq!(spec.finite_count(), patterns - reserved);
    }

    #[test]
    fn test_compose() {
        let spec = FormatSpec::new(1, 4, 3).unwrap();
        let pattern = spec.compose(true, 0b1110, 0b101).unwrap();
        assert_eq!(pattern.to_bits_string(), "11110101");
        assert!(spec.compose(false, 0b10000, 0).is_none());
        assert!(spec.compose(false, 0, 0b1000).is_none());

        let spec = FormatSpec::new(1, 1, 0).unwrap();
        assert_eq!(spec.compose(true, 1, 0).unwrap().to_bits_string(), "11");

        let spec = FormatSpec::new(1, 11, 52).unwrap();
        let one = spec.compose(false, 1023, 0).unwrap();
        assert_eq!(one.to_u64(), Some(1.0f64.to_bits()));
    }

    #[rstest]
    #[case("e4m3", 4, 3)]
    #[case("E5M2", 5, 2)]
    #[case(" e8m23 ", 8, 23)]
    #[case("e1m0", 1, 0)]
    fn test_from_str(
        #[case] s: &str,
        #[case] exponent_bits: usize,
        #[case] mantissa_bits: usize,
    ) {
        let spec: FormatSpec = s.parse().unwrap();
        assert_eq!(spec, FormatSpec::with_layout(exponent_bits, mantissa_bits).unwrap());
        assert_eq!(spec.to_string(), s.trim().to_ascii_lowercase());
    }

    #[rstest]
    #[case("")]
    #[case("4m3")]
    #[case("e4")]
    #[case("e0m3")]
    #[case("exm3")]
    #[case("e-1m3")]
    fn test_from_str_invalid(#[case] s: &str) {
        assert!(matches!(
            s.parse::<FormatSpec>(),
            Err(FormatError::InvalidFormat(_))
        ));
    }
}
