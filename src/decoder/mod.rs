//! # Decoding
//!
//! Maps a fixed-width bit pattern to the value it encodes under a
//! [`FormatSpec`], following IEEE 754 rules generalized to any width:
//!
//! - all-zero pattern: `0.0`
//! - exponent all ones: `±∞` when the mantissa is zero, otherwise NaN
//! - exponent zero: subnormal, significand `0.m`
//! - anything else: normalized, significand `1.m`
//!
//! ## Subnormal exponent
//!
//! IEEE 754 scales subnormals by `2^(1 - bias)`. The [`SubnormalExponent::Reference`]
//! policy instead scales them by `2^(-bias)`, which halves every subnormal
//! value. It is the default so that ranges and enumerations agree with
//! previously published tables; [`SubnormalExponent::Ieee`] gives the
//! standard behaviour.
//!
//! ```rust
//! use minifloat_scope::prelude::*;
//!
//! let fp8 = FormatSpec::new(1, 4, 3).unwrap();
//! let decoder = Decoder::new(fp8);
//!
//! assert_eq!(decoder.decode_bits(0b0_0111_000).unwrap(), DecodedValue::Finite(1.0));
//! assert_eq!(decoder.decode_bits(0b1_1111_000).unwrap(), DecodedValue::NegativeInfinity);
//! assert!(decoder.decode_str("01111001").unwrap().is_nan());
//!
//! let ieee = decoder.with_subnormal_exponent(SubnormalExponent::Ieee);
//! assert_eq!(decoder.decode_bits(0b0_0000_001).unwrap(), DecodedValue::Finite(2f64.powi(-10)));
//! assert_eq!(ieee.decode_bits(0b0_0000_001).unwrap(), DecodedValue::Finite(2f64.powi(-9)));
//! ```

use std::fmt;

use serde::Serialize;

use crate::bitarray::{BitArray, BoolBitArray, PackedBitArray};
use crate::error::{FormatError, Result};
use crate::format::FormatSpec;

pub mod enumerate;
pub mod range;

/// Value encoded by a bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DecodedValue {
    Finite(f64),
    PositiveInfinity,
    NegativeInfinity,
    /// Sign is not preserved.
    NaN,
}

impl DecodedValue {
    /// `true` for zeros, subnormals and normals.
    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Self::NaN)
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, Self::PositiveInfinity | Self::NegativeInfinity)
    }

    /// The finite value, `None` for infinities and NaN.
    pub fn finite(&self) -> Option<f64> {
        match *self {
            Self::Finite(value) => Some(value),
            _ => None,
        }
    }

    /// Converts to `f64`, mapping the special values to their `f64`
    /// counterparts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use minifloat_scope::DecodedValue;
    ///
    /// assert_eq!(DecodedValue::Finite(-1.5).to_f64(), -1.5);
    /// assert_eq!(DecodedValue::NegativeInfinity.to_f64(), f64::NEG_INFINITY);
    /// assert!(DecodedValue::NaN.to_f64().is_nan());
    /// ```
    pub fn to_f64(&self) -> f64 {
        match *self {
            Self::Finite(value) => value,
            Self::PositiveInfinity => f64::INFINITY,
            Self::NegativeInfinity => f64::NEG_INFINITY,
            Self::NaN => f64::NAN,
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(value) => write!(f, "{value}"),
            Self::PositiveInfinity => f.write_str("inf"),
            Self::NegativeInfinity => f.write_str("-inf"),
            Self::NaN => f.write_str("NaN"),
        }
    }
}

impl From<DecodedValue> for f64 {
    fn from(value: DecodedValue) -> Self {
        value.to_f64()
    }
}

/// Exponent applied to patterns whose exponent field is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum SubnormalExponent {
    /// `-bias`
    #[default]
    Reference,
    /// `1 - bias`
    Ieee,
}

/// `2^exponent`, exact over the whole binary64 range including subnormals.
fn exp2i(exponent: i64) -> f64 {
    const MIN_NORMAL: i64 = -1022;
    const MIN_SUBNORMAL: i64 = -1074;
    const MAX: i64 = 1023;

    match exponent {
        e if e > MAX => f64::INFINITY,
        e if e >= MIN_NORMAL => f64::from_bits(((e + MAX) as u64) << 52),
        e if e >= MIN_SUBNORMAL => f64::from_bits(1u64 << (e - MIN_SUBNORMAL)),
        _ => 0.0,
    }
}

/// A [`FormatSpec`] together with the subnormal policy used to decode it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decoder {
    spec: FormatSpec,
    subnormal: SubnormalExponent,
}

impl Decoder {
    /// Creates a decoder using the default [`SubnormalExponent::Reference`]
    /// policy.
    ///
    /// # Arguments
    ///
    /// * `spec` - The validated layout to decode
    pub fn new(spec: FormatSpec) -> Self {
        Self {
            spec,
            subnormal: SubnormalExponent::default(),
        }
    }

    /// Returns a copy of this decoder using `subnormal` for patterns whose
    /// exponent field is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use minifloat_scope::prelude::*;
    ///
    /// let fp4 = Decoder::new(FormatSpec::with_layout(2, 1).unwrap());
    /// let ieee = fp4.with_subnormal_exponent(SubnormalExponent::Ieee);
    /// assert_eq!(fp4.decode_str("0001").unwrap(), DecodedValue::Finite(0.25));
    /// assert_eq!(ieee.decode_str("0001").unwrap(), DecodedValue::Finite(0.5));
    /// ```
    pub fn with_subnormal_exponent(self, subnormal: SubnormalExponent) -> Self {
        Self { subnormal, ..self }
    }

    /// The layout being decoded.
    pub fn spec(&self) -> &FormatSpec {
        &self.spec
    }

    /// The active subnormal policy.
    pub fn subnormal_exponent(&self) -> SubnormalExponent {
        self.subnormal
    }

    /// Decodes `pattern`, which must be exactly `total_bits` long.
    ///
    /// # Errors
    ///
    /// [`FormatError::InvalidPattern`] on a width mismatch.
    pub fn decode<B: BitArray>(&self, pattern: &B) -> Result<DecodedValue> {
        let spec = &self.spec;
        if pattern.len() != spec.total_bits() {
            return Err(FormatError::InvalidPattern {
                expected: spec.total_bits(),
                actual: pattern.len(),
            });
        }
        if pattern.all_zeros() {
            return Ok(DecodedValue::Finite(0.0));
        }

        let invalid = || FormatError::InvalidPattern {
            expected: spec.total_bits(),
            actual: pattern.len(),
        };
        let sign = pattern.get(0).ok_or_else(invalid)?;
        let exponent = pattern.field(spec.exponent_range()).ok_or_else(invalid)?;
        let mantissa = pattern.field(spec.mantissa_range()).ok_or_else(invalid)?;

        Ok(self.decode_fields(sign, exponent, mantissa))
    }

    /// Decodes the low `total_bits` of `word`.
    ///
    /// # Errors
    ///
    /// [`FormatError::InvalidPattern`] when `word` has bits set above the
    /// format width.
    pub fn decode_bits(&self, word: u64) -> Result<DecodedValue> {
        let total_bits = self.spec.total_bits();
        let pattern =
            PackedBitArray::from_u64(word, total_bits).ok_or(FormatError::InvalidPattern {
                expected: total_bits,
                actual: (u64::BITS - word.leading_zeros()) as usize,
            })?;
        self.decode(&pattern)
    }

    /// Decodes a `'0'`/`'1'` string, `_` separators allowed.
    pub fn decode_str(&self, bits: &str) -> Result<DecodedValue> {
        self.decode(&BoolBitArray::from_bits_string(bits)?)
    }

    /// Core decoding on already extracted fields. `pattern` width has been
    /// checked by the caller, `exponent` and `mantissa` fit their masks.
    #[inline]
    pub(crate) fn decode_fields(&self, sign: bool, exponent: u64, mantissa: u64) -> DecodedValue {
        let spec = &self.spec;

        if exponent == spec.reserved_exponent() {
            return match (mantissa, sign) {
                (0, false) => DecodedValue::PositiveInfinity,
                (0, true) => DecodedValue::NegativeInfinity,
                _ => DecodedValue::NaN,
            };
        }

        let fraction = mantissa as f64 * exp2i(-(spec.mantissa_bits() as i64));
        let (significand, exponent) = if exponent == 0 {
            let exponent = match self.subnormal {
                SubnormalExponent::Reference => -spec.bias(),
                SubnormalExponent::Ieee => 1 - spec.bias(),
            };
            (fraction, exponent)
        } else {
            (1.0 + fraction, exponent as i64 - spec.bias())
        };

        let value = significand * exp2i(exponent);
        DecodedValue::Finite(if sign { -value } else { value })
    }
}

/// Decodes `pattern` under `spec` with the default subnormal policy.
pub fn decode<B: BitArray>(pattern: &B, spec: &FormatSpec) -> Result<DecodedValue> {
    Decoder::new(*spec).decode(pattern)
}
