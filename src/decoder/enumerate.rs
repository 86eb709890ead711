//! Exhaustive enumeration of the finite values of a format.
//!
//! Patterns are visited in ascending integer order and decoded one by one;
//! infinities and NaN are skipped. The cost is `2^total_bits` decodes, so this
//! is meant for formats of roughly 20 bits or fewer.
//!
//! ```rust
//! use minifloat_scope::prelude::*;
//!
//! let spec = FormatSpec::new(1, 2, 1).unwrap();
//! let values: Vec<f64> = enumerate_finite_values(&spec).collect();
//! assert_eq!(values.len(), 12);
//! assert_eq!(&values[..6], &[0.0, 0.25, 1.0, 1.5, 2.0, 3.0]);
//! ```

use std::iter::FusedIterator;
use std::ops::Range;

use rayon::prelude::*;

use crate::decoder::{DecodedValue, Decoder};
use crate::error::{FormatError, Result};
use crate::format::FormatSpec;

/// Widest format the checked entry points agree to enumerate.
pub const MAX_ENUMERATION_BITS: usize = 32;

/// Lazy sequence of the finite values of a format, in pattern order.
///
/// Cloning or re-creating the iterator restarts the sequence.
#[derive(Debug, Clone)]
pub struct FiniteValues {
    decoder: Decoder,
    indices: Range<u128>,
}

impl FiniteValues {
    fn new(decoder: Decoder) -> Self {
        Self {
            indices: 0..decoder.spec().pattern_count(),
            decoder,
        }
    }

    /// Patterns not yet visited.
    pub fn remaining_patterns(&self) -> u128 {
        self.indices.end - self.indices.start
    }
}

impl Iterator for FiniteValues {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        for index in self.indices.by_ref() {
            // pattern_count <= 2^64, so every index fits a word
            if let DecodedValue::Finite(value) = self.decoder.decode_word(index as u64) {
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, usize::try_from(self.remaining_patterns()).ok())
    }
}

impl FusedIterator for FiniteValues {}

impl Decoder {
    /// Decodes a word already known to fit the format.
    #[inline]
    fn decode_word(&self, word: u64) -> DecodedValue {
        if word == 0 {
            return DecodedValue::Finite(0.0);
        }
        let spec = self.spec();
        let sign = (word >> (spec.total_bits() - 1)) & 1 == 1;
        let exponent = (word >> spec.mantissa_bits()) & spec.reserved_exponent();
        let mantissa = word & spec.mantissa_mask();
        self.decode_fields(sign, exponent, mantissa)
    }

    /// Every finite value of the format, lazily, in ascending pattern order.
    pub fn finite_values(&self) -> FiniteValues {
        tracing::debug!(
            format = %self.spec(),
            patterns = %self.spec().pattern_count(),
            "enumerating finite values"
        );
        FiniteValues::new(*self)
    }

    /// [`Decoder::finite_values`], refusing formats wider than
    /// [`MAX_ENUMERATION_BITS`].
    pub fn try_finite_values(&self) -> Result<FiniteValues> {
        self.check_enumerable()?;
        Ok(self.finite_values())
    }

    /// Enumerates on the rayon pool. The result has the same order as
    /// [`Decoder::finite_values`].
    pub fn par_finite_values(&self) -> Result<Vec<f64>> {
        self.check_enumerable()?;
        let patterns = self.spec().pattern_count() as u64;
        tracing::debug!(format = %self.spec(), patterns, "enumerating finite values in parallel");

        Ok((0..patterns)
            .into_par_iter()
            .filter_map(|word| self.decode_word(word).finite())
            .collect())
    }

    fn check_enumerable(&self) -> Result<()> {
        let total_bits = self.spec().total_bits();
        if total_bits > MAX_ENUMERATION_BITS {
            return Err(FormatError::EnumerationTooLarge {
                total_bits,
                max: MAX_ENUMERATION_BITS,
            });
        }
        Ok(())
    }
}

/// [`Decoder::finite_values`] with the default subnormal policy.
pub fn enumerate_finite_values(spec: &FormatSpec) -> FiniteValues {
    Decoder::new(*spec).finite_values()
}
