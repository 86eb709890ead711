use std::ops::{Index, Range};

use crate::error::FormatError;

pub mod boolean_list;
pub mod packed;

pub use boolean_list::BoolBitArray;
pub use packed::PackedBitArray;

pub type DefaultBitArray = PackedBitArray;

/// Widest pattern a single `u64` word can hold.
pub const MAX_BITS: usize = 64;

/// A fixed-length bit pattern, MSB first: index 0 is the leftmost bit
/// (the sign bit of a float encoding).
pub trait BitArray {
    /// Builds a pattern of `n_bits` from the low bits of `word`.
    ///
    /// Returns `None` when `n_bits` exceeds [`MAX_BITS`] or `word` has bits set
    /// above `n_bits`.
    fn from_u64(word: u64, n_bits: usize) -> Option<Self>
    where
        Self: Sized;

    /// Builds a pattern from `bits`, MSB first.
    ///
    /// Returns `None` when the representation cannot hold `bits.len()` bits.
    fn from_bits(bits: &[bool]) -> Option<Self>
    where
        Self: Sized;

    /// Parses `'0'`/`'1'` characters, ignoring `_` separators.
    ///
    /// # Errors
    ///
    /// [`FormatError::InvalidBitString`] on any other character, and
    /// [`FormatError::InvalidPattern`] when the pattern is too long for the
    /// representation.
    fn from_bits_string(s: &str) -> Result<Self, FormatError>
    where
        Self: Sized,
    {
        let bits = s
            .chars()
            .filter(|c| *c != '_')
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(FormatError::InvalidBitString(other)),
            })
            .collect::<Result<Vec<bool>, _>>()?;
        Self::from_bits(&bits).ok_or(FormatError::InvalidPattern {
            expected: MAX_BITS,
            actual: bits.len(),
        })
    }

    fn zeros(n_bits: usize) -> Option<Self>
    where
        Self: Sized,
    {
        Self::from_bits(&vec![false; n_bits])
    }

    fn ones(n_bits: usize) -> Option<Self>
    where
        Self: Sized,
    {
        Self::from_bits(&vec![true; n_bits])
    }

    fn iter_bits(&self) -> impl Iterator<Item = bool>;

    fn to_bits(&self) -> Vec<bool> {
        self.iter_bits().collect()
    }

    fn to_bits_string(&self) -> String {
        self.iter_bits()
            .map(|b| if b { '1' } else { '0' })
            .collect()
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<bool>;

    /// Reads `range` as an unsigned big-endian integer.
    ///
    /// `None` if the range is out of bounds or wider than 64 bits. An empty
    /// range reads as zero.
    fn field(&self, range: Range<usize>) -> Option<u64> {
        if range.end > self.len() || range.start > range.end || range.len() > MAX_BITS {
            return None;
        }
        let mut value = 0u64;
        for i in range {
            value = (value << 1) | u64::from(self.get(i)?);
        }
        Some(value)
    }

    /// The whole pattern as an integer, `None` above 64 bits.
    fn to_u64(&self) -> Option<u64> {
        self.field(0..self.len())
    }

    fn all_zeros(&self) -> bool {
        self.iter_bits().all(|b| !b)
    }
}

macro_rules! impl_index {
    ($t:ty) => {
        impl Index<usize> for $t {
            type Output = bool;

            fn index(&self, index: usize) -> &Self::Output {
                match self.get(index) {
                    Some(true) => &true,
                    Some(false) => &false,
                    None => panic!("bit index {index} out of bounds for {} bits", self.len()),
                }
            }
        }
    };
}

impl_index!(BoolBitArray);
impl_index!(PackedBitArray);
