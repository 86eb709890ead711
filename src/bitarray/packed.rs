use std::fmt;
use std::ops::Range;

use crate::bitarray::{BitArray, MAX_BITS};

/// Pattern of up to 64 bits stored right-aligned in one word.
///
/// Index 0 is bit `len - 1` of `word`, so fields are read with a single shift
/// and mask. This is the representation used on the enumeration path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedBitArray {
    word: u64,
    len: u8,
}

#[inline]
pub(crate) const fn low_mask(n_bits: usize) -> u64 {
    if n_bits >= MAX_BITS {
        u64::MAX
    } else {
        (1u64 << n_bits) - 1
    }
}

impl PackedBitArray {
    pub fn word(&self) -> u64 {
        self.word
    }
}

impl BitArray for PackedBitArray {
    fn from_u64(word: u64, n_bits: usize) -> Option<Self> {
        if n_bits > MAX_BITS || word & !low_mask(n_bits) != 0 {
            return None;
        }
        Some(Self {
            word,
            len: n_bits as u8,
        })
    }

    /// `None` if `bits` is longer than [`MAX_BITS`].
    fn from_bits(bits: &[bool]) -> Option<Self> {
        if bits.len() > MAX_BITS {
            return None;
        }
        let word = bits.iter().fold(0u64, |acc, &b| (acc << 1) | u64::from(b));
        Some(Self {
            word,
            len: bits.len() as u8,
        })
    }

    fn zeros(n_bits: usize) -> Option<Self> {
        Self::from_u64(0, n_bits)
    }

    fn ones(n_bits: usize) -> Option<Self> {
        Self::from_u64(low_mask(n_bits), n_bits)
    }

    fn iter_bits(&self) -> impl Iterator<Item = bool> {
        let word = self.word;
        (0..self.len()).rev().map(move |i| (word >> i) & 1 == 1)
    }

    fn len(&self) -> usize {
        usize::from(self.len)
    }

    fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len() {
            return None;
        }
        Some((self.word >> (self.len() - 1 - index)) & 1 == 1)
    }

    #[inline]
    fn field(&self, range: Range<usize>) -> Option<u64> {
        if range.end > self.len() || range.start > range.end {
            return None;
        }
        if range.is_empty() {
            return Some(0);
        }
        Some((self.word >> (self.len() - range.end)) & low_mask(range.len()))
    }

    fn to_u64(&self) -> Option<u64> {
        Some(self.word)
    }

    fn all_zeros(&self) -> bool {
        self.word == 0
    }
}

impl fmt::Display for PackedBitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bits_string())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::super::tests::*;
    use super::*;
    use crate::bitarray::BoolBitArray;
    use crate::decoder::Decoder;
    use crate::error::FormatError;
    use crate::format::FormatSpec;
    use crate::tests::*;

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(8, 0xff)]
    #[case(64, u64::MAX)]
    fn test_low_mask(#[case] n_bits: usize, #[case] expected: u64) {
        assert_eq!(low_mask(n_bits), expected);
    }

    #[test]
    fn test_from_u64() {
        let bit_array = PackedBitArray::from_u64(0b0111_0001, 8).unwrap();
        assert_eq!(bit_array.to_bits_string(), "01110001");
        assert_eq!(bit_array.to_string(), "01110001");
        assert_eq!(bit_array.word(), 0b0111_0001);

        assert!(PackedBitArray::from_u64(0x100, 8).is_none());
        assert!(PackedBitArray::from_u64(0, 65).is_none());
        assert!(PackedBitArray::from_u64(u64::MAX, 64).is_some());
    }

    #[test]
    fn test_zeros_ones() {
        assert!(PackedBitArray::zeros(12).unwrap().all_zeros());
        assert_eq!(PackedBitArray::zeros(12).unwrap().len(), 12);
        assert_eq!(PackedBitArray::ones(12).unwrap().to_u64(), Some(0xfff));
        assert_eq!(PackedBitArray::ones(64).unwrap().to_u64(), Some(u64::MAX));
        assert_eq!(PackedBitArray::zeros(0).unwrap().len(), 0);
    }

    #[test]
    fn test_wider_than_word_rejected() {
        assert_eq!(PackedBitArray::zeros(65), None);
        assert_eq!(PackedBitArray::ones(65), None);
        assert_eq!(PackedBitArray::from_bits(&[true; 65]), None);
        assert_eq!(
            PackedBitArray::from_bits_string(&"0".repeat(65)),
            Err(FormatError::InvalidPattern {
                expected: MAX_BITS,
                actual: 65
            })
        );
        assert!(PackedBitArray::from_bits_string(&"1".repeat(64)).is_ok());
    }

    #[test]
    fn test_wide_pattern_not_decoded() {
        let decoder = Decoder::new(FormatSpec::new(1, 11, 52).unwrap());
        let wide = BoolBitArray::zeros(65).unwrap();
        assert_eq!(
            decoder.decode(&wide),
            Err(FormatError::InvalidPattern {
                expected: 64,
                actual: 65
            })
        );
        assert!(PackedBitArray::from_bits(&wide.to_bits()).is_none());
    }

    #[rstest]
    fn test_matches_bool_bit_array(mut rng: impl Rng, n_experiments: usize) {
        for _ in 0..n_experiments {
            let len = rng.random_range(1..=64);
            let bits = random_bits(&mut rng, len);
            let packed = PackedBitArray::from_bits(&bits).unwrap();
            let boolean = BoolBitArray::from_bits(&bits).unwrap();

            assert_eq!(packed.to_bits(), bits);
            assert_eq!(packed.to_u64(), Some(bits_to_u64(&bits)));

            let start = rng.random_range(0..=len);
            let end = rng.random_range(start..=len);
            assert_eq!(packed.field(start..end), boolean.field(start..end));

            let i = rng.random_range(0..len);
            assert_eq!(packed.get(i), boolean.get(i));
            assert_eq!(packed[i], bits[i]);
        }
    }

    #[test]
    fn test_field_out_of_bounds() {
        let bit_array = PackedBitArray::from_u64(0b1011, 4).unwrap();
        assert_eq!(bit_array.field(0..4), Some(0b1011));
        assert_eq!(bit_array.field(1..3), Some(0b01));
        assert_eq!(bit_array.field(3..5), None);
        assert_eq!(bit_array.get(4), None);
    }
}
