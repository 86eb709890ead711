use std::ops::Range;

use crate::bitarray::{BitArray, MAX_BITS};

/// Bit-per-`bool` pattern. Convenient for building patterns from slices or
/// text; decoding goes through [`BitArray::field`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoolBitArray {
    bits: Vec<bool>,
}

impl BoolBitArray {
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    pub fn slice(&self, range: Range<usize>) -> Option<Self> {
        self.bits.get(range).map(|bits| Self {
            bits: bits.to_vec(),
        })
    }
}

impl BitArray for BoolBitArray {
    // 0b101, 4 -> [0, 1, 0, 1]
    fn from_u64(word: u64, n_bits: usize) -> Option<Self> {
        if n_bits > MAX_BITS || (n_bits < MAX_BITS && word >> n_bits != 0) {
            return None;
        }
        let bits = (0..n_bits).rev().map(|i| (word >> i) & 1 == 1).collect();
        Some(Self { bits })
    }

    fn from_bits(bits: &[bool]) -> Option<Self> {
        Some(Self {
            bits: bits.to_vec(),
        })
    }

    fn zeros(n_bits: usize) -> Option<Self> {
        Some(Self {
            bits: vec![false; n_bits],
        })
    }

    fn ones(n_bits: usize) -> Option<Self> {
        Some(Self {
            bits: vec![true; n_bits],
        })
    }

    fn iter_bits(&self) -> impl Iterator<Item = bool> {
        self.bits.iter().copied()
    }

    fn to_bits(&self) -> Vec<bool> {
        self.bits.clone()
    }

    fn len(&self) -> usize {
        self.bits.len()
    }

    fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }
}
