//! Named formats commonly compared against each other.

use crate::error::Result;
use crate::format::FormatSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub exponent_bits: usize,
    pub mantissa_bits: usize,
}

impl Preset {
    const fn new(name: &'static str, exponent_bits: usize, mantissa_bits: usize) -> Self {
        Self {
            name,
            exponent_bits,
            mantissa_bits,
        }
    }

    pub fn spec(&self) -> Result<FormatSpec> {
        FormatSpec::with_layout(self.exponent_bits, self.mantissa_bits)
    }
}

pub const BF16: Preset = Preset::new("bf16e8m7", 8, 7);
pub const FP16: Preset = Preset::new("fp16e5m10", 5, 10);
pub const FP8_E4M3: Preset = Preset::new("fp8e4m3", 4, 3);
pub const FP8_E5M2: Preset = Preset::new("fp8e5m2", 5, 2);
pub const FP8_E2M1: Preset = Preset::new("fp8e2m1", 2, 1);
pub const FP32: Preset = Preset::new("fp32e8m23", 8, 23);

/// Formats small enough to enumerate, in reporting order.
pub const ENUMERABLE: [Preset; 5] = [BF16, FP16, FP8_E4M3, FP8_E5M2, FP8_E2M1];

pub const ALL: [Preset; 6] = [BF16, FP16, FP8_E4M3, FP8_E5M2, FP8_E2M1, FP32];

pub fn find(name: &str) -> Option<Preset> {
    ALL.iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
        .copied()
}
