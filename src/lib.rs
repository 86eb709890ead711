//! # minifloat-scope
//!
//! Decoding and exhaustive inspection of binary floating-point formats with
//! arbitrary exponent and mantissa widths: bf16, fp16, the fp8 variants used
//! in machine learning, or any layout up to 64 bits.
//!
//! ## Overview
//!
//! - **Decoding**: map a bit pattern to the value it encodes, including
//!   subnormals, signed infinities and NaN
//! - **Ranges**: smallest and largest positive values, computed from the two
//!   extremal patterns
//! - **Enumeration**: every finite value of a format, as a lazy iterator or
//!   collected in parallel
//! - **Reports**: summary statistics, histograms and CSV/JSON export
//!
//! ## Architecture
//!
//! ### BitArray Module
//! Fixed-width, MSB-first bit patterns:
//! - `PackedBitArray`: a single `u64` word, fields read by shift and mask
//! - `BoolBitArray`: one `bool` per bit, built from slices or `0`/`1` text
//!
//! ### Format Module
//! [`FormatSpec`] validates a `(sign, exponent, mantissa)` layout and derives
//! the exponent bias. Common layouts live in [`format::presets`].
//!
//! ### Decoder Module
//! [`Decoder`] pairs a format with a [`SubnormalExponent`] policy and provides
//! decoding, [`ValueRange`] computation and finite-value enumeration.
//!
//! ## Quick Start
//!
//! ```rust
//! use minifloat_scope::prelude::*;
//!
//! let fp8 = FormatSpec::new(1, 4, 3).unwrap();
//! let decoder = Decoder::new(fp8);
//!
//! assert_eq!(decoder.decode_str("0_0111_000").unwrap(), DecodedValue::Finite(1.0));
//!
//! let range = decoder.range().unwrap();
//! assert_eq!(range.max_positive, 240.0);
//!
//! assert_eq!(decoder.finite_values().count(), 240);
//! ```

pub mod bitarray;
pub mod decoder;
pub mod error;
pub mod export;
pub mod format;
pub mod stats;

// Re-export the main types for convenience
pub use bitarray::{BitArray, BoolBitArray, DefaultBitArray, PackedBitArray};
pub use decoder::enumerate::{FiniteValues, enumerate_finite_values};
pub use decoder::range::{ValueRange, compute_range};
pub use decoder::{DecodedValue, Decoder, SubnormalExponent, decode};
pub use error::{ExportError, FormatError};
pub use format::FormatSpec;

pub mod prelude {
    //! Prelude module for minifloat-scope.
    //!
    //! Re-exports the types and entry points needed to decode, range and
    //! enumerate a format.

    pub use crate::bitarray::*;
    pub use crate::decoder::enumerate::{FiniteValues, enumerate_finite_values};
    pub use crate::decoder::range::{ValueRange, compute_range};
    pub use crate::decoder::{DecodedValue, Decoder, SubnormalExponent, decode};
    pub use crate::error::FormatError;
    pub use crate::format::{FormatSpec, presets};
}
