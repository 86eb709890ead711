use thiserror::Error;

/// Errors raised while building formats, reading patterns or summarizing
/// decoded values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Rejected bit layout.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// Pattern width does not match the format.
    #[error("invalid pattern: expected {expected} bits, got {actual}")]
    InvalidPattern { expected: usize, actual: usize },

    #[error("invalid bit character {0:?}, expected '0' or '1'")]
    InvalidBitString(char),

    /// The format has no strictly positive finite value.
    #[error("format has no positive finite values")]
    DegenerateRange,

    #[error("refusing to enumerate 2^{total_bits} patterns (limit is 2^{max})")]
    EnumerationTooLarge { total_bits: usize, max: usize },

    #[error("histogram needs at least one bin")]
    InvalidBins,
}

pub type Result<T> = std::result::Result<T, FormatError>;

/// Errors raised while writing enumeration results.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
