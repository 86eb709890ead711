//! Summaries of enumerated values, used when comparing formats.

use serde::Serialize;

pub mod histogram;

pub use histogram::{Bin, Histogram};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub positive: usize,
    pub negative: usize,
    /// Both signed zeros.
    pub zeros: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl Summary {
    /// Single pass over finite values.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut summary = Self::default();
        let mut sum = 0.0;

        for value in values {
            summary.count += 1;
            match value {
                v if v > 0.0 => summary.positive += 1,
                v if v < 0.0 => summary.negative += 1,
                _ => summary.zeros += 1,
            }
            summary.min = Some(summary.min.map_or(value, |m| m.min(value)));
            summary.max = Some(summary.max.map_or(value, |m| m.max(value)));
            sum += value;
        }

        if summary.count > 0 {
            summary.mean = Some(sum / summary.count as f64);
        }
        summary
    }
}

/// Legend label used for a format's series, e.g. `fp8e4m3, 240 valid values`.
pub fn label(name: &str, count: usize) -> String {
    format!("{name}, {count} valid values")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::enumerate::enumerate_finite_values;
    use crate::format::FormatSpec;

    #[test]
    fn test_summary_fp4() {
        let spec = FormatSpec::new(1, 2, 1).unwrap();
        let summary = Summary::from_values(enumerate_finite_values(&spec));
        assert_eq!(summary.count, 12);
        assert_eq!(summary.positive, 5);
        assert_eq!(summary.negative, 5);
        assert_eq!(summary.zeros, 2);
        assert_eq!(summary.min, Some(-3.0));
        assert_eq!(summary.max, Some(3.0));
        assert_eq!(summary.mean, Some(0.0));
    }

    #[test]
    fn test_summary_empty() {
        let summary = Summary::from_values(std::iter::empty());
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.mean, None);
    }

    #[test]
    fn test_label() {
        assert_eq!(label("fp8e4m3", 240), "fp8e4m3, 240 valid values");
    }
}
