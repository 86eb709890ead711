use serde::Serialize;

use crate::error::{FormatError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width bins spanning `[min, max]` of the input. Every bin is
/// half-open except the last, which also holds `max`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    bins: Vec<Bin>,
}

impl Histogram {
    /// # Errors
    ///
    /// [`FormatError::InvalidBins`] when `n_bins` is zero.
    pub fn new(values: &[f64], n_bins: usize) -> Result<Self> {
        if n_bins == 0 {
            return Err(FormatError::InvalidBins);
        }

        let (min, max) = values
            .iter()
            .fold(None, |acc: Option<(f64, f64)>, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .unwrap_or((0.0, 0.0));

        // divide first, max - min overflows for the widest formats
        let width = max / n_bins as f64 - min / n_bins as f64;
        let edge = |i: usize| {
            if i == n_bins {
                max
            } else {
                min + width * i as f64
            }
        };

        let mut bins: Vec<Bin> = (0..n_bins)
            .map(|i| Bin {
                lower: edge(i),
                upper: edge(i + 1),
                count: 0,
            })
            .collect();

        for &value in values {
            let index = if width > 0.0 {
                (value / width - min / width).floor() as usize
            } else {
                0
            };
            bins[index.min(n_bins - 1)].count += 1;
        }

        Ok(Self { bins })
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.bins.iter().map(|bin| bin.count)
    }

    pub fn total(&self) -> usize {
        self.counts().sum()
    }
}
