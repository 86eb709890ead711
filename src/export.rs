//! # Export
//!
//! Writes enumerated values as CSV (one row per value, tagged with its
//! series label) and per-format reports as pretty-printed JSON.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::decoder::range::ValueRange;
use crate::decoder::{Decoder, SubnormalExponent};
use crate::error::{ExportError, FormatError};
use crate::format::FormatSpec;
use crate::stats::{Histogram, Summary, label};

pub const VALUES_FILE: &str = "values.csv";
pub const REPORT_FILE: &str = "report.json";

/// Finite values of one format, in enumeration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn label(&self) -> String {
        label(&self.name, self.values.len())
    }
}

#[derive(Serialize)]
struct ValueRow<'a> {
    index: usize,
    value: f64,
    format: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormatReport {
    pub name: String,
    pub spec: FormatSpec,
    pub subnormal_exponent: SubnormalExponent,
    /// `None` for formats without positive finite values.
    pub range: Option<ValueRange>,
    pub summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<Histogram>,
}

impl FormatReport {
    pub fn new(decoder: &Decoder, series: &Series, bins: Option<usize>) -> Result<Self, FormatError> {
        let range = match decoder.range() {
            Ok(range) => Some(range),
            Err(FormatError::DegenerateRange) => None,
            Err(e) => return Err(e),
        };
        let histogram = bins
            .map(|bins| Histogram::new(&series.values, bins))
            .transpose()?;

        Ok(Self {
            name: series.name.clone(),
            spec: *decoder.spec(),
            subnormal_exponent: decoder.subnormal_exponent(),
            range,
            summary: Summary::from_values(series.values.iter().copied()),
            histogram,
        })
    }
}

/// Writes `index,value,format` rows; `index` runs across all series.
/// Returns the number of rows written.
pub fn write_values_csv<W: Write>(writer: W, series: &[Series]) -> Result<usize, ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut index = 0;

    for s in series {
        let label = s.label();
        for &value in &s.values {
            wtr.serialize(ValueRow {
                index,
                value,
                format: &label,
            })?;
            index += 1;
        }
    }
    wtr.flush()?;
    Ok(index)
}

pub fn write_report_json<W: Write>(writer: W, reports: &[FormatReport]) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, reports)?;
    Ok(())
}

/// Writes [`VALUES_FILE`] and [`REPORT_FILE`] into `dir`, creating it if
/// needed, and returns their paths.
pub fn export_to_dir(
    dir: &Path,
    series: &[Series],
    reports: &[FormatReport],
) -> Result<(PathBuf, PathBuf), ExportError> {
    fs::create_dir_all(dir)?;

    let values_path = dir.join(VALUES_FILE);
    let rows = write_values_csv(fs::File::create(&values_path)?, series)?;
    tracing::info!(path = %values_path.display(), rows, "wrote values");

    let report_path = dir.join(REPORT_FILE);
    let mut report_file = fs::File::create(&report_path)?;
    write_report_json(&mut report_file, reports)?;
    report_file.flush()?;
    tracing::info!(path = %report_path.display(), formats = reports.len(), "wrote report");

    Ok((values_path, report_path))
}
