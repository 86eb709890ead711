//! minifloat-scope CLI entry point
//!
//! ```bash
//! # Decode one pattern
//! minifloat-scope decode --format fp8e4m3 0_0111_000
//!
//! # Ranges of every preset, as JSON
//! minifloat-scope range
//!
//! # Enumerate the small presets into ./output/values.csv and report.json
//! minifloat-scope enumerate --output ./output --bins 512
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use minifloat_scope::export::{FormatReport, Series, export_to_dir};
use minifloat_scope::format::presets::{self, Preset};
use minifloat_scope::{Decoder, FormatSpec, SubnormalExponent, ValueRange};

#[derive(Parser, Debug)]
#[command(name = "minifloat-scope")]
#[command(author, version, about = "Decode and enumerate custom-width float formats")]
#[command(propagate_version = true)]
struct Cli {
    /// Scale subnormals by 2^(1-bias) as IEEE 754 does, instead of 2^(-bias)
    #[arg(long, global = true)]
    ieee_subnormals: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a single bit pattern
    Decode(DecodeArgs),

    /// Print the representable range of formats as JSON
    Range(FormatArgs),

    /// Enumerate all finite values and write values.csv and report.json
    Enumerate(EnumerateArgs),
}

/// Formats to operate on, by preset name or `e<E>m<M>` layout
#[derive(Args, Debug)]
struct FormatArgs {
    /// Preset name (bf16e8m7, fp16e5m10, fp8e4m3, fp8e5m2, fp8e2m1, fp32e8m23)
    #[arg(short, long = "format")]
    formats: Vec<String>,

    /// Explicit layout such as e4m3
    #[arg(short, long = "layout")]
    layouts: Vec<FormatSpec>,
}

#[derive(Args, Debug)]
struct DecodeArgs {
    #[command(flatten)]
    format: FormatArgs,

    /// Pattern as 0/1 characters, `_` separators allowed
    bits: String,
}

#[derive(Args, Debug)]
struct EnumerateArgs {
    #[command(flatten)]
    format: FormatArgs,

    /// Output directory
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Decode on all cores
    #[arg(short, long)]
    parallel: bool,

    /// Histogram bins to include in the report
    #[arg(short, long)]
    bins: Option<usize>,
}

impl FormatArgs {
    /// Selected formats, or `defaults` when none were given.
    fn resolve(&self, defaults: &[Preset]) -> Result<Vec<(String, FormatSpec)>> {
        let mut selected = Vec::new();
        for name in &self.formats {
            let preset = presets::find(name).with_context(|| format!("unknown format {name:?}"))?;
            selected.push((preset.name.to_string(), preset.spec()?));
        }
        selected.extend(self.layouts.iter().map(|spec| (spec.to_string(), *spec)));

        if selected.is_empty() {
            for preset in defaults {
                selected.push((preset.name.to_string(), preset.spec()?));
            }
        }
        Ok(selected)
    }
}

#[derive(Serialize)]
struct NamedRange {
    name: String,
    format: FormatSpec,
    range: Option<ValueRange>,
}

fn decode(args: &DecodeArgs, subnormal: SubnormalExponent) -> Result<()> {
    let formats = args.format.resolve(&[])?;
    let [(name, spec)] = formats.as_slice() else {
        bail!("decode needs exactly one --format or --layout");
    };

    let decoder = Decoder::new(*spec).with_subnormal_exponent(subnormal);
    let value = decoder
        .decode_str(&args.bits)
        .with_context(|| format!("cannot decode {:?} as {name}", args.bits))?;
    println!("{} ({name}) = {value}", args.bits);
    Ok(())
}

fn range(args: &FormatArgs, subnormal: SubnormalExponent) -> Result<()> {
    let mut ranges = Vec::new();
    for (name, spec) in args.resolve(&presets::ALL)? {
        let decoder = Decoder::new(spec).with_subnormal_exponent(subnormal);
        let range = match decoder.range() {
            Ok(range) => Some(range),
            Err(e) => {
                tracing::warn!(format = %name, error = %e, "no range");
                None
            }
        };
        ranges.push(NamedRange {
            name,
            format: spec,
            range,
        });
    }
    println!("{}", serde_json::to_string_pretty(&ranges)?);
    Ok(())
}

fn enumerate(args: &EnumerateArgs, subnormal: SubnormalExponent) -> Result<()> {
    let mut series = Vec::new();
    let mut reports = Vec::new();

    for (name, spec) in args.format.resolve(&presets::ENUMERABLE)? {
        let decoder = Decoder::new(spec).with_subnormal_exponent(subnormal);
        let values = if args.parallel {
            decoder.par_finite_values()
        } else {
            decoder.try_finite_values().map(|values| values.collect())
        }
        .with_context(|| format!("cannot enumerate {name}"))?;

        let s = Series::new(name, values);
        tracing::info!(format = %s.name, count = s.values.len(), "enumerated");
        reports.push(FormatReport::new(&decoder, &s, args.bins)?);
        series.push(s);
    }

    let (values_path, report_path) = export_to_dir(&args.output, &series, &reports)
        .with_context(|| format!("cannot write to {}", args.output.display()))?;

    for s in &series {
        println!("{}", s.label());
    }
    println!("{}", values_path.display());
    println!("{}", report_path.display());
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let subnormal = if cli.ieee_subnormals {
        SubnormalExponent::Ieee
    } else {
        SubnormalExponent::Reference
    };

    match &cli.command {
        Commands::Decode(args) => decode(args, subnormal),
        Commands::Range(args) => range(args, subnormal),
        Commands::Enumerate(args) => enumerate(args, subnormal),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_enumerate() {
        let cli = Cli::try_parse_from([
            "minifloat-scope",
            "enumerate",
            "--format",
            "fp8e4m3",
            "--layout",
            "e2m1",
            "--parallel",
            "--bins",
            "16",
            "--ieee-subnormals",
        ])
        .unwrap();
        assert!(cli.ieee_subnormals);

        let Commands::Enumerate(args) = cli.command else {
            panic!("expected enumerate");
        };
        assert!(args.parallel);
        assert_eq!(args.bins, Some(16));

        let formats = args.format.resolve(&presets::ENUMERABLE).unwrap();
        let names: Vec<&str> = formats.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["fp8e4m3", "e2m1"]);
    }

    #[test]
    fn test_resolve_defaults_and_unknown() {
        let args = FormatArgs {
            formats: vec![],
            layouts: vec![],
        };
        assert_eq!(args.resolve(&presets::ENUMERABLE).unwrap().len(), 5);

        let args = FormatArgs {
            formats: vec!["fp4".to_string()],
            layouts: vec![],
        };
        assert!(args.resolve(&presets::ALL).is_err());
    }

    #[test]
    fn test_invalid_layout_rejected() {
        assert!(Cli::try_parse_from(["minifloat-scope", "range", "--layout", "e0m3"]).is_err());
    }

    #[test]
    fn test_decode_requires_one_format() {
        let cli = Cli::try_parse_from(["minifloat-scope", "decode", "0111"]).unwrap();
        let Commands::Decode(args) = &cli.command else {
            panic!("expected decode");
        };
        assert!(decode(args, SubnormalExponent::Reference).is_err());
    }
}
