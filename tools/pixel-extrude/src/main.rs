//! Command-line entry point.
//!
//! Prints a JSON report on stdout and exits 0 on success, 1 on failure.
//! Logs go to stderr; set `RUST_LOG` or pass `--verbose` to see them.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use mesh::io::MeshFormat;
use mesh::voxel::ExtrusionParams;
use pixel_extrude::{convert, ConversionReport, ConvertOptions};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Convert pixel art into a printable voxel relief
///
/// Every opaque pixel becomes a colored cube standing on a base plate.
#[derive(Parser)]
#[command(name = "pixel-extrude")]
#[command(about = "Convert pixel art into STL or multi-color 3MF", long_about = None)]
#[command(version)]
struct Cli {
    /// Input image (PNG or any other decodable format)
    #[arg(name = "INPUT")]
    input: PathBuf,

    /// Output mesh file (.stl or .3mf)
    #[arg(name = "OUTPUT")]
    output: PathBuf,

    /// Extrusion height in mm
    #[arg(long, default_value_t = 2.0)]
    extrusion: f64,

    /// Base plate thickness in mm
    #[arg(long, default_value_t = 1.0)]
    base: f64,

    /// Pixel size in mm
    #[arg(long = "pixel-size", default_value_t = 1.5)]
    pixel_size: f64,

    /// Output format (detected from the output extension if omitted)
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Write ASCII STL instead of binary
    #[arg(long)]
    ascii: bool,

    /// Read the written file back and check it
    #[arg(long)]
    verify: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Geometry-only STL
    Stl,
    /// Multi-color 3MF
    #[value(name = "3mf")]
    ThreeMf,
}

impl From<FormatArg> for MeshFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Stl => Self::Stl,
            FormatArg::ThreeMf => Self::ThreeMf,
        }
    }
}

impl Cli {
    fn options(&self) -> ConvertOptions {
        let params = ExtrusionParams::new(self.extrusion, self.base, self.pixel_size);
        let mut options = ConvertOptions::new(params)
            .with_ascii_stl(self.ascii)
            .with_verify(self.verify);
        if let Some(format) = self.format {
            options = options.with_format(format.into());
        }
        options
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout is reserved for the JSON report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!(e))
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let result = convert(&cli.input, &cli.output, &cli.options());
    if let Err(err) = &result {
        error!(kind = err.kind(), "{err}");
    }

    let report = ConversionReport::from_result(&result);
    println!("{}", report.to_json_pretty()?);

    Ok(if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
