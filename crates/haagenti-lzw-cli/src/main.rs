//! Haagenti LZW command-line compressor.
//!
//! ## Usage
//!
//! ```bash
//! # Compress a file
//! haagenti-lzw -c lorem.txt lorem.lzw
//!
//! # Decompress it again, reporting timings and ratios
//! haagenti-lzw -v -d lorem.lzw lorem.txt
//!
//! # Limits and logging from a JSON config file
//! haagenti-lzw --config lzw.json -d big.lzw big.bin
//! ```

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use tracing::debug;
use tracing_subscriber::FmtSubscriber;

use haagenti_lzw::LzwCodec;
use haagenti_lzw_cli::{file_compress, file_decompress, CliConfig};

#[derive(Parser, Debug)]
#[command(name = "haagenti-lzw")]
#[command(author = "Daemoniorum LLC")]
#[command(version)]
#[command(about = "LZW file compression with fixed-width bit packing", long_about = None)]
#[command(group(
    ArgGroup::new("operation")
        .required(true)
        .args(["compress", "decompress"])
))]
struct Args {
    /// File to compress
    #[arg(short, long, value_name = "FILE")]
    compress: Option<PathBuf>,

    /// File to decompress
    #[arg(short, long, value_name = "FILE")]
    decompress: Option<PathBuf>,

    /// Output file
    output: PathBuf,

    /// Verbose mode: timings, code metrics and ratios
    #[arg(short, long)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Configuration file path (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };
    if args.verbose {
        config.verbose = true;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.level()?)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    debug!("Args: {:?}", args);

    let codec = LzwCodec::with_config(config.codec.clone());

    if let Some(input) = &args.compress {
        file_compress(&codec, input, &args.output)?;
    } else if let Some(input) = &args.decompress {
        file_decompress(&codec, input, &args.output)?;
    }

    Ok(())
}
