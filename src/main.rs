//! Command line front end: `ply-clean <INPUT> <OUTPUT> [--ascii] [--keep-color]`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ply_clean::ply::Encoding;
use ply_clean::{ convert_file, ConvertError, ConvertOptions };

/// Convert an ASCII PLY point cloud into a clean PLY file with only positions
/// (and optionally sRGB colors).
#[derive(Parser, Debug)]
#[command(name = "ply-clean")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input ASCII PLY file path
    input: PathBuf,

    /// Output PLY file path
    output: PathBuf,

    /// Keep output in ASCII format (default: binary little endian)
    #[arg(short, long)]
    ascii: bool,

    /// Keep col_r/col_g/col_b, gamma encoded to uchar red/green/blue
    #[arg(short = 'c', long)]
    keep_color: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn options(&self) -> ConvertOptions {
        let encoding = if self.ascii { Encoding::Ascii } else { Encoding::BinaryLittleEndian };
        ConvertOptions { keep_color: self.keep_color, encoding }
    }
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    let options = args.options();
    match convert_file(&args.input, &args.output, options) {
        Ok(report) => {
            if report.skipped_count() > 0 {
                println!("⚠️ Skipped {} invalid line(s)", report.skipped_count());
            }
            println!("✅ Saved {} to: {}", options.describe(), args.output.display());
            ExitCode::SUCCESS
        }
        Err(e @ ConvertError::Format(_)) => {
            eprintln!("❌ {}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}
