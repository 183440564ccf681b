//! hueshift - replace the hue of every pixel in an image
//!
//! Command-line shell around `hueshift-ops`: load, pick a color, preview,
//! save.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "hueshift")]
#[command(author, version, about = "Global hue remapping for PNG and JPEG images")]
#[command(long_about = "
Replaces the hue of every pixel with a chosen hue while keeping each
pixel's saturation and brightness. Grays stay gray.

Examples:
  hueshift apply photo.png -o green.png --color 0,200,0
  hueshift apply photo.jpg -o teal.jpg --color '#008080' --preview teal_preview.png
  hueshift apply icon.png -o blue.png --hue 240
  hueshift preview sprite.png -o sprite_big.png
  hueshift hue 255,128,0
  hueshift info photo.png
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace the hue of every pixel and save the result
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Write the display-size preview of an image
    #[command(visible_alias = "p")]
    Preview(PreviewArgs),

    /// Print the hue a color would apply
    Hue(HueArgs),

    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

/// Preview box size shared by `apply` and `preview`.
#[derive(Args, Clone)]
struct PreviewBox {
    /// Preview box width
    #[arg(long, default_value_t = hueshift_ops::preview::DEFAULT_MIN_WIDTH)]
    min_width: u32,

    /// Preview box height
    #[arg(long, default_value_t = hueshift_ops::preview::DEFAULT_MIN_HEIGHT)]
    min_height: u32,

    /// Flatten background color for transparent pixels (R,G,B or #RRGGBB)
    #[arg(long, default_value = "255,255,255")]
    background: String,

    /// Smoothing filter for large images: lanczos, bicubic, bilinear, nearest
    #[arg(short, long, default_value = "lanczos")]
    filter: String,
}

#[derive(Args)]
struct ApplyArgs {
    /// Input image
    input: PathBuf,

    /// Output image (.png or .jpg)
    #[arg(short, long)]
    output: PathBuf,

    /// Picked color whose hue is applied (R,G,B or #RRGGBB)
    #[arg(short, long, conflicts_with = "hue", required_unless_present = "hue")]
    color: Option<String>,

    /// Hue angle in degrees (wraps around 360)
    #[arg(long)]
    hue: Option<f32>,

    /// JPEG quality (1-100)
    #[arg(long = "jpeg-quality", default_value = "90")]
    jpeg_quality: u8,

    /// Also write the display preview of the result
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Suppress the summary line
    #[arg(short, long)]
    quiet: bool,

    #[command(flatten)]
    preview_box: PreviewBox,
}

#[derive(Args)]
struct PreviewArgs {
    /// Input image
    input: PathBuf,

    /// Output preview image
    #[arg(short, long)]
    output: PathBuf,

    /// Suppress the summary line
    #[arg(short, long)]
    quiet: bool,

    #[command(flatten)]
    preview_box: PreviewBox,
}

#[derive(Args)]
struct HueArgs {
    /// Color (R,G,B or #RRGGBB)
    color: String,
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

/// Installs the tracing subscriber.
///
/// `RUST_LOG` wins; otherwise the level follows `-v`.
fn init_logging(
    verbose: u8,
    log_file: Option<&PathBuf>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let name = path
                .file_name()
                .context("log file path has no file name")?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install logger")?;

    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_ref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Apply(args) => commands::apply::run(args),
        Commands::Preview(args) => commands::preview::run(args),
        Commands::Hue(args) => commands::hue::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}
