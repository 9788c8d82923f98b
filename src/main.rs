use clap::{Parser, Subcommand};
use focal_crop::imaging::{self, FocusPoint, RustBackend};
use focal_crop::naming::{self, TargetSize};
use focal_crop::{config, output, staging};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Focus point flags shared by commands that position a crop window.
#[derive(clap::Args, Clone)]
struct FocusArgs {
    /// Horizontal focus in percent of the width (0 = left, 100 = right)
    #[arg(long, allow_negative_numbers = true)]
    focus_x: Option<f64>,

    /// Vertical focus in percent of the height (0 = top, 100 = bottom)
    #[arg(long, allow_negative_numbers = true)]
    focus_y: Option<f64>,
}

#[derive(Parser)]
#[command(name = "focal-crop")]
#[command(about = "Focus-aware cover crop and resize for JPEG and PNG images")]
#[command(long_about = "\
Focus-aware cover crop and resize for JPEG and PNG images

The image is scaled (preserving aspect ratio) until it covers the requested
size, then cropped so the focus point lands as close to the center of the
frame as the image edges allow. Output uses the input format.

Focus is given in percent: --focus-x 0 --focus-y 0 is the top-left corner,
100/100 the bottom-right. The default is the center.

Output files are named {prefix}{stem}{suffix}.{ext}, with [size] in the
suffix replaced by WxH (default suffix: -[size]-focused).

Run 'focal-crop gen-config' to generate a documented config file.")]
#[command(version)]
struct Cli {
    /// Config file (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Crop an image to one or more sizes around a focus point
    Crop {
        /// Source image (JPEG or PNG)
        input: PathBuf,

        /// Target size as WIDTHxHEIGHT; repeat for several sizes.
        /// Defaults to the source image size.
        #[arg(short, long = "size")]
        sizes: Vec<TargetSize>,

        #[command(flatten)]
        focus: FocusArgs,

        /// Directory for cropped images (defaults to the input's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Suppress the timing report
        #[arg(short, long)]
        quiet: bool,
    },
    /// Print the crop geometry for a source size as JSON, without any image
    Plan {
        /// Source size as WIDTHxHEIGHT
        original: TargetSize,

        /// Target size as WIDTHxHEIGHT
        #[arg(short, long)]
        size: TargetSize,

        #[command(flatten)]
        focus: FocusArgs,
    },
    /// Print a stock config file with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Crop {
            input,
            sizes,
            focus,
            output_dir,
            quiet,
        } => {
            let mut config = config::load_config(cli.config.as_deref())?;
            apply_focus_overrides(&mut config, &focus);
            config.quiet |= quiet;
            init_thread_pool(&config.processing);

            let output_dir = output_dir.unwrap_or_else(|| {
                input
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_default()
            });
            run_crop(&input, &sizes, &output_dir, &config)?;
        }
        Command::Plan {
            original,
            size,
            focus,
        } => {
            let mut config = config::load_config(cli.config.as_deref())?;
            apply_focus_overrides(&mut config, &focus);
            let plan = imaging::plan_focus_crop(
                original.as_tuple(),
                size.as_tuple(),
                FocusPoint::new(config.focus.x, config.focus.y),
            )?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Crop `input` to every size, then write all outputs.
///
/// Files are written only after every size succeeded, and either all of
/// them land on disk or none do.
fn run_crop(
    input: &Path,
    sizes: &[TargetSize],
    output_dir: &Path,
    config: &config::FocusConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let started = Instant::now();
    let bytes = std::fs::read(input)?;
    let targets: Vec<(u32, u32)> = sizes.iter().map(|s| s.as_tuple()).collect();

    let results =
        imaging::focus_crop_sizes(&RustBackend::new(), &bytes, &targets, &config.crop_params())?;

    std::fs::create_dir_all(output_dir)?;
    let written: Vec<(imaging::CroppedImage, PathBuf)> = results
        .into_iter()
        .map(|result| {
            let name = naming::output_file_name(
                input,
                &config.output.prefix,
                &config.output.suffix,
                TargetSize::from(result.target()),
                result.mime.extension(),
            );
            (result, output_dir.join(name))
        })
        .collect();

    let outputs: Vec<(PathBuf, &[u8])> = written
        .iter()
        .map(|(result, path)| (path.clone(), result.bytes.as_slice()))
        .collect();
    staging::write_all(&outputs)?;
    for (result, path) in &written {
        tracing::info!(path = %path.display(), bytes = result.bytes.len(), "Wrote crop");
    }

    if !config.quiet {
        output::print_crop_output(&written, started.elapsed());
    }
    Ok(())
}

fn apply_focus_overrides(config: &mut config::FocusConfig, focus: &FocusArgs) {
    if let Some(x) = focus.focus_x {
        config.focus.x = x;
    }
    if let Some(y) = focus.focus_y {
        config.focus.y = y;
    }
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
