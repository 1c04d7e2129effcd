#![deny(unsafe_code)]
//! CLI binary for the halo blob background.
//!
//! Subcommands:
//! - `render` runs the scene for N frames and writes the last one as a PNG
//! - `sample` prints one noise value and its fade weights
//! - `config` prints the default scene config as JSON

mod error;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use error::CliError;
use halo_core::noise::smootherstep;
use halo_core::{NoiseField, Rect, Scene, SceneConfig, StaticLayout, Viewport};
use halo_raster::Raster;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "halo", about = "Animated noise-blob background renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the scene for N frames and write the final frame as a PNG.
    Render {
        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 1280)]
        width: usize,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 720)]
        height: usize,

        /// Number of animation frames to run.
        #[arg(short, long, default_value_t = 120)]
        frames: usize,

        /// Noise seed; overrides the config's seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Focal element centre X (defaults to the surface centre).
        #[arg(long, requires = "target_y")]
        target_x: Option<f64>,

        /// Focal element centre Y (defaults to the surface centre).
        #[arg(long, requires = "target_x")]
        target_y: Option<f64>,

        /// Scene config JSON file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Scalar config overrides as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Output file path.
        #[arg(short, long, default_value = "out.png")]
        output: PathBuf,
    },
    /// Sample the noise field at one point.
    Sample {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,

        #[arg(long, allow_hyphen_values = true)]
        y: f64,

        #[arg(long, default_value_t = halo_core::config::DEFAULT_SEED)]
        seed: u64,
    },
    /// Print the default scene config.
    Config,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<SceneConfig, CliError> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| CliError::Io(format!("reading {}: {e}", path.display())))?;
            debug!(path = %path.display(), "loaded config file");
            Ok(SceneConfig::from_json_str(&text)?)
        }
        None => Ok(SceneConfig::default()),
    }
}

#[allow(clippy::too_many_arguments)]
fn render(
    json: bool,
    width: usize,
    height: usize,
    frames: usize,
    seed: Option<u64>,
    target: Option<(f64, f64)>,
    config: Option<PathBuf>,
    params: &str,
    output: PathBuf,
) -> Result<(), CliError> {
    let params: serde_json::Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

    let mut config = load_config(config.as_ref())?.with_overrides(&params);
    if let Some(seed) = seed {
        config.seed = seed;
    }
    let seed = config.seed;

    let mut raster = Raster::new(width, height)?;
    let (tx, ty) = target.unwrap_or((width as f64 / 2.0, height as f64 / 2.0));
    let layout = StaticLayout {
        viewport: Viewport::new(width as f64, height as f64),
        target: Some(Rect::new(tx, ty, 0.0, 0.0)),
    };

    let mut scene = Scene::new(config)?;
    scene.on_load(&layout)?;
    for _ in 0..frames {
        scene.tick(&mut raster);
    }
    halo_raster::snapshot::write_png(&raster, &output)?;
    info!(frames, painted = raster.painted_pixels(), "render complete");

    if json {
        let info = serde_json::json!({
            "width": width,
            "height": height,
            "frames": frames,
            "seed": seed,
            "blobs": scene.blobs().len(),
            "target": [scene.target().x, scene.target().y],
            "noise_values_cached": scene.noise().cached_values(),
            "output": output.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!(
            "rendered {} blobs ({width}x{height}, {frames} frames, seed {seed}) -> {}",
            scene.blobs().len(),
            output.display()
        );
    }
    Ok(())
}

fn sample(json: bool, x: f64, y: f64, seed: u64) -> Result<(), CliError> {
    if !x.is_finite() || !y.is_finite() {
        return Err(CliError::Input(format!("sample point must be finite, got ({x}, {y})")));
    }
    let mut noise = NoiseField::new(seed);
    let value = noise.sample(x, y);
    let (wx, wy) = (smootherstep(x - x.floor()), smootherstep(y - y.floor()));

    if json {
        let info = serde_json::json!({
            "x": x,
            "y": y,
            "seed": seed,
            "value": value,
            "weights": [wx, wy],
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("noise({x}, {y}) = {value}");
        println!("weights: x {wx}, y {wy}");
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Render {
            width,
            height,
            frames,
            seed,
            target_x,
            target_y,
            config,
            params,
            output,
        } => render(
            cli.json,
            width,
            height,
            frames,
            seed,
            target_x.zip(target_y),
            config,
            &params,
            output,
        ),
        Command::Sample { x, y, seed } => sample(cli.json, x, y, seed),
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&SceneConfig::default())?);
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
