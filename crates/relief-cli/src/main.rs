/// Command-line front end for the relief generators.
///
/// Results are written to stdout (or `--output`) as JSON; logs go to stderr
/// and are filtered with `RUST_LOG` (default `info`).
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relief_core::fractal::{Displacement, MutationSchedule};
use relief_core::generator::{
    GeneratedField, GenerationRequest, Generator, HeightMapParams, ProfileParams, RefineParams,
};
use relief_core::literal::parse_profile_literal;
use relief_core::metrics::{compute_hurst, lag_autocorrelation};
use relief_core::noise::{NoiseMapParams, WeightPolicy};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "relief", about = "Fractal and gradient-noise terrain generator")]
struct Args {
    /// Write the JSON result here instead of stdout.
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON result.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Diamond-square height map of side 2^k + 1.
    Heightmap {
        #[arg(short = 'k', long, default_value_t = 7)]
        size_factor: u32,
        #[arg(long, default_value_t = 1.0)]
        randomness: f64,
        #[arg(long, default_value_t = 0.5)]
        roughness: f64,
        /// Also perturb square-phase centres.
        #[arg(long)]
        square_perturbation: bool,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Repeatedly double the definition of a literal grid such as "0,1;1,0".
    Refine {
        grid: String,
        #[arg(long, default_value_t = 0.5)]
        randomness: f64,
        #[arg(long, default_value_t = 0.5)]
        auto_roughness: f64,
        #[arg(long, default_value_t = 6)]
        steps: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Midpoint-displacement profile.
    Profile {
        /// Explicit rates, e.g. "2,2,1.5,1". Overrides the geometric schedule.
        #[arg(long)]
        rates: Option<String>,
        #[arg(long, default_value_t = 6)]
        iterations: usize,
        #[arg(long, default_value_t = 1.0)]
        initial_rate: f64,
        #[arg(long, default_value_t = 1.0)]
        roughness: f64,
        #[arg(long)]
        multiplicative: bool,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Shaped gradient-noise height map.
    Noise {
        #[arg(long, default_value_t = 128)]
        width: usize,
        #[arg(long, default_value_t = 128)]
        height: usize,
        #[arg(long, default_value_t = 8.0)]
        scale: f64,
        #[arg(long, default_value_t = 1.0)]
        exponent: f64,
        #[arg(long, default_value_t = 1)]
        octaves: u32,
        /// Weight corners by the largest coordinate offset instead of the sum of squares.
        #[arg(long)]
        max_coordinate: bool,
    },
    /// Run a JSON generation request from a file.
    Run { request: PathBuf },
}

impl Command {
    fn into_request(self) -> Result<GenerationRequest> {
        let request = match self {
            Command::Heightmap { size_factor, randomness, roughness, square_perturbation, seed } => {
                GenerationRequest::HeightMap(HeightMapParams {
                    size_factor,
                    initial_randomness: randomness,
                    roughness_factor: roughness,
                    square_perturbation,
                    seed,
                })
            }
            Command::Refine { grid, randomness, auto_roughness, steps, seed } => {
                GenerationRequest::Refine(RefineParams { grid, randomness, auto_roughness, steps, seed })
            }
            Command::Profile { rates, iterations, initial_rate, roughness, multiplicative, seed } => {
                let schedule = match rates {
                    Some(literal) => MutationSchedule::Explicit {
                        rates: parse_profile_literal(&literal)
                            .with_context(|| format!("invalid rate list {literal:?}"))?
                            .into_inner(),
                    },
                    None => MutationSchedule::Geometric { initial: initial_rate, roughness, count: iterations },
                };
                let displacement =
                    if multiplicative { Displacement::Multiplicative } else { Displacement::Additive };
                GenerationRequest::Profile(ProfileParams { schedule, displacement, seed })
            }
            Command::Noise { width, height, scale, exponent, octaves, max_coordinate } => {
                let weighting =
                    if max_coordinate { WeightPolicy::MaxCoordinate } else { WeightPolicy::SumOfSquares };
                GenerationRequest::NoiseMap(NoiseMapParams {
                    width,
                    height,
                    scale,
                    exponent,
                    octaves,
                    weighting,
                    ..NoiseMapParams::default()
                })
            }
            Command::Run { request } => {
                let json = fs::read_to_string(&request)
                    .with_context(|| format!("reading {}", request.display()))?;
                GenerationRequest::from_json_str(&json)
                    .with_context(|| format!("parsing {}", request.display()))?
            }
        };
        Ok(request)
    }
}

fn log_summary(field: &GeneratedField) {
    let (min, max) = (field.min_height(), field.max_height());
    match field {
        GeneratedField::Grid(grid) => {
            let hurst = compute_hurst(grid);
            tracing::info!(
                rows = grid.rows,
                cols = grid.cols,
                min,
                max,
                hurst = hurst.h,
                r_squared = hurst.r_squared,
                "generated grid"
            );
        }
        GeneratedField::Profile(profile) => {
            let lag1 = lag_autocorrelation(profile.as_slice(), 1);
            tracing::info!(len = profile.len(), min, max, lag1, "generated profile");
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let request = args.command.into_request()?;
    tracing::debug!(?request, "running request");

    let field = Generator::new().generate(&request).context("generation failed")?;
    log_summary(&field);

    let json = if args.pretty { serde_json::to_string_pretty(&field)? } else { serde_json::to_string(&field)? };
    match args.output {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote result");
        }
        None => println!("{json}"),
    }
    Ok(())
}
