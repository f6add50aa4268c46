//! `unflatten` — generate a normal map for 2D art from d-lit images.

use clap::{CommandFactory, Parser, ValueEnum};
use log::{info, warn};
use std::path::PathBuf;
use std::time::Instant;
use unflattener::config::{load_config, UnflattenConfig};
use unflattener::diagnostics::{elapsed_ms, ChannelStats, RunReport, TimingBreakdown};
use unflattener::image::io::{load_grayscale_plane, write_json_file};
use unflattener::pipeline::{create_from_files, save_normal_map, verify_round_trip};
use unflattener::{Depth, DirectionalSet, ZClosure};

#[derive(Parser, Debug)]
#[command(name = "unflatten")]
#[command(about = "Generate a normal map for 2D art")]
#[command(
    after_help = "One input file minimum, at least two (one for each axis) highly recommended.\nInput files should be 8-bit grayscale PNGs."
)]
#[command(version)]
struct Cli {
    /// Image lit from the top.
    #[arg(short, long)]
    top: Option<PathBuf>,
    /// Image lit from the bottom.
    #[arg(short, long)]
    bottom: Option<PathBuf>,
    /// Image lit from the left.
    #[arg(short, long)]
    left: Option<PathBuf>,
    /// Image lit from the right.
    #[arg(short, long)]
    right: Option<PathBuf>,
    /// Output file name [default: result.png].
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Normal map z range, in (0, 1] [default: 0.5].
    #[arg(short, long)]
    depth: Option<Depth>,
    /// Grayscale image stored in the alpha channel of the output.
    #[arg(long)]
    alpha: Option<PathBuf>,
    /// Value used in place of a missing left or right image.
    #[arg(long)]
    horizontal_baseline: Option<f64>,
    /// Value used in place of a missing top or bottom image.
    #[arg(long)]
    vertical_baseline: Option<f64>,
    /// How z is derived from the planar components.
    #[arg(long, value_enum)]
    z_closure: Option<ZClosureArg>,
    /// JSON run configuration; command-line flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write a JSON run report to this path.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Reload the written map and check that it round-trips.
    #[arg(long)]
    verify: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ZClosureArg {
    Literal,
    UnitSphere,
}

impl From<ZClosureArg> for ZClosure {
    fn from(arg: ZClosureArg) -> Self {
        match arg {
            ZClosureArg::Literal => ZClosure::Literal,
            ZClosureArg::UnitSphere => ZClosure::UnitSphere,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let t0 = Instant::now();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => UnflattenConfig::default(),
    };
    let config = merge(cli, config);

    if config.inputs.is_empty() {
        return Err(usage());
    }

    let mut timings = TimingBreakdown::default();
    let map = timings
        .time("reconstruct", || {
            create_from_files(&config.inputs, &config.reconstruct)
        })
        .map_err(|e| e.to_string())?;
    let alpha = match &config.alpha {
        Some(path) => Some(
            timings
                .time("load_alpha", || load_grayscale_plane(path))
                .map_err(|e| e.to_string())?,
        ),
        None => None,
    };
    timings
        .time("save", || {
            save_normal_map(&map, &config.output, config.depth, alpha.as_ref())
        })
        .map_err(|e| e.to_string())?;

    let verification = if config.verify {
        let eq = timings
            .time("verify", || {
                verify_round_trip(&map, &config.output, config.depth)
            })
            .map_err(|e| e.to_string())?;
        if eq.equivalent {
            info!(
                "Round trip ok: max diff {:.3} < {:.3} levels",
                eq.max_diff_levels, eq.tolerance_levels
            );
        } else {
            warn!(
                "Round trip failed: max diff {:.3} >= {:.3} levels",
                eq.max_diff_levels, eq.tolerance_levels
            );
        }
        Some(eq)
    } else {
        None
    };

    timings.total_ms = elapsed_ms(t0);
    info!("Execution time: {:.3} s", timings.total_ms / 1000.0);

    if let Some(report_path) = &config.report {
        let report = RunReport {
            inputs: config.inputs.iter().map(|(d, _)| d).collect(),
            width: map.width(),
            height: map.height(),
            depth: config.depth,
            z_closure: config.reconstruct.z_closure,
            output: config.output.clone(),
            channels: ChannelStats::of(&map),
            verification,
            timings,
        };
        write_json_file(report_path, &report).map_err(|e| e.to_string())?;
        info!("Report written to {}", report_path.display());
    }

    match verification {
        Some(eq) if !eq.equivalent => Err(format!(
            "{} does not round-trip at depth {}",
            config.output.display(),
            config.depth
        )),
        _ => Ok(()),
    }
}

fn usage() -> String {
    format!(
        "at least one of --top, --bottom, --left or --right is required\n\n{}",
        Cli::command().render_help()
    )
}

/// Overlay command-line flags on a loaded configuration.
fn merge(cli: Cli, mut config: UnflattenConfig) -> UnflattenConfig {
    let flags = DirectionalSet {
        top: cli.top,
        bottom: cli.bottom,
        left: cli.left,
        right: cli.right,
    };
    config.inputs = flags.or(config.inputs);
    if let Some(output) = cli.output {
        config.output = output;
    }
    if let Some(depth) = cli.depth {
        config.depth = depth;
    }
    config.alpha = cli.alpha.or(config.alpha);
    if let Some(hb) = cli.horizontal_baseline {
        config.reconstruct.horizontal_baseline = hb;
    }
    if let Some(vb) = cli.vertical_baseline {
        config.reconstruct.vertical_baseline = vb;
    }
    if let Some(closure) = cli.z_closure {
        config.reconstruct.z_closure = closure.into();
    }
    config.report = cli.report.or(config.report);
    config.verify |= cli.verify;
    config
}
