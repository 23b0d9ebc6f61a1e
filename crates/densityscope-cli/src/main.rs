//! densityscope CLI
//!
//! Explore DBSCAN on the built-in sample scenes.
//!
//! # Commands
//!
//! - `cluster`: run one clustering and print the statistics and clusters
//! - `sample`: print a generated scene as JSON
//! - `sweep`: run a grid of (eps, min_pts) pairs and pick the best one
//! - `compare`: run the loose, balanced and strict presets of a profession
//!
//! Settings come from an optional TOML file (`--config`); flags override it.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use densityscope_core::{
    compare_presets, sweep, ClusterEngine, ClusteringSummary, CoreRule, PresetLevel, Profession,
    Scene,
};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod report;

use config::DensityscopeConfig;
use report::{ClusterReport, CompareReport, SweepReport};

/// densityscope - density-based clustering explorer
#[derive(Parser)]
#[command(name = "densityscope")]
#[command(version, about = "Run DBSCAN over seeded sample scenes")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct DatasetArgs {
    /// Sample scene: real-estate, law, journalism, tutorial or live
    #[arg(long)]
    scene: Option<Scene>,

    /// Seed for scene generation
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster a scene and print the result
    Cluster {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Neighbourhood radius
        #[arg(long, allow_negative_numbers = true)]
        eps: Option<f64>,

        /// Minimum neighbours for a core point
        #[arg(long)]
        min_pts: Option<usize>,

        /// Count the point itself towards min_pts
        #[arg(long)]
        include_self: bool,

        /// Print JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// Print the points of a scene as JSON
    Sample {
        #[command(flatten)]
        dataset: DatasetArgs,
    },
    /// Cluster a scene over a grid of parameters
    Sweep {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Comma-separated eps values
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        eps: Vec<f64>,

        /// Comma-separated min_pts values
        #[arg(long, value_delimiter = ',')]
        min_pts: Vec<usize>,

        /// Count the point itself towards min_pts
        #[arg(long)]
        include_self: bool,

        /// Print JSON instead of the table
        #[arg(long)]
        json: bool,
    },
    /// Compare the named presets on a profession's realistic dataset
    Compare {
        /// real-estate, law or journalism; defaults to the configured scene's
        /// profession
        #[arg(long)]
        profession: Option<Profession>,

        /// Seed for dataset generation
        #[arg(long)]
        seed: Option<u64>,

        /// Only run this preset: loose, balanced or strict
        #[arg(long)]
        preset: Option<PresetLevel>,

        /// Print JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("densityscope=info,densityscope_core=info")),
        1 => EnvFilter::new("densityscope=debug,densityscope_core=debug"),
        _ => EnvFilter::new("densityscope=trace,densityscope_core=trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = DensityscopeConfig::load_or_default(cli.config.as_deref())?;
    if let Some(path) = &cli.config {
        debug!(path = %path.display(), "Configuration loaded");
    }

    match cli.command {
        Commands::Cluster {
            dataset,
            eps,
            min_pts,
            include_self,
            json,
        } => {
            apply_dataset_args(&mut config, dataset);
            if eps.is_some() {
                config.clustering.eps = eps;
            }
            if min_pts.is_some() {
                config.clustering.min_pts = min_pts;
            }
            if include_self {
                config.clustering.core_rule = CoreRule::IncludeSelf;
            }
            cluster_command(&config, json)
        }
        Commands::Sample { dataset } => {
            apply_dataset_args(&mut config, dataset);
            sample_command(&config)
        }
        Commands::Sweep {
            dataset,
            eps,
            min_pts,
            include_self,
            json,
        } => {
            apply_dataset_args(&mut config, dataset);
            if !eps.is_empty() {
                config.sweep.eps_values = eps;
            }
            if !min_pts.is_empty() {
                config.sweep.min_pts_values = min_pts;
            }
            if include_self {
                config.clustering.core_rule = CoreRule::IncludeSelf;
            }
            sweep_command(&config, json)
        }
        Commands::Compare {
            profession,
            seed,
            preset,
            json,
        } => {
            let profession = profession.unwrap_or(match config.dataset.scene {
                Scene::Profession(profession) => profession,
                _ => Profession::RealEstate,
            });
            let seed = seed.unwrap_or(config.dataset.seed);
            compare_command(profession, seed, preset, json)
        }
    }
}

fn apply_dataset_args(config: &mut DensityscopeConfig, args: DatasetArgs) {
    if let Some(scene) = args.scene {
        config.dataset.scene = scene;
    }
    if let Some(seed) = args.seed {
        config.dataset.seed = seed;
    }
}

fn cluster_command(config: &DensityscopeConfig, json: bool) -> Result<()> {
    let scene = config.dataset.scene;
    let seed = config.dataset.seed;
    let points = scene.generate_seeded(seed);
    let params = config.params();
    info!(%scene, seed, points = points.len(), "Generated scene");

    let clustering = ClusterEngine::new(params)
        .run(&points)
        .context("Clustering failed")?;
    let summary = ClusteringSummary::from_run(&points, &clustering)?;
    let report = ClusterReport::new(scene, seed, &points, &clustering, &summary);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }
    Ok(())
}

fn sample_command(config: &DensityscopeConfig) -> Result<()> {
    let scene = config.dataset.scene;
    let points = scene.generate_seeded(config.dataset.seed);
    info!(%scene, seed = config.dataset.seed, points = points.len(), "Generated scene");

    println!("{}", serde_json::to_string_pretty(&points)?);
    Ok(())
}

fn sweep_command(config: &DensityscopeConfig, json: bool) -> Result<()> {
    let scene = config.dataset.scene;
    let seed = config.dataset.seed;
    let points = scene.generate_seeded(seed);
    let (eps_values, min_pts_values) = config.sweep.grid(&scene.suggested_params());
    let core_rule = config.clustering.core_rule;
    info!(
        %scene,
        seed,
        runs = eps_values.len() * min_pts_values.len(),
        "Sweeping parameters"
    );

    let entries = sweep(&points, &eps_values, &min_pts_values, core_rule)
        .context("Parameter sweep failed")?;
    let report = SweepReport::new(scene, seed, core_rule, &entries);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }
    Ok(())
}

fn compare_command(
    profession: Profession,
    seed: u64,
    preset: Option<PresetLevel>,
    json: bool,
) -> Result<()> {
    let points = profession.realistic_dataset_seeded(seed);
    info!(%profession, seed, points = points.len(), "Generated realistic dataset");

    let mut outcomes = compare_presets(profession, &points).context("Preset comparison failed")?;
    if let Some(level) = preset {
        outcomes.retain(|outcome| outcome.preset.level == level);
    }

    let report = CompareReport {
        profession,
        seed,
        points: points.len(),
        outcomes: &outcomes,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }
    Ok(())
}
