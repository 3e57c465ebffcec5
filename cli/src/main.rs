mod report;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use env_logger::Env;
use intersection_sim_core::config::{parse_params, SimulationConfig};
use intersection_sim_core::IntersectionController;
use log::info;

use report::{format_parameters, format_statistics, ConsoleObserver};

/// Parameter file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// JSON for `.json` files, plain-text parameters otherwise
    Auto,
    /// Whitespace-separated parameter file
    Text,
    /// JSON configuration object
    Json,
}

#[derive(Parser)]
#[command(name = "intersection-sim")]
#[command(version, about = "Discrete-event simulation of a signalized four-way intersection")]
struct Cli {
    /// Parameter file
    params: PathBuf,

    /// Parameter file format
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    format: InputFormat,

    /// Override the random generator seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the simulation end time
    #[arg(long)]
    stop_time: Option<i64>,

    /// Suppress the per-event trace
    #[arg(short, long)]
    quiet: bool,

    /// Print final statistics as JSON only
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let mut config = load_config(&cli.params, cli.format)?;
    apply_overrides(&mut config, cli.seed, cli.stop_time)?;

    let timings = config.timings();
    if !cli.json {
        println!("Parameters read in successfully - simulation is ready!");
        print!("{}", format_parameters(&config));
    }

    let mut controller =
        IntersectionController::new(config).context("simulation is not set up properly")?;
    if !cli.quiet && !cli.json {
        let observer = ConsoleObserver::new(timings);
        controller.start()?;
        for line in observer.format_events(controller.event_log().events()) {
            println!("{}", line);
        }
        controller.add_observer(Box::new(observer));
    }

    let stats = controller.run().context("simulation halted abnormally")?;
    info!("config fingerprint {}", stats.config_fingerprint);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!();
        print!("{}", format_statistics(&stats));
    }
    Ok(())
}

/// Apply command-line overrides, rejecting a configuration they break
fn apply_overrides(
    config: &mut SimulationConfig,
    seed: Option<u64>,
    stop_time: Option<i64>,
) -> Result<()> {
    if let Some(seed) = seed {
        config.seed = seed;
    }
    if let Some(stop_time) = stop_time {
        config.stop_time = stop_time;
    }
    config
        .validate()
        .context("simulation is not set up properly")
}

fn load_config(path: &Path, format: InputFormat) -> Result<SimulationConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("unable to open parameter file {}", path.display()))?;

    let format = match format {
        InputFormat::Auto if path.extension().is_some_and(|ext| ext == "json") => InputFormat::Json,
        InputFormat::Auto => InputFormat::Text,
        other => other,
    };

    let config = match format {
        InputFormat::Json => SimulationConfig::from_json_str(&contents),
        _ => parse_params(&contents),
    }
    .with_context(|| {
        format!(
            "parameter file {} was not read in successfully",
            path.display()
        )
    })?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_applied() {
        let mut config = SimulationConfig::example();
        apply_overrides(&mut config, Some(9), Some(500)).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.stop_time, 500);
    }

    #[test]
    fn test_bad_stop_time_override_rejected() {
        let mut config = SimulationConfig::example();
        let err = apply_overrides(&mut config, None, Some(0)).unwrap_err();

        assert_eq!(err.to_string(), "simulation is not set up properly");
        assert!(format!("{:#}", err).contains("stop_time must be > 0 (got 0)"));
    }
}
