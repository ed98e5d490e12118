use std::path::PathBuf;
use std::process;

use clap::Parser;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tipsy_core::{ConfigError, Settings};
use tipsy_game::game::scenario::{Scenario, ScenarioError};
use tipsy_game::game::GameDriver;

/// Headless drunk driving: runs scripted players through a scenario and
/// reports how each round ended
#[derive(Parser, Debug)]
#[command(name = "tipsy", version)]
struct Args {
    /// Scenario file; the built-in demo road is used when omitted
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Settings file read instead of config.yaml
    #[arg(long)]
    config: Option<String>,

    /// Stop after this many ticks (0 runs until every round is over)
    #[arg(long)]
    ticks: Option<u64>,

    /// Seed for the drunkenness draws
    #[arg(long)]
    seed: Option<u64>,

    /// Sleep between ticks so the run takes wall-clock time
    #[arg(long)]
    realtime: bool,
}

#[derive(Debug, Error)]
enum AppError {
    #[error("bad settings: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}

// config.yaml in the working directory is optional, a named file is not
fn load_settings(config: Option<&str>) -> Result<Settings, AppError> {
    let settings = match config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::new()?,
    };
    Ok(settings)
}

fn run(args: Args) -> Result<(), AppError> {
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(ticks) = args.ticks {
        settings.sim_ticks = ticks;
    }
    if args.seed.is_some() {
        settings.rng_seed = args.seed;
    }

    let scenario = match &args.scenario {
        Some(path) => {
            info!("loading scenario from {}", path.display());
            Scenario::load(path)?
        }
        None => Scenario::demo(settings.player_amount, &settings),
    };

    info!(
        "starting {:?} run with {} players",
        scenario.mode,
        scenario.players.len()
    );
    let mut driver = GameDriver::new(settings, scenario)?;
    driver.start_loop(args.realtime);
    info!("finished after {} ticks", driver.tick_count());

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run(Args::parse()) {
        error!("{}", err);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;

    use super::*;

    #[test]
    fn invalid_settings_are_an_error_not_a_panic() {
        let path = env::temp_dir().join(format!("tipsy-bad-settings-{}.yaml", process::id()));
        fs::write(&path, "drunk_speed_min: 0.5\ndrunk_speed_max: 0.1\n").unwrap();

        let result = load_settings(path.to_str());
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn missing_named_settings_file_is_an_error() {
        assert!(matches!(
            load_settings(Some("no/such/settings.yaml")),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn bad_scenario_fails_the_run() {
        let args = Args::parse_from(["tipsy", "--scenario", "no/such/scenario.yaml"]);
        assert!(matches!(run(args), Err(AppError::Scenario(ScenarioError::Io(_)))));
    }
}
