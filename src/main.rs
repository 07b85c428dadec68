use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use edgesim::config_loader::{self, CliOverrides};
use edgesim::report::{self, export};
use edgesim::{run_simulation, run_simulation_parallel, SimulationConfig};

/// Monte Carlo comparison of remote and edge-assisted IoT transmission
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error); overrides general.log_level
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Number of parallel workers (0 = auto-detect)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the simulation and write JSON and text reports
    Run {
        /// Path to the simulation configuration YAML file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for reports
        #[arg(short, long, default_value = "simulation_output")]
        output: PathBuf,

        /// Override the random seed (any integer)
        #[arg(long, allow_negative_numbers = true)]
        seed: Option<i64>,

        /// Override the number of Monte Carlo trials
        #[arg(long)]
        trials: Option<u32>,

        /// Override the simulated duration (e.g. "60", "30m", "2h")
        #[arg(long)]
        duration: Option<String>,

        /// Compute trials on the thread pool (results are identical)
        #[arg(long)]
        parallel: bool,
    },

    /// Print the event model and formulas of a configuration
    Describe {
        /// Path to the simulation configuration YAML file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write the reference configuration as YAML
    InitConfig {
        /// Destination file
        #[arg(short, long, default_value = "edgesim.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config_path = match &cli.command {
        Commands::Run { config, .. } | Commands::Describe { config } => config.clone(),
        Commands::InitConfig { .. } => None,
    };

    // The configuration is read before the logger starts so it can set the level
    let loaded = config_loader::load_or_default(config_path.as_deref());
    let level = resolve_log_level(cli.log_level.as_deref(), loaded.as_ref().ok());
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
    let mut sim_config = loaded?;
    if let Some(path) = &config_path {
        info!("Using configuration: {:?}", path);
    }

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .wrap_err("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Run {
            output,
            seed,
            trials,
            duration,
            parallel,
            ..
        } => {
            let overrides = CliOverrides {
                seed,
                trials,
                duration,
            };
            config_loader::apply_overrides(&mut sim_config, &overrides)?;
            run(&sim_config, &output, parallel)?;
        }
        Commands::Describe { .. } => {
            println!("{}", export::render_model_description(&sim_config));
        }
        Commands::InitConfig { output } => {
            config_loader::write_config(&SimulationConfig::default(), &output)?;
        }
    }

    Ok(())
}

/// Log filter: the CLI flag wins, then the configuration, then "info"
fn resolve_log_level(cli_level: Option<&str>, config: Option<&SimulationConfig>) -> String {
    cli_level
        .map(str::to_string)
        .or_else(|| config.and_then(|c| c.general.log_level.clone()))
        .unwrap_or_else(|| "info".to_string())
}

fn run(config: &SimulationConfig, output: &Path, parallel: bool) -> Result<()> {
    info!("Starting EdgeSim Monte Carlo run");
    info!("Output directory: {:?}", output);

    let results = if parallel {
        run_simulation_parallel(config)?
    } else {
        run_simulation(config)?
    };

    let report = report::build_report(config, results)?;

    fs::create_dir_all(output)
        .wrap_err_with(|| format!("Failed to create output directory '{}'", output.display()))?;
    report::generate_json_report(&report, &output.join("simulation_report.json"))?;
    report::generate_text_report(&report, &output.join("simulation_report.txt"))?;
    report::print_summary(&report);

    info!("Simulation run completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["edgesim", "run", "--config", "test.yaml"]);

        match cli.command {
            Commands::Run {
                config,
                output,
                parallel,
                ..
            } => {
                assert_eq!(config, Some(PathBuf::from("test.yaml")));
                assert_eq!(output, PathBuf::from("simulation_output"));
                assert!(!parallel);
            }
            _ => panic!("expected run subcommand"),
        }
        assert_eq!(cli.log_level, None);
        assert_eq!(cli.threads, 0);
    }

    #[test]
    fn test_override_args() {
        let cli = Cli::parse_from([
            "edgesim",
            "run",
            "--seed",
            "7",
            "--trials",
            "5",
            "--duration",
            "2h",
            "--parallel",
            "-j",
            "4",
        ]);

        match cli.command {
            Commands::Run {
                config,
                seed,
                trials,
                duration,
                parallel,
                ..
            } => {
                assert_eq!(config, None);
                assert_eq!(seed, Some(7));
                assert_eq!(trials, Some(5));
                assert_eq!(duration.as_deref(), Some("2h"));
                assert!(parallel);
            }
            _ => panic!("expected run subcommand"),
        }
        assert_eq!(cli.threads, 4);
    }

    #[test]
    fn test_negative_seed_override() {
        let cli = Cli::parse_from(["edgesim", "run", "--seed", "-7"]);
        match cli.command {
            Commands::Run { seed, .. } => assert_eq!(seed, Some(-7)),
            _ => panic!("expected run subcommand"),
        }
    }

    #[test]
    fn test_log_level_resolution() {
        let mut config = SimulationConfig::default();
        config.general.log_level = Some("trace".to_string());

        assert_eq!(resolve_log_level(None, Some(&config)), "trace");
        assert_eq!(resolve_log_level(Some("warn"), Some(&config)), "warn");
        assert_eq!(resolve_log_level(None, None), "info");

        config.general.log_level = None;
        assert_eq!(resolve_log_level(None, Some(&config)), "info");

        let cli = Cli::parse_from(["edgesim", "describe", "--log-level", "debug"]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_init_config_default_output() {
        let cli = Cli::parse_from(["edgesim", "init-config"]);
        match cli.command {
            Commands::InitConfig { output } => assert_eq!(output, PathBuf::from("edgesim.yaml")),
            _ => panic!("expected init-config subcommand"),
        }
    }
}
