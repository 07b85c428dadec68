use crate::config::SimulationConfig;
use crate::utils::duration::parse_duration_to_minutes;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<SimulationConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration '{}'", config_path.display()))?;

    let config: SimulationConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?;

    config.validate()?;

    info!(
        "Loaded {} event types, {} devices, {} trials",
        config.event_types.len(),
        config.total_devices(),
        config.general.trials
    );
    Ok(config)
}

/// Load a configuration file, or fall back to the reference deployment
pub fn load_or_default(config_path: Option<&Path>) -> Result<SimulationConfig> {
    match config_path {
        Some(path) => load_config(path),
        None => {
            info!("No configuration file given, using the reference deployment");
            Ok(SimulationConfig::default())
        }
    }
}

/// CLI arguments that override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub seed: Option<i64>,
    pub trials: Option<u32>,
    pub duration: Option<String>,
}

/// Apply CLI overrides to a configuration before it is frozen for a run
pub fn apply_overrides(config: &mut SimulationConfig, overrides: &CliOverrides) -> Result<()> {
    if let Some(seed) = overrides.seed {
        info!("Overriding seed: {} -> {}", config.general.seed, seed);
        config.general.seed = seed;
    }

    if let Some(trials) = overrides.trials {
        info!("Overriding trials: {} -> {}", config.general.trials, trials);
        config.general.trials = trials;
    }

    if let Some(duration) = &overrides.duration {
        let minutes = parse_duration_to_minutes(duration).map_err(|e| eyre!(e))?;
        info!(
            "Overriding duration: {} -> {} minutes",
            config.general.duration_minutes, minutes
        );
        config.general.duration_minutes = minutes;
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}

/// Write a configuration as YAML
pub fn write_config(config: &SimulationConfig, output_path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(config).wrap_err("Failed to serialize configuration")?;
    std::fs::write(output_path, yaml)
        .wrap_err_with(|| format!("Failed to write configuration to '{}'", output_path.display()))?;
    info!("Configuration written to: {:?}", output_path);
    Ok(())
}
