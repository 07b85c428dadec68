use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::utils::duration::parse_duration_to_minutes;
use crate::utils::validation::{
    validate_compression_ratio, validate_device_counts, validate_event_types, validate_positive,
};

/// How event-type probabilities that do not sum to 1 are treated
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightPolicy {
    /// Reject the configuration unless probabilities sum to 1 (within 1e-6)
    #[default]
    Strict,
    /// Use the probabilities as relative weights
    Normalize,
}

/// One category of sensor event
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EventTypeSpec {
    pub name: String,
    pub size_kb: f64,
    pub probability: f64,
}

impl EventTypeSpec {
    pub fn new(name: &str, size_kb: f64, probability: f64) -> Self {
        Self {
            name: name.to_string(),
            size_kb,
            probability,
        }
    }
}

/// Constants of the always-remote transmission path
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BaselineConstants {
    pub base_latency_ms: f64,
    pub bandwidth_mbps: f64,
    pub energy_per_kb: f64,
}

/// Constants of the near-edge transmission path
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OptimizedConstants {
    pub base_latency_ms: f64,
    pub bandwidth_mbps: f64,
    pub energy_per_kb: f64,
    /// Size of the alert summary sent in place of an urgent payload
    pub urgent_metadata_kb: f64,
    /// Fraction of a routine payload left after compression, in (0, 1]
    pub routine_compression_ratio: f64,
}

/// Run-wide settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Simulated window; accepts a number of minutes or a string like "1h"
    #[serde(alias = "duration", deserialize_with = "deserialize_minutes")]
    pub duration_minutes: u64,
    pub trials: u32,
    pub seed: i64,
    pub weight_policy: WeightPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

/// Complete, immutable description of one simulation run
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub general: GeneralConfig,
    /// Device class name to number of devices
    pub devices: BTreeMap<String, u32>,
    pub event_types: Vec<EventTypeSpec>,
    pub baseline: BaselineConstants,
    pub optimized: OptimizedConstants,
}

impl SimulationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.general.duration_minutes == 0 {
            return Err(ValidationError::InvalidGeneral(
                "duration must be at least one minute".to_string(),
            ));
        }
        if self.general.trials == 0 {
            return Err(ValidationError::InvalidGeneral(
                "trials must be a positive integer".to_string(),
            ));
        }

        validate_device_counts(&self.devices).map_err(ValidationError::InvalidDevices)?;
        if self.events_per_trial_checked().is_none() {
            return Err(ValidationError::InvalidGeneral(format!(
                "{} minutes x {} devices overflows the event counter",
                self.general.duration_minutes,
                self.total_devices()
            )));
        }

        validate_event_types(&self.event_types, self.general.weight_policy)
            .map_err(ValidationError::InvalidEventTypes)?;

        let b = &self.baseline;
        for (name, value) in [
            ("baseline.base_latency_ms", b.base_latency_ms),
            ("baseline.bandwidth_mbps", b.bandwidth_mbps),
            ("baseline.energy_per_kb", b.energy_per_kb),
        ] {
            validate_positive(name, value).map_err(ValidationError::InvalidStrategy)?;
        }

        let o = &self.optimized;
        for (name, value) in [
            ("optimized.base_latency_ms", o.base_latency_ms),
            ("optimized.bandwidth_mbps", o.bandwidth_mbps),
            ("optimized.energy_per_kb", o.energy_per_kb),
            ("optimized.urgent_metadata_kb", o.urgent_metadata_kb),
        ] {
            validate_positive(name, value).map_err(ValidationError::InvalidStrategy)?;
        }
        validate_compression_ratio(o.routine_compression_ratio)
            .map_err(ValidationError::InvalidStrategy)?;

        Ok(())
    }

    /// Sum of all device class counts
    pub fn total_devices(&self) -> u64 {
        self.devices.values().map(|&count| u64::from(count)).sum()
    }

    /// Events generated in every trial: duration x total devices
    pub fn events_per_trial(&self) -> u64 {
        self.events_per_trial_checked().unwrap_or(u64::MAX)
    }

    fn events_per_trial_checked(&self) -> Option<u64> {
        self.general.duration_minutes.checked_mul(self.total_devices())
    }

    /// Latency formula of the baseline path, as printed in reports
    pub fn baseline_latency_formula(&self) -> String {
        format!(
            "Latency = {} + (Data_kb / {})",
            self.baseline.base_latency_ms, self.baseline.bandwidth_mbps
        )
    }

    /// Latency formula of the optimized path, as printed in reports
    pub fn optimized_latency_formula(&self) -> String {
        format!(
            "Latency = {} + (Data_kb / {})",
            self.optimized.base_latency_ms, self.optimized.bandwidth_mbps
        )
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid device configuration: {0}")]
    InvalidDevices(String),
    #[error("Invalid event type configuration: {0}")]
    InvalidEventTypes(String),
    #[error("Invalid strategy constants: {0}")]
    InvalidStrategy(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DurationValue {
    Minutes(u64),
    Text(String),
}

fn deserialize_minutes<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match DurationValue::deserialize(deserializer)? {
        DurationValue::Minutes(minutes) => Ok(minutes),
        DurationValue::Text(text) => {
            parse_duration_to_minutes(&text).map_err(serde::de::Error::custom)
        }
    }
}

/// Event types of the reference motel deployment
pub fn reference_event_types() -> Vec<EventTypeSpec> {
    vec![
        EventTypeSpec::new("camera_snapshot", 500.0, 0.15),
        EventTypeSpec::new("motion_event", 200.0, 0.10),
        EventTypeSpec::new("door_status", 5.0, 0.50),
        EventTypeSpec::new("alarm_trigger", 100.0, 0.05),
        EventTypeSpec::new("routine_ping", 2.0, 0.20),
    ]
}

/// Default implementations
impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            duration_minutes: 60,
            trials: 30,
            seed: 42,
            weight_policy: WeightPolicy::Strict,
            log_level: Some("info".to_string()),
        }
    }
}

impl Default for BaselineConstants {
    fn default() -> Self {
        Self {
            base_latency_ms: 300.0,
            bandwidth_mbps: 10.0,
            energy_per_kb: 0.5,
        }
    }
}

impl Default for OptimizedConstants {
    fn default() -> Self {
        Self {
            base_latency_ms: 50.0,
            bandwidth_mbps: 100.0,
            energy_per_kb: 0.1,
            urgent_metadata_kb: 5.0,
            routine_compression_ratio: 0.5,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let devices = [("cameras", 12), ("door_sensors", 20), ("alarm_devices", 5)]
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();

        Self {
            general: GeneralConfig::default(),
            devices,
            event_types: reference_event_types(),
            baseline: BaselineConstants::default(),
            optimized: OptimizedConstants::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.total_devices(), 37);
        assert_eq!(config.events_per_trial(), 2220);
    }

    #[test]
    fn test_config_parsing() {
        let yaml = r#"
general:
  duration: "2h"
  trials: 5
  seed: 7
devices:
  cameras: 2
  door_sensors: 3
event_types:
  - name: "door_status"
    size_kb: 5
    probability: 0.75
  - name: "alarm_trigger"
    size_kb: 100
    probability: 0.25
"#;

        let config: SimulationConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.duration_minutes, 120);
        assert_eq!(config.general.trials, 5);
        assert_eq!(config.general.seed, 7);
        assert_eq!(config.events_per_trial(), 600);
        assert_eq!(config.event_types.len(), 2);

        // Sections that are left out fall back to the reference constants
        assert_eq!(config.baseline, BaselineConstants::default());
        assert_eq!(config.optimized, OptimizedConstants::default());
    }

    #[test]
    fn test_negative_seed_and_log_level() {
        let yaml = r#"
general:
  seed: -7
  log_level: trace
"#;
        let config: SimulationConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.seed, -7);
        assert_eq!(config.general.log_level.as_deref(), Some("trace"));

        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("seed: -7"));
    }

    #[test]
    fn test_numeric_duration() {
        let yaml = r#"
general:
  duration_minutes: 15
"#;
        let config: SimulationConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.general.duration_minutes, 15);
        assert_eq!(config.general.trials, 30);
    }

    #[test]
    fn test_bad_duration_string_fails_to_parse() {
        let yaml = r#"
general:
  duration: "ten minutes"
"#;
        assert!(serde_yaml::from_str::<SimulationConfig>(yaml).is_err());
    }

    #[test]
    fn test_weight_policy_parsing() {
        let yaml = r#"
general:
  weight_policy: normalize
"#;
        let config: SimulationConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.general.weight_policy, WeightPolicy::Normalize);
    }

    #[test]
    fn test_validation_errors() {
        let mut config = SimulationConfig::default();
        config.general.trials = 0;
        assert!(matches!(config.validate(), Err(ValidationError::InvalidGeneral(_))));

        let mut config = SimulationConfig::default();
        config.general.duration_minutes = 0;
        assert!(matches!(config.validate(), Err(ValidationError::InvalidGeneral(_))));

        let mut config = SimulationConfig::default();
        config.devices.values_mut().for_each(|count| *count = 0);
        assert!(matches!(config.validate(), Err(ValidationError::InvalidDevices(_))));

        let mut config = SimulationConfig::default();
        config.event_types.clear();
        assert!(matches!(config.validate(), Err(ValidationError::InvalidEventTypes(_))));

        let mut config = SimulationConfig::default();
        config.baseline.bandwidth_mbps = 0.0;
        assert!(matches!(config.validate(), Err(ValidationError::InvalidStrategy(_))));

        let mut config = SimulationConfig::default();
        config.optimized.base_latency_ms = -1.0;
        assert!(matches!(config.validate(), Err(ValidationError::InvalidStrategy(_))));

        let mut config = SimulationConfig::default();
        config.optimized.routine_compression_ratio = 1.5;
        assert!(matches!(config.validate(), Err(ValidationError::InvalidStrategy(_))));

        let mut config = SimulationConfig::default();
        config.optimized.routine_compression_ratio = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_weight_policy_validation() {
        let mut config = SimulationConfig::default();
        config.event_types[0].probability = 0.5;
        assert!(matches!(config.validate(), Err(ValidationError::InvalidEventTypes(_))));

        config.general.weight_policy = WeightPolicy::Normalize;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_latency_formulas() {
        let config = SimulationConfig::default();
        assert_eq!(config.baseline_latency_formula(), "Latency = 300 + (Data_kb / 10)");
        assert_eq!(config.optimized_latency_formula(), "Latency = 50 + (Data_kb / 100)");
    }
}
