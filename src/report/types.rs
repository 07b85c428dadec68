//! Report data types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{SimulationConfig, WeightPolicy};
use crate::simulation::ResultAggregate;

use super::summary::SimulationSummary;

/// Methodology values embedded in every report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: String,
    pub device_counts: BTreeMap<String, u32>,
    pub total_devices: u64,
    pub duration_minutes: u64,
    pub trial_count: u32,
    pub seed: i64,
    pub events_per_trial: u64,
    pub weight_policy: WeightPolicy,
    pub baseline_latency_formula: String,
    pub optimized_latency_formula: String,
}

impl ReportMetadata {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            device_counts: config.devices.clone(),
            total_devices: config.total_devices(),
            duration_minutes: config.general.duration_minutes,
            trial_count: config.general.trials,
            seed: config.general.seed,
            events_per_trial: config.events_per_trial(),
            weight_policy: config.general.weight_policy,
            baseline_latency_formula: config.baseline_latency_formula(),
            optimized_latency_formula: config.optimized_latency_formula(),
        }
    }
}

/// Complete simulation report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub metadata: ReportMetadata,
    pub summary: SimulationSummary,
    pub results: ResultAggregate,
}
