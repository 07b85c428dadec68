//! Data product of a simulation run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mean cost of one strategy over all events of one trial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialAverage {
    pub avg_latency: f64,
    pub avg_bandwidth: f64,
    pub avg_energy: f64,
}

/// One early event of the first trial, kept for transparency
///
/// Metric values are rounded to two decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub type_name: String,
    pub data_kb: f64,
    pub urgency: bool,
    pub baseline_latency: f64,
    pub optimized_latency: f64,
    pub baseline_bandwidth: f64,
    pub optimized_bandwidth: f64,
}

/// Complete output of a run; read-only once returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultAggregate {
    /// One entry per trial, in trial order
    pub baseline: Vec<TrialAverage>,
    /// One entry per trial, in trial order
    pub optimized: Vec<TrialAverage>,
    /// Occurrences of each event type across all trials
    pub event_distribution: BTreeMap<String, u64>,
    /// At most ten events from trial 0
    pub sample_trace: Vec<SampleRecord>,
    pub events_per_trial: u64,
}

impl ResultAggregate {
    pub fn trial_count(&self) -> usize {
        self.baseline.len()
    }

    /// Events generated over the whole run
    pub fn total_events(&self) -> u64 {
        self.event_distribution.values().sum()
    }
}
