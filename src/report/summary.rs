//! Cross-trial statistics and strategy comparison.
//!
//! A stateless reducer over `ResultAggregate`: mean of the per-trial
//! averages for each metric and strategy, the spread across trials, and the
//! percentage improvement of the optimized strategy over the baseline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::simulation::{ResultAggregate, TrialAverage};

/// z value for a two-sided 95% confidence interval
const Z_95: f64 = 1.96;

/// Compared quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Latency,
    Bandwidth,
    Energy,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Latency, Metric::Bandwidth, Metric::Energy];

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Latency => "ms",
            Metric::Bandwidth => "kb",
            Metric::Energy => "units",
        }
    }

    /// Why a reduction of this metric matters for a security deployment
    pub fn interpretation(&self) -> &'static str {
        match self {
            Metric::Latency => "Edge reduces WAN delay",
            Metric::Bandwidth => "Edge filtering reduces WAN traffic",
            Metric::Energy => "Edge transmission uses less power",
        }
    }

    fn of(&self, trial: &TrialAverage) -> f64 {
        match self {
            Metric::Latency => trial.avg_latency,
            Metric::Bandwidth => trial.avg_bandwidth,
            Metric::Energy => trial.avg_energy,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Latency => write!(f, "Latency"),
            Metric::Bandwidth => write!(f, "Bandwidth"),
            Metric::Energy => write!(f, "Energy"),
        }
    }
}

/// Relative reduction of the optimized mean against the baseline mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "percent", rename_all = "lowercase")]
pub enum Improvement {
    Percent(f64),
    /// The baseline mean is zero, so no percentage exists
    Undefined,
}

impl Improvement {
    pub fn percent(&self) -> Option<f64> {
        match self {
            Improvement::Percent(value) => Some(*value),
            Improvement::Undefined => None,
        }
    }
}

impl fmt::Display for Improvement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Improvement::Percent(value) => write!(f, "{:.2}%", value),
            Improvement::Undefined => write!(f, "undefined"),
        }
    }
}

/// (baseline - optimized) / baseline x 100
///
/// # Examples
/// ```
/// use edgesim::report::summary::{improvement_percent, Improvement};
///
/// let improvement = improvement_percent(250.0, 55.0).percent().unwrap();
/// assert!((improvement - 78.0).abs() < 1e-9);
/// assert_eq!(improvement_percent(0.0, 55.0), Improvement::Undefined);
/// ```
pub fn improvement_percent(baseline_mean: f64, optimized_mean: f64) -> Improvement {
    if baseline_mean == 0.0 {
        return Improvement::Undefined;
    }
    let percent = (baseline_mean - optimized_mean) / baseline_mean * 100.0;
    if percent.is_finite() {
        Improvement::Percent(percent)
    } else {
        Improvement::Undefined
    }
}

/// Statistics of one metric under one strategy across trials
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialStats {
    pub mean: f64,
    /// Sample standard deviation (zero for a single trial)
    pub std_dev: f64,
    /// Half-width of the 95% confidence interval of the mean
    pub ci95: f64,
}

impl TrialStats {
    fn from_values(values: &[f64]) -> Self {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std_dev = if values.len() > 1 {
            let variance =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
            variance.sqrt()
        } else {
            0.0
        };
        Self {
            mean,
            std_dev,
            ci95: Z_95 * std_dev / n.sqrt(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub metric: Metric,
    pub baseline: TrialStats,
    pub optimized: TrialStats,
    pub improvement: Improvement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub trial_count: usize,
    pub events_per_trial: u64,
    /// Latency, bandwidth and energy, in that order
    pub metrics: Vec<MetricSummary>,
}

impl SimulationSummary {
    pub fn metric(&self, metric: Metric) -> Option<&MetricSummary> {
        self.metrics.iter().find(|summary| summary.metric == metric)
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SummaryError {
    #[error("Cannot summarize a result without trials")]
    NoTrials,
    #[error("Baseline has {baseline} trials but optimized has {optimized}")]
    MismatchedTrials { baseline: usize, optimized: usize },
}

/// Reduce per-trial averages to per-metric comparisons
pub fn summarize(result: &ResultAggregate) -> Result<SimulationSummary, SummaryError> {
    if result.baseline.len() != result.optimized.len() {
        return Err(SummaryError::MismatchedTrials {
            baseline: result.baseline.len(),
            optimized: result.optimized.len(),
        });
    }
    if result.baseline.is_empty() {
        return Err(SummaryError::NoTrials);
    }

    let metrics = Metric::ALL
        .iter()
        .map(|metric| {
            let baseline_values: Vec<f64> = result.baseline.iter().map(|t| metric.of(t)).collect();
            let optimized_values: Vec<f64> =
                result.optimized.iter().map(|t| metric.of(t)).collect();
            let baseline = TrialStats::from_values(&baseline_values);
            let optimized = TrialStats::from_values(&optimized_values);
            MetricSummary {
                metric: *metric,
                baseline,
                optimized,
                improvement: improvement_percent(baseline.mean, optimized.mean),
            }
        })
        .collect();

    Ok(SimulationSummary {
        trial_count: result.trial_count(),
        events_per_trial: result.events_per_trial,
        metrics,
    })
}
