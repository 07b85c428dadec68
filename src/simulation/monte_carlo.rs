//! Monte Carlo driver.
//!
//! Every trial replays `events_per_trial` generated events through both
//! strategies and records the per-event means. Trials are independent: each
//! owns a ChaCha8 generator seeded with the run seed and switched to the
//! stream numbered by the trial index. The sequential and parallel drivers
//! therefore produce identical aggregates, and a longer run reproduces the
//! trials of a shorter one.

use std::collections::BTreeMap;

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::config::{SimulationConfig, ValidationError};
use crate::model::{BaselineStrategy, EventModel, MetricError, OptimizedStrategy, StrategyMetrics};

use super::types::{ResultAggregate, SampleRecord, TrialAverage};

/// Number of events of trial 0 kept in `ResultAggregate::sample_trace`
pub const SAMPLE_TRACE_LEN: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ValidationError),
    #[error("Trial {trial}, event {event}: {source}")]
    Metric {
        trial: u32,
        event: u64,
        #[source]
        source: MetricError,
    },
}

/// Generator owned by a single trial. The seed's bits are reused as is, so
/// every `i64` maps to a distinct generator.
pub fn trial_rng(seed: i64, trial: u32) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
    rng.set_stream(u64::from(trial));
    rng
}

/// Run all trials one after another on the calling thread
pub fn run_simulation(config: &SimulationConfig) -> Result<ResultAggregate, SimulationError> {
    let engine = Engine::new(config)?;
    info!(
        "Running {} trials of {} events (seed {})",
        config.general.trials, engine.events_per_trial, config.general.seed
    );

    let outcomes = (0..config.general.trials)
        .map(|trial| engine.run_trial(config.general.seed, trial))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(engine.assemble(outcomes))
}

/// Run the trials on the rayon thread pool
///
/// Returns the same aggregate as `run_simulation` for the same config.
pub fn run_simulation_parallel(
    config: &SimulationConfig,
) -> Result<ResultAggregate, SimulationError> {
    let engine = Engine::new(config)?;
    info!(
        "Running {} trials of {} events in parallel on {} threads (seed {})",
        config.general.trials,
        engine.events_per_trial,
        rayon::current_num_threads(),
        config.general.seed
    );

    let outcomes = (0..config.general.trials)
        .into_par_iter()
        .map(|trial| engine.run_trial(config.general.seed, trial))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(engine.assemble(outcomes))
}

#[derive(Debug, Default)]
struct MetricSums {
    latency: f64,
    bandwidth: f64,
    energy: f64,
}

impl MetricSums {
    fn add(&mut self, metrics: &StrategyMetrics) {
        self.latency += metrics.latency_ms;
        self.bandwidth += metrics.bandwidth_kb;
        self.energy += metrics.energy_units;
    }

    fn average(&self, count: u64) -> TrialAverage {
        let count = count as f64;
        TrialAverage {
            avg_latency: self.latency / count,
            avg_bandwidth: self.bandwidth / count,
            avg_energy: self.energy / count,
        }
    }
}

/// Result of one trial before it is merged into the aggregate
#[derive(Debug)]
struct TrialOutcome {
    baseline: TrialAverage,
    optimized: TrialAverage,
    /// Indexed like the configured event types
    type_counts: Vec<u64>,
    trace: Vec<SampleRecord>,
}

struct Engine {
    events: EventModel,
    baseline: BaselineStrategy,
    optimized: OptimizedStrategy,
    events_per_trial: u64,
}

impl Engine {
    fn new(config: &SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self {
            events: EventModel::new(&config.event_types)?,
            baseline: BaselineStrategy::new(&config.baseline),
            optimized: OptimizedStrategy::new(&config.optimized),
            events_per_trial: config.events_per_trial(),
        })
    }

    fn run_trial(&self, seed: i64, trial: u32) -> Result<TrialOutcome, SimulationError> {
        let mut rng = trial_rng(seed, trial);
        let mut baseline_sums = MetricSums::default();
        let mut optimized_sums = MetricSums::default();
        let mut type_counts = vec![0u64; self.events.len()];
        let mut trace = Vec::new();

        for event_index in 0..self.events_per_trial {
            let event = self.events.generate(&mut rng);
            let metric_error = |source: MetricError| SimulationError::Metric {
                trial,
                event: event_index,
                source,
            };
            let base = self.baseline.metrics(event.data_kb).map_err(metric_error)?;
            let opt = self
                .optimized
                .metrics(event.data_kb, event.urgency)
                .map_err(metric_error)?;

            baseline_sums.add(&base);
            optimized_sums.add(&opt);
            type_counts[event.type_index] += 1;

            if trial == 0 && event_index < SAMPLE_TRACE_LEN {
                trace.push(SampleRecord {
                    type_name: event.type_name.to_string(),
                    data_kb: event.data_kb,
                    urgency: event.urgency,
                    baseline_latency: round2(base.latency_ms),
                    optimized_latency: round2(opt.latency_ms),
                    baseline_bandwidth: round2(base.bandwidth_kb),
                    optimized_bandwidth: round2(opt.bandwidth_kb),
                });
            }
        }

        let outcome = TrialOutcome {
            baseline: baseline_sums.average(self.events_per_trial),
            optimized: optimized_sums.average(self.events_per_trial),
            type_counts,
            trace,
        };
        debug!(
            "Trial {}: baseline latency {:.2}ms, optimized latency {:.2}ms",
            trial, outcome.baseline.avg_latency, outcome.optimized.avg_latency
        );
        Ok(outcome)
    }

    /// Merge trial outcomes in trial order
    fn assemble(&self, outcomes: Vec<TrialOutcome>) -> ResultAggregate {
        let mut totals = vec![0u64; self.events.len()];
        let mut baseline = Vec::with_capacity(outcomes.len());
        let mut optimized = Vec::with_capacity(outcomes.len());
        let mut sample_trace = Vec::new();

        for outcome in outcomes {
            for (total, count) in totals.iter_mut().zip(&outcome.type_counts) {
                *total += count;
            }
            baseline.push(outcome.baseline);
            optimized.push(outcome.optimized);
            if sample_trace.is_empty() {
                sample_trace = outcome.trace;
            }
        }

        let event_distribution: BTreeMap<String, u64> = self
            .events
            .types()
            .iter()
            .map(|spec| spec.name.clone())
            .zip(totals)
            .collect();

        info!(
            "Simulation complete: {} trials, {} events",
            baseline.len(),
            event_distribution.values().sum::<u64>()
        );

        ResultAggregate {
            baseline,
            optimized,
            event_distribution,
            sample_trace,
            events_per_trial: self.events_per_trial,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
