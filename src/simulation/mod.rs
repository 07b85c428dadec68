//! Multi-trial simulation of the two transmission strategies.

pub mod monte_carlo;
pub mod types;

pub use monte_carlo::{
    run_simulation, run_simulation_parallel, trial_rng, SimulationError, SAMPLE_TRACE_LEN,
};
pub use types::{ResultAggregate, SampleRecord, TrialAverage};
