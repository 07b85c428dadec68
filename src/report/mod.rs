//! Summary statistics and report output for simulation results.
//!
//! Everything here consumes a finished `ResultAggregate` and never changes it.

pub mod export;
pub mod summary;
pub mod types;

pub use export::{generate_json_report, generate_text_report, print_summary};
pub use summary::{improvement_percent, summarize, Improvement, Metric, SimulationSummary};
pub use types::{ReportMetadata, SimulationReport};

use crate::config::SimulationConfig;
use crate::simulation::ResultAggregate;

/// Bundle a finished run with its methodology and summary
pub fn build_report(
    config: &SimulationConfig,
    results: ResultAggregate,
) -> Result<SimulationReport, summary::SummaryError> {
    Ok(SimulationReport {
        metadata: ReportMetadata::from_config(config),
        summary: summarize(&results)?,
        results,
    })
}
