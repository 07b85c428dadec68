//! Per-event cost of each transmission strategy.

use crate::config::{BaselineConstants, OptimizedConstants};

/// Cost of transmitting one event under one strategy
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StrategyMetrics {
    pub latency_ms: f64,
    pub bandwidth_kb: f64,
    pub energy_units: f64,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MetricError {
    #[error("Invalid payload size: {0} kb (must be a positive number)")]
    InvalidPayload(f64),
}

fn check_payload(data_kb: f64) -> Result<(), MetricError> {
    if !data_kb.is_finite() || data_kb <= 0.0 {
        return Err(MetricError::InvalidPayload(data_kb));
    }
    Ok(())
}

/// Always-remote path: every payload travels in full to the remote site
#[derive(Debug, Clone)]
pub struct BaselineStrategy {
    constants: BaselineConstants,
}

impl BaselineStrategy {
    pub fn new(constants: &BaselineConstants) -> Self {
        Self {
            constants: constants.clone(),
        }
    }

    pub fn metrics(&self, data_kb: f64) -> Result<StrategyMetrics, MetricError> {
        check_payload(data_kb)?;
        let c = &self.constants;
        Ok(StrategyMetrics {
            latency_ms: c.base_latency_ms + data_kb / c.bandwidth_mbps,
            bandwidth_kb: data_kb,
            energy_units: data_kb * c.energy_per_kb,
        })
    }
}

/// Near-edge path
///
/// Urgent events are reduced to a fixed-size alert summary before leaving
/// the site, so their bandwidth does not depend on the payload. Routine
/// events are compressed by a constant ratio.
#[derive(Debug, Clone)]
pub struct OptimizedStrategy {
    constants: OptimizedConstants,
}

impl OptimizedStrategy {
    pub fn new(constants: &OptimizedConstants) -> Self {
        Self {
            constants: constants.clone(),
        }
    }

    pub fn metrics(&self, data_kb: f64, urgency: bool) -> Result<StrategyMetrics, MetricError> {
        check_payload(data_kb)?;
        let c = &self.constants;
        let bandwidth_kb = if urgency {
            c.urgent_metadata_kb
        } else {
            data_kb * c.routine_compression_ratio
        };
        Ok(StrategyMetrics {
            latency_ms: c.base_latency_ms + data_kb / c.bandwidth_mbps,
            bandwidth_kb,
            energy_units: data_kb * c.energy_per_kb,
        })
    }
}
