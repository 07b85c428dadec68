//! # EdgeSim - Monte Carlo comparison of IoT transmission strategies
//!
//! This library estimates how an urgency-aware, edge-assisted transmission
//! strategy compares with always sending sensor events to a remote site, in
//! latency, WAN bandwidth and transmission energy, for a fixed population of
//! security sensors over a fixed time window.
//!
//! ## Overview
//!
//! Each run replays `duration_minutes x total_devices` randomly drawn sensor
//! events per trial, prices every event under both strategies, and records
//! the per-trial averages. Results are fully reproducible from the seed.
//!
//! - **Baseline**: `latency = base + size / bandwidth`, full payload on the WAN
//! - **Optimized**: lower base latency and faster link; urgent events
//!   (`motion_event`, `alarm_trigger`) are reduced to a fixed alert summary,
//!   routine events are compressed by a constant ratio
//!
//! ## Architecture
//!
//! - `config`: Typed configuration with the reference deployment as defaults
//! - `config_loader`: YAML loading and CLI overrides
//! - `model`: Event generator and per-strategy cost formulas
//! - `simulation`: Monte Carlo driver and the `ResultAggregate` data product
//! - `report`: Cross-trial summary, JSON and text reports
//! - `utils`: Duration parsing and validation helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use edgesim::{config_loader, report, run_simulation};
//!
//! let config = config_loader::load_config("edgesim.yaml".as_ref())?;
//! let results = run_simulation(&config)?;
//! let summary = report::summarize(&results)?;
//!
//! for metric in &summary.metrics {
//!     println!("{}: {}", metric.metric, metric.improvement);
//! }
//! # Ok::<(), color_eyre::Report>(())
//! ```
//!
//! ## Configuration Format
//!
//! Every section is optional; missing values fall back to the reference
//! motel deployment (37 devices, 60 minutes, 30 trials, seed 42).
//!
//! ```yaml
//! general:
//!   duration: "60m"
//!   trials: 30
//!   seed: 42
//!   weight_policy: strict   # or normalize
//!   log_level: info         # used unless --log-level is given
//!
//! devices:
//!   cameras: 12
//!   door_sensors: 20
//!   alarm_devices: 5
//!
//! event_types:
//!   - { name: camera_snapshot, size_kb: 500, probability: 0.15 }
//!   - { name: motion_event,    size_kb: 200, probability: 0.10 }
//!   - { name: door_status,     size_kb: 5,   probability: 0.50 }
//!   - { name: alarm_trigger,   size_kb: 100, probability: 0.05 }
//!   - { name: routine_ping,    size_kb: 2,   probability: 0.20 }
//!
//! baseline:
//!   base_latency_ms: 300
//!   bandwidth_mbps: 10
//!   energy_per_kb: 0.5
//!
//! optimized:
//!   base_latency_ms: 50
//!   bandwidth_mbps: 100
//!   energy_per_kb: 0.1
//!   urgent_metadata_kb: 5
//!   routine_compression_ratio: 0.5
//! ```
//!
//! ## Error Handling
//!
//! Engine errors are typed (`ValidationError`, `MetricError`,
//! `SimulationError`, `SummaryError`). File loading and report writing use
//! `color_eyre` for error reporting with context.

pub mod config;
pub mod config_loader;
pub mod model;
pub mod report;
pub mod simulation;
pub mod utils;

pub use config::{SimulationConfig, ValidationError};
pub use simulation::{run_simulation, run_simulation_parallel, ResultAggregate, SimulationError};
