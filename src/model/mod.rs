//! Event generation and per-strategy cost formulas.

pub mod event;
pub mod metrics;

pub use event::{is_urgent, Event, EventModel, URGENT_EVENT_TYPES};
pub use metrics::{BaselineStrategy, MetricError, OptimizedStrategy, StrategyMetrics};
