//! Shared utilities: duration parsing and configuration validation.

pub mod duration;
pub mod validation;

pub use duration::parse_duration_to_minutes;
pub use validation::{
    validate_compression_ratio, validate_device_counts, validate_event_types, validate_positive,
};
