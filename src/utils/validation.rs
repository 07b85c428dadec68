//! Configuration validation utilities.
//!
//! This module provides validation functions for individual configuration
//! parameters. Each check returns a human-readable message that the caller
//! wraps into the matching `ValidationError` variant.

use std::collections::{BTreeMap, HashSet};

use crate::config::{EventTypeSpec, WeightPolicy};

/// Maximum distance of the probability sum from 1 under `WeightPolicy::Strict`
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// Validate that a constant is a finite, strictly positive number
///
/// # Examples
/// ```
/// use edgesim::utils::validation::validate_positive;
///
/// assert!(validate_positive("bandwidth_mbps", 10.0).is_ok());
/// assert!(validate_positive("bandwidth_mbps", 0.0).is_err());
/// assert!(validate_positive("bandwidth_mbps", f64::NAN).is_err());
/// ```
pub fn validate_positive(name: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{} must be a positive number (got {})", name, value));
    }
    Ok(())
}

/// Validate the routine compression ratio, which must lie in (0, 1]
///
/// # Examples
/// ```
/// use edgesim::utils::validation::validate_compression_ratio;
///
/// assert!(validate_compression_ratio(0.5).is_ok());
/// assert!(validate_compression_ratio(1.0).is_ok());
/// assert!(validate_compression_ratio(0.0).is_err());
/// assert!(validate_compression_ratio(1.01).is_err());
/// ```
pub fn validate_compression_ratio(ratio: f64) -> Result<(), String> {
    if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
        return Err(format!(
            "routine_compression_ratio must be in (0, 1] (got {})",
            ratio
        ));
    }
    Ok(())
}

/// Validate device class counts
///
/// Individual classes may be zero (they are logged), but the deployment as a
/// whole must contain at least one device.
pub fn validate_device_counts(devices: &BTreeMap<String, u32>) -> Result<(), String> {
    if devices.is_empty() {
        return Err("at least one device class is required".to_string());
    }

    for (class, count) in devices {
        if class.trim().is_empty() {
            return Err("device class names cannot be empty".to_string());
        }
        if *count == 0 {
            log::warn!("Device class '{}' has no devices and contributes no events", class);
        }
    }

    let total: u64 = devices.values().map(|&count| u64::from(count)).sum();
    if total == 0 {
        return Err("total device count must be positive".to_string());
    }

    Ok(())
}

/// Validate the event type collection
///
/// Checks for:
/// - At least one event type
/// - Unique, non-empty names
/// - Positive sizes
/// - Probabilities in (0, 1]
/// - Probabilities summing to 1 when `policy` is `Strict`
pub fn validate_event_types(
    event_types: &[EventTypeSpec],
    policy: WeightPolicy,
) -> Result<(), String> {
    if event_types.is_empty() {
        return Err("at least one event type is required".to_string());
    }

    let mut names = HashSet::new();
    for spec in event_types {
        if spec.name.trim().is_empty() {
            return Err("event type names cannot be empty".to_string());
        }
        if !names.insert(spec.name.as_str()) {
            return Err(format!("duplicate event type '{}'", spec.name));
        }
        validate_positive(&format!("size_kb of '{}'", spec.name), spec.size_kb)?;
        if !spec.probability.is_finite() || spec.probability <= 0.0 || spec.probability > 1.0 {
            return Err(format!(
                "probability of '{}' must be in (0, 1] (got {})",
                spec.name, spec.probability
            ));
        }
    }

    let total: f64 = event_types.iter().map(|spec| spec.probability).sum();
    match policy {
        WeightPolicy::Strict => {
            if (total - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
                return Err(format!(
                    "probabilities sum to {} (expected 1); set weight_policy: normalize to use them as relative weights",
                    total
                ));
            }
        }
        WeightPolicy::Normalize => {
            if (total - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
                log::info!("Normalizing event probabilities (sum was {})", total);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, size_kb: f64, probability: f64) -> EventTypeSpec {
        EventTypeSpec::new(name, size_kb, probability)
    }

    #[test]
    fn test_validate_event_types() {
        let types = vec![spec("a", 1.0, 0.4), spec("b", 2.0, 0.6)];
        assert!(validate_event_types(&types, WeightPolicy::Strict).is_ok());

        assert!(validate_event_types(&[], WeightPolicy::Normalize).is_err());

        let duplicate = vec![spec("a", 1.0, 0.5), spec("a", 2.0, 0.5)];
        assert!(validate_event_types(&duplicate, WeightPolicy::Strict).is_err());

        let zero_probability = vec![spec("a", 1.0, 0.0), spec("b", 2.0, 1.0)];
        assert!(validate_event_types(&zero_probability, WeightPolicy::Normalize).is_err());

        let zero_size = vec![spec("a", 0.0, 1.0)];
        assert!(validate_event_types(&zero_size, WeightPolicy::Strict).is_err());
    }

    #[test]
    fn test_probability_sum_policy() {
        let types = vec![spec("a", 1.0, 0.2), spec("b", 2.0, 0.2)];
        assert!(validate_event_types(&types, WeightPolicy::Strict).is_err());
        assert!(validate_event_types(&types, WeightPolicy::Normalize).is_ok());
    }

    #[test]
    fn test_validate_device_counts() {
        let mut devices = BTreeMap::new();
        assert!(validate_device_counts(&devices).is_err());

        devices.insert("cameras".to_string(), 0);
        assert!(validate_device_counts(&devices).is_err());

        devices.insert("door_sensors".to_string(), 4);
        assert!(validate_device_counts(&devices).is_ok());
    }
}
