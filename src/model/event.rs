//! Stochastic sensor-event generator.
//!
//! Events are drawn from a fixed categorical distribution over the configured
//! event types. Each draw consumes exactly one `f64` from the caller's
//! generator: the uniform value is scaled by the total weight and located on
//! the cumulative distribution with a linear scan in configuration order.

use rand::Rng;

use crate::config::{EventTypeSpec, ValidationError};

/// Event types that are pre-summarized at the edge instead of sent in full
pub const URGENT_EVENT_TYPES: [&str; 2] = ["motion_event", "alarm_trigger"];

/// Whether events of this type are urgent
pub fn is_urgent(type_name: &str) -> bool {
    URGENT_EVENT_TYPES.contains(&type_name)
}

/// A single generated sensor event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event<'a> {
    /// Position of the event type in the configured collection
    pub type_index: usize,
    pub type_name: &'a str,
    pub data_kb: f64,
    pub urgency: bool,
}

/// Weighted categorical generator over a fixed set of event types
#[derive(Debug, Clone)]
pub struct EventModel {
    types: Vec<EventTypeSpec>,
    urgent: Vec<bool>,
    cumulative: Vec<f64>,
    total_weight: f64,
}

impl EventModel {
    /// Build a generator for the given event types
    ///
    /// Fails if the collection is empty or any size or probability is not a
    /// finite positive number. Probabilities are used as relative weights;
    /// whether they must sum to 1 is decided by configuration validation.
    pub fn new(types: &[EventTypeSpec]) -> Result<Self, ValidationError> {
        if types.is_empty() {
            return Err(ValidationError::InvalidEventTypes(
                "event model requires at least one event type".to_string(),
            ));
        }

        let mut cumulative = Vec::with_capacity(types.len());
        let mut running = 0.0;
        for spec in types {
            if !spec.probability.is_finite() || spec.probability <= 0.0 {
                return Err(ValidationError::InvalidEventTypes(format!(
                    "probability of '{}' must be positive (got {})",
                    spec.name, spec.probability
                )));
            }
            if !spec.size_kb.is_finite() || spec.size_kb <= 0.0 {
                return Err(ValidationError::InvalidEventTypes(format!(
                    "size_kb of '{}' must be positive (got {})",
                    spec.name, spec.size_kb
                )));
            }
            running += spec.probability;
            cumulative.push(running);
        }

        Ok(Self {
            urgent: types.iter().map(|spec| is_urgent(&spec.name)).collect(),
            types: types.to_vec(),
            cumulative,
            total_weight: running,
        })
    }

    /// Draw one event
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Event<'_> {
        let target = rng.gen::<f64>() * self.total_weight;
        // Rounding can leave `target` at the very top of the last bucket
        let index = self
            .cumulative
            .iter()
            .position(|&edge| target < edge)
            .unwrap_or(self.cumulative.len() - 1);

        let spec = &self.types[index];
        Event {
            type_index: index,
            type_name: &spec.name,
            data_kb: spec.size_kb,
            urgency: self.urgent[index],
        }
    }

    /// Event types in configuration order
    pub fn types(&self) -> &[EventTypeSpec] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
