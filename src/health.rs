use std::fmt;

use serde::{Deserialize, Serialize};

const SURVIVAL_WEIGHT: f64 = 0.30;
const ORGANISM_HEALTH_WEIGHT: f64 = 0.25;
const POLLUTION_WEIGHT: f64 = 0.25;
const FIELD_HEALTH_WEIGHT: f64 = 0.20;

const HEALTHY_FLOOR: f64 = 75.0;
const STRESSED_FLOOR: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EcosystemState {
    Healthy,
    Stressed,
    Critical,
}

impl fmt::Display for EcosystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EcosystemState::Healthy => "healthy",
            EcosystemState::Stressed => "stressed",
            EcosystemState::Critical => "critical",
        };
        f.write_str(name)
    }
}

/// Externally gathered metrics feeding one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct HealthInputs {
    pub live_count: usize,
    pub total_count: usize,
    /// Mean health of the living organisms, 0-100.
    pub mean_organism_health: f64,
    /// Mean active pollution across the water cells, 0-100.
    pub active_pollution_pct: f64,
    /// Inverse of the mean residue across the water cells, 0-100.
    pub field_health_pct: f64,
}

pub type StateListener = Box<dyn FnMut(EcosystemState, EcosystemState, f64)>;

/// Weighted health score plus the three-state machine derived from it.
///
/// One instance lives for a whole run: `calculate_health` then
/// `update_state` each tick. The state is recomputed fresh from the score
/// every call, with no smoothing, so any state can move to any other in a
/// single tick. The registered listener fires exactly when the state
/// changes; registering again replaces the previous listener.
pub struct EcosystemHealth {
    score: f64,
    current: EcosystemState,
    previous: EcosystemState,
    listener: Option<StateListener>,
}

impl EcosystemHealth {
    pub fn new() -> Self {
        Self {
            score: 100.0,
            current: EcosystemState::Healthy,
            previous: EcosystemState::Healthy,
            listener: None,
        }
    }

    /// Weighted combination of survival rate (30%), organism health (25%),
    /// inverted active pollution (25%) and field health (20%). An empty
    /// population counts as zero survival rather than a division fault.
    /// The score is stored for the next `update_state` and returned.
    pub fn calculate_health(&mut self, inputs: &HealthInputs) -> f64 {
        let survival_rate = if inputs.total_count > 0 {
            inputs.live_count as f64 / inputs.total_count as f64 * 100.0
        } else {
            0.0
        };
        self.score = survival_rate * SURVIVAL_WEIGHT
            + inputs.mean_organism_health * ORGANISM_HEALTH_WEIGHT
            + (100.0 - inputs.active_pollution_pct).max(0.0) * POLLUTION_WEIGHT
            + inputs.field_health_pct * FIELD_HEALTH_WEIGHT;
        self.score
    }

    /// Re-derive the state from the stored score and notify the listener if
    /// it changed: >= 75 healthy, >= 40 stressed, below that critical.
    pub fn update_state(&mut self) {
        self.previous = self.current;
        self.current = if self.score >= HEALTHY_FLOOR {
            EcosystemState::Healthy
        } else if self.score >= STRESSED_FLOOR {
            EcosystemState::Stressed
        } else {
            EcosystemState::Critical
        };

        if self.current != self.previous {
            tracing::debug!(
                from = %self.previous,
                to = %self.current,
                score = self.score,
                "ecosystem state transition"
            );
            if let Some(listener) = self.listener.as_mut() {
                listener(self.current, self.previous, self.score);
            }
        }
    }

    /// Register the single transition listener. Last registration wins.
    pub fn on_state_change(
        &mut self,
        listener: impl FnMut(EcosystemState, EcosystemState, f64) + 'static,
    ) {
        self.listener = Some(Box::new(listener));
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn state(&self) -> EcosystemState {
        self.current
    }

    /// State as of the previous `update_state` call.
    pub fn previous_state(&self) -> EcosystemState {
        self.previous
    }
}

impl Default for EcosystemHealth {
    fn default() -> Self {
        Self::new()
    }
}
