use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ValidationError};
use crate::twin::state::SimulationState;

pub const DEFAULT_BASELINE_RISK: f64 = 65.0;
pub const MIN_RISK: f64 = 10.0;
pub const MAX_RISK: f64 = 90.0;

/// Linear effect of one habit: `((value - reference) / step) * weight`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Factor {
    reference: f64,
    step: f64,
    weight: f64,
}

impl Factor {
    fn impact(&self, value: f64) -> f64 {
        ((value - self.reference) / self.step) * self.weight
    }
}

const STEPS: Factor = Factor {
    reference: 8_500.0,
    step: 1_500.0,
    weight: -5.0,
};
const SLEEP: Factor = Factor {
    reference: 7.2,
    step: 0.8,
    weight: -4.0,
};
const WATER: Factor = Factor {
    reference: 6.0,
    step: 2.0,
    weight: -3.0,
};
const EXERCISE: Factor = Factor {
    reference: 2.0,
    step: 2.0,
    weight: -6.0,
};

/// Per-habit contribution to the risk delta, in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorImpacts {
    pub steps: f64,
    pub sleep: f64,
    pub water: f64,
    pub exercise: f64,
}

impl FactorImpacts {
    pub fn total(&self) -> f64 {
        self.steps + self.sleep + self.water + self.exercise
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskPrediction {
    pub baseline_risk: f64,
    /// Always within [MIN_RISK, MAX_RISK]
    pub predicted_risk: i32,
    pub risk_delta: f64,
    pub risk_reduction: f64,
    pub impacts: FactorImpacts,
}

/// Heuristic what-if model over lifestyle habits.
///
/// Additive and linear per habit, with no interaction terms; more of any habit
/// never raises the prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifestyleRiskSimulator {
    baseline_risk: f64,
}

impl Default for LifestyleRiskSimulator {
    fn default() -> Self {
        Self {
            baseline_risk: DEFAULT_BASELINE_RISK,
        }
    }
}

impl LifestyleRiskSimulator {
    pub fn new(baseline_risk: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            baseline_risk: ensure_finite("baseline_risk", baseline_risk)?,
        })
    }

    pub fn baseline_risk(&self) -> f64 {
        self.baseline_risk
    }

    pub fn impacts(&self, state: &SimulationState) -> Result<FactorImpacts, ValidationError> {
        let sleep = ensure_finite("sleep_hours", state.sleep_hours)?;
        let exercise = ensure_finite("exercise_hours_per_week", state.exercise_hours_per_week)?;

        Ok(FactorImpacts {
            steps: STEPS.impact(state.steps as f64),
            sleep: SLEEP.impact(sleep),
            water: WATER.impact(state.water_glasses as f64),
            exercise: EXERCISE.impact(exercise),
        })
    }

    pub fn predict(&self, state: &SimulationState) -> Result<RiskPrediction, ValidationError> {
        let impacts = self.impacts(state)?;
        let risk_delta = impacts.total();
        let predicted_risk = (self.baseline_risk + risk_delta).clamp(MIN_RISK, MAX_RISK).round() as i32;

        Ok(RiskPrediction {
            baseline_risk: self.baseline_risk,
            predicted_risk,
            risk_delta,
            risk_reduction: self.baseline_risk - predicted_risk as f64,
            impacts,
        })
    }
}
