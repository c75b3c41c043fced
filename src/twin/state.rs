use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const STEPS_RANGE: RangeInclusive<u32> = 5_000..=15_000;
pub const SLEEP_HOURS_RANGE: RangeInclusive<f64> = 5.0..=10.0;
pub const WATER_GLASSES_RANGE: RangeInclusive<u32> = 2..=12;
pub const EXERCISE_HOURS_RANGE: RangeInclusive<f64> = 0.0..=8.0;

/// Lifestyle parameters behind the what-if sliders.
///
/// Defaults are the patient's current habits and double as the reference
/// midpoints of the risk model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationState {
    pub steps: u32,
    pub sleep_hours: f64,
    pub water_glasses: u32,
    pub exercise_hours_per_week: f64,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            steps: 8_500,
            sleep_hours: 7.2,
            water_glasses: 6,
            exercise_hours_per_week: 2.0,
        }
    }
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Copy with every field pinned into its slider domain.
    pub fn clamped(&self) -> Self {
        Self {
            steps: self.steps.clamp(*STEPS_RANGE.start(), *STEPS_RANGE.end()),
            sleep_hours: self
                .sleep_hours
                .clamp(*SLEEP_HOURS_RANGE.start(), *SLEEP_HOURS_RANGE.end()),
            water_glasses: self
                .water_glasses
                .clamp(*WATER_GLASSES_RANGE.start(), *WATER_GLASSES_RANGE.end()),
            exercise_hours_per_week: self
                .exercise_hours_per_week
                .clamp(*EXERCISE_HOURS_RANGE.start(), *EXERCISE_HOURS_RANGE.end()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_current_habits() {
        let mut state = SimulationState {
            steps: 12_000,
            sleep_hours: 9.0,
            water_glasses: 10,
            exercise_hours_per_week: 5.5,
        };
        state.reset();
        assert_eq!(state, SimulationState::default());
        assert_eq!(state.steps, 8_500);
        assert_eq!(state.sleep_hours, 7.2);
    }

    #[test]
    fn clamped_pins_out_of_range_values() {
        let wild = SimulationState {
            steps: 100_000,
            sleep_hours: 2.0,
            water_glasses: 0,
            exercise_hours_per_week: 20.0,
        };
        assert_eq!(
            wild.clamped(),
            SimulationState {
                steps: 15_000,
                sleep_hours: 5.0,
                water_glasses: 2,
                exercise_hours_per_week: 8.0,
            }
        );
        assert_eq!(SimulationState::default().clamped(), SimulationState::default());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(SimulationState::default()).unwrap();
        assert_eq!(json["sleepHours"], 7.2);
        assert_eq!(json["exerciseHoursPerWeek"], 2.0);
    }
}
