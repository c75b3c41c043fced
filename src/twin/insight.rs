use serde::{Deserialize, Serialize};

use crate::twin::simulator::RiskPrediction;
use crate::twin::state::SimulationState;

const CHILD_MAX_AGE: u32 = 16;
const SENIOR_MIN_AGE: u32 = 65;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum AgeGroup {
    Child,
    #[default]
    Adult,
    Senior,
}

impl AgeGroup {
    pub fn from_age(age: u32) -> Self {
        if age <= CHILD_MAX_AGE {
            AgeGroup::Child
        } else if age >= SENIOR_MIN_AGE {
            AgeGroup::Senior
        } else {
            AgeGroup::Adult
        }
    }

    pub fn simulator_title(&self) -> &'static str {
        match self {
            AgeGroup::Child => "Health Explorer 🚀",
            AgeGroup::Senior => "Health Planner",
            AgeGroup::Adult => "Digital Twin - \"What If\" Simulator",
        }
    }

    pub fn simulator_description(&self) -> &'static str {
        match self {
            AgeGroup::Child => "See how healthy choices can make you stronger!",
            AgeGroup::Senior => "Explore how lifestyle changes could affect your health",
            AgeGroup::Adult => "Explore how lifestyle changes could impact your future health outcomes",
        }
    }
}

/// Habits in `state` that improve on the current defaults, phrased for display.
pub fn improvements(state: &SimulationState) -> Vec<String> {
    let current = SimulationState::default();
    let mut improvements = Vec::new();

    if state.steps > current.steps {
        improvements.push(format!("{} extra steps", state.steps - current.steps));
    }
    if state.sleep_hours > current.sleep_hours {
        improvements.push(format!(
            "{:.1} more hours of sleep",
            state.sleep_hours - current.sleep_hours
        ));
    }
    if state.water_glasses > current.water_glasses {
        improvements.push(format!(
            "{} more glasses of water",
            state.water_glasses - current.water_glasses
        ));
    }
    if state.exercise_hours_per_week > current.exercise_hours_per_week {
        improvements.push(format!(
            "{} more hours of exercise weekly",
            state.exercise_hours_per_week - current.exercise_hours_per_week
        ));
    }

    improvements
}

/// One-line summary of a what-if scenario, worded for the patient's age group.
pub fn generate_insight(
    state: &SimulationState,
    prediction: &RiskPrediction,
    age_group: AgeGroup,
) -> String {
    let improvements = improvements(state);
    if improvements.is_empty() {
        return "Try adjusting the sliders above to see potential health improvements!".to_string();
    }

    let list = improvements.join(", ");
    match age_group {
        AgeGroup::Child => format!("Wow! If you {list}, you could be even healthier! 🌟"),
        AgeGroup::Senior => format!("These changes could help: {list}"),
        AgeGroup::Adult => format!(
            "By incorporating {list}, you could potentially reduce your diabetes risk by {}%.",
            prediction.risk_reduction.abs()
        ),
    }
}
