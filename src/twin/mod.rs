pub mod insight;
pub mod simulator;
pub mod state;

pub use insight::{generate_insight, AgeGroup};
pub use simulator::{FactorImpacts, LifestyleRiskSimulator, RiskPrediction, DEFAULT_BASELINE_RISK};
pub use state::SimulationState;
