pub mod client;
pub mod types;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::{build_score_request, ScoreClient, DEFAULT_API_BASE_URL};
pub use types::{
    DiabetesBaselineFeatures, GlucoseRealtimeFeatures, RiskLabel, RiskProfile, ScoreRequest,
    ScoreResponse,
};
