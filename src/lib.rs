pub mod error;
pub mod glucose;
pub mod scoring;
pub mod settings;
pub mod twin;
mod utils;

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use glucose::{extract_features, GlucoseSeriesGenerator};
use scoring::{
    build_score_request, DiabetesBaselineFeatures, GlucoseRealtimeFeatures, ScoreClient,
    ScoreResponse,
};
use settings::{SettingsStore, SimulatorSettings};
use twin::{generate_insight, LifestyleRiskSimulator, RiskPrediction, SimulationState};

pub use error::ValidationError;

const DEFAULT_BASE_GLUCOSE: f64 = 100.0;
/// Bearer token attached to score submissions when set
pub const API_TOKEN_ENV: &str = "NURTURE_API_TOKEN";

/// Everything the patient dashboard renders for one simulated day.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub title: &'static str,
    pub description: &'static str,
    pub glucose: GlucoseRealtimeFeatures,
    pub simulation: SimulationState,
    pub prediction: RiskPrediction,
    pub insight: String,
}

/// Build a snapshot from settings, a baseline glucose reading and a what-if state.
pub fn build_snapshot(
    settings: &SimulatorSettings,
    base_glucose: f64,
    simulation: SimulationState,
) -> Result<DashboardSnapshot> {
    let mut generator = generator_for(settings);
    let sequence = generator.generate(base_glucose)?;
    let glucose = extract_features(&sequence, generator.config())?;

    let simulator = LifestyleRiskSimulator::new(settings.baseline_risk)?;
    let prediction = simulator.predict(&simulation)?;
    let insight = generate_insight(&simulation, &prediction, settings.age_group);

    Ok(DashboardSnapshot {
        title: settings.age_group.simulator_title(),
        description: settings.age_group.simulator_description(),
        glucose,
        simulation,
        prediction,
        insight,
    })
}

fn generator_for(settings: &SimulatorSettings) -> GlucoseSeriesGenerator {
    match settings.generator_seed {
        Some(seed) => GlucoseSeriesGenerator::from_seed(seed),
        None => GlucoseSeriesGenerator::from_entropy(),
    }
}

/// Client for the configured API, carrying `token` when one is supplied.
pub fn score_client(settings: &SimulatorSettings, token: Option<String>) -> ScoreClient {
    let client = ScoreClient::new(settings.api_base_url.clone());
    match token {
        Some(token) => client.with_token(token),
        None => client,
    }
}

/// Synthesise the patient's glucose day and submit it for scoring.
pub async fn submit_score(
    client: &ScoreClient,
    settings: &SimulatorSettings,
    patient_id: i64,
    baseline: DiabetesBaselineFeatures,
) -> Result<ScoreResponse> {
    let mut generator = generator_for(settings);
    let request = build_score_request(patient_id, baseline, &mut generator)?;
    client.score(&request).await
}

/// Command-line entry: `nurture-coach [settings.json] [base_glucose] [patient_id]`.
///
/// With a patient id the synthesised day is also submitted to the scoring API.
pub fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Nurture Coach simulator starting up...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => SettingsStore::new(PathBuf::from(path))?.get()?,
        None => SimulatorSettings::default(),
    };
    let base_glucose = match args.next() {
        Some(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("Invalid base glucose '{}'", raw))?,
        None => DEFAULT_BASE_GLUCOSE,
    };

    let snapshot = build_snapshot(&settings, base_glucose, SimulationState::default())?;
    log::info!(
        "Predicted risk {}% from baseline {}%",
        snapshot.prediction.predicted_risk,
        snapshot.prediction.baseline_risk
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    if let Some(raw) = args.next() {
        let patient_id = raw
            .parse::<i64>()
            .with_context(|| format!("Invalid patient id '{}'", raw))?;
        let client = score_client(&settings, std::env::var(API_TOKEN_ENV).ok());
        let baseline = DiabetesBaselineFeatures {
            blood_glucose_level: base_glucose,
            ..DiabetesBaselineFeatures::default()
        };

        let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
        let response = runtime.block_on(submit_score(&client, &settings, patient_id, baseline))?;
        log::info!(
            "Scoring API: {} (patient {})",
            response.database_status,
            response.patient_id
        );
        println!("{}", serde_json::to_string_pretty(&response)?);
    }

    Ok(())
}
