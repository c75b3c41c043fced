use anyhow::{anyhow, Context, Result};
use rand::Rng;

use crate::glucose::{extract_features, GlucoseSeriesGenerator};
use crate::scoring::types::{
    ApiErrorBody, DiabetesBaselineFeatures, HeartDiseaseFeatures, HypertensionFeatures,
    ScoreRequest, ScoreResponse,
};
use crate::{log_info, log_warn};

const ENABLE_LOGS: bool = true;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Assemble a score request, synthesising the glucose day from the patient's
/// single blood glucose reading.
pub fn build_score_request<R: Rng>(
    patient_id: i64,
    baseline: DiabetesBaselineFeatures,
    generator: &mut GlucoseSeriesGenerator<R>,
) -> Result<ScoreRequest> {
    let sequence = generator
        .generate(baseline.blood_glucose_level)
        .context("Failed to synthesise glucose sequence")?;
    let glucose_realtime_features = extract_features(&sequence, generator.config())
        .context("Failed to aggregate glucose features")?;

    Ok(ScoreRequest {
        patient_id,
        diabetes_baseline_features: baseline,
        glucose_realtime_features,
        hypertension_features: HypertensionFeatures::default(),
        heart_disease_features: HeartDiseaseFeatures::default(),
    })
}

/// Thin client for the remote scoring endpoint.
#[derive(Debug, Clone)]
pub struct ScoreClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ScoreClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    /// Use a preconfigured `reqwest::Client` (proxy, timeouts, TLS).
    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach a bearer token obtained elsewhere.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn score_url(&self) -> String {
        format!("{}/score", self.base_url)
    }

    pub async fn score(&self, request: &ScoreRequest) -> Result<ScoreResponse> {
        let url = self.score_url();
        let mut builder = self.http.post(&url).json(request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        log_info!("Submitting score request for patient {}", request.patient_id);
        let response = builder
            .send()
            .await
            .with_context(|| format!("Failed to reach scoring API at {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .unwrap_or_else(|| "Failed to get score".to_string());
            log_warn!("Scoring API returned {}: {}", status, detail);
            return Err(anyhow!("{} ({})", detail, status));
        }

        response
            .json::<ScoreResponse>()
            .await
            .context("Failed to decode score response")
    }
}

impl Default for ScoreClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::test_server::{direct_http_client, respond_once};

    #[test]
    fn request_carries_generated_sequence_and_features() {
        let mut generator = GlucoseSeriesGenerator::from_seed(5);
        let baseline = DiabetesBaselineFeatures {
            blood_glucose_level: 140.0,
            ..DiabetesBaselineFeatures::default()
        };
        let request = build_score_request(7, baseline, &mut generator).unwrap();

        let features = &request.glucose_realtime_features;
        assert_eq!(request.patient_id, 7);
        assert_eq!(features.glucose_sequence.len(), 96);
        assert!(features.mean_gluc_weak > 130.0);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["glucose_realtime_features"]["glucose_sequence"].as_array().unwrap().len(), 96);
        assert_eq!(json["heart_disease_features"]["placeholder_feature_b"], "normal");
    }

    #[test]
    fn non_finite_glucose_reading_fails_before_any_request() {
        let mut generator = GlucoseSeriesGenerator::from_seed(5);
        let baseline = DiabetesBaselineFeatures {
            blood_glucose_level: f64::NAN,
            ..DiabetesBaselineFeatures::default()
        };
        let err = build_score_request(1, baseline, &mut generator).unwrap_err();
        assert!(format!("{:#}", err).contains("base_glucose"));
    }

    #[test]
    fn score_url_ignores_trailing_slash() {
        assert_eq!(ScoreClient::new("http://api.local/").score_url(), "http://api.local/score");
        assert_eq!(ScoreClient::default().score_url(), "http://127.0.0.1:8000/score");
    }

    fn sample_request() -> ScoreRequest {
        let mut generator = GlucoseSeriesGenerator::from_seed(1);
        build_score_request(1, DiabetesBaselineFeatures::default(), &mut generator).unwrap()
    }

    #[tokio::test]
    async fn unreachable_api_surfaces_context() {
        // Bind then drop so the port is known to have no listener.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = ScoreClient::with_http_client(direct_http_client(), base_url).with_token("token");
        let err = client.score(&sample_request()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to reach scoring API"));
    }

    #[tokio::test]
    async fn error_detail_is_surfaced() {
        let (base_url, server) =
            respond_once("400 Bad Request", "application/json", r#"{"detail":"bad input"}"#).await;
        let client = ScoreClient::with_http_client(direct_http_client(), base_url).with_token("secret");

        let err = client.score(&sample_request()).await.unwrap_err();
        assert!(err.to_string().contains("bad input"), "got: {err}");
        assert!(err.to_string().contains("400"));

        let raw_request = server.await.unwrap();
        assert!(raw_request.starts_with("POST /score "));
        assert!(raw_request.to_ascii_lowercase().contains("authorization: bearer secret"));
        assert!(raw_request.contains("\"glucose_sequence\""));
    }

    #[tokio::test]
    async fn non_json_error_body_falls_back_to_generic_message() {
        let (base_url, server) =
            respond_once("500 Internal Server Error", "text/plain", "upstream exploded").await;
        let client = ScoreClient::with_http_client(direct_http_client(), base_url);

        let err = client.score(&sample_request()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to get score"), "got: {err}");
        assert!(err.to_string().contains("500"));

        let raw_request = server.await.unwrap();
        assert!(!raw_request.to_ascii_lowercase().contains("authorization:"));
    }

    #[tokio::test]
    async fn successful_response_is_decoded() {
        let body = r#"{"database_status":"Data saved successfully","patient_id":1,"risk_profile":{"diabetes_baseline_risk":{"risk_probability":0.3,"risk_label":"Low"},"glucose_realtime_risk":{"event_risk":0.1,"glucose_variability":12.5},"hypertension_risk":{"hypertension_risk":0.5,"status":"mock_prediction"},"heart_disease_risk":{"heart_disease_risk":0.25,"status":"mock_prediction"}}}"#;
        let (base_url, server) = respond_once("200 OK", "application/json", body).await;
        let client = ScoreClient::with_http_client(direct_http_client(), base_url);

        let response = client.score(&sample_request()).await.unwrap();
        assert_eq!(response.patient_id, 1);
        assert_eq!(response.risk_profile.glucose_realtime_risk.glucose_variability, 12.5);
        server.await.unwrap();
    }
}
