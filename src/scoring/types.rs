use serde::{Deserialize, Serialize};

/// Body of `POST /score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub patient_id: i64,
    pub diabetes_baseline_features: DiabetesBaselineFeatures,
    pub glucose_realtime_features: GlucoseRealtimeFeatures,
    pub hypertension_features: HypertensionFeatures,
    pub heart_disease_features: HeartDiseaseFeatures,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiabetesBaselineFeatures {
    pub gender: String,
    pub age: u32,
    pub hypertension: u8,
    pub heart_disease: u8,
    pub smoking_history: String,
    pub bmi: f64,
    #[serde(rename = "HbA1c_level")]
    pub hba1c_level: f64,
    pub blood_glucose_level: f64,
}

impl Default for DiabetesBaselineFeatures {
    fn default() -> Self {
        Self {
            gender: "Male".into(),
            age: 35,
            hypertension: 0,
            heart_disease: 0,
            smoking_history: "never".into(),
            bmi: 25.0,
            hba1c_level: 5.5,
            blood_glucose_level: 100.0,
        }
    }
}

/// Aggregates of a glucose day plus the raw sequence they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlucoseRealtimeFeatures {
    pub mean_gluc_weak: f64,
    pub std_gluc: f64,
    pub cov: f64,
    pub iqr: f64,
    pub mean_slope: f64,
    pub max_slope: f64,
    pub skew: f64,
    pub kurtosis: f64,
    pub pct_above_140: f64,
    pub circadian_diff: f64,
    pub samp_entropy: f64,
    pub median_rise: f64,
    pub short_spikes: u32,
    pub sustained_spikes: u32,
    pub glucose_sequence: Vec<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypertensionFeatures {
    pub placeholder_feature_1: f64,
    pub placeholder_feature_2: i64,
}

impl Default for HypertensionFeatures {
    fn default() -> Self {
        Self {
            placeholder_feature_1: 1.0,
            placeholder_feature_2: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartDiseaseFeatures {
    pub placeholder_feature_a: f64,
    pub placeholder_feature_b: String,
}

impl Default for HeartDiseaseFeatures {
    fn default() -> Self {
        Self {
            placeholder_feature_a: 1.0,
            placeholder_feature_b: "normal".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub database_status: String,
    pub patient_id: i64,
    pub risk_profile: RiskProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub diabetes_baseline_risk: DiabetesBaselineRisk,
    pub glucose_realtime_risk: GlucoseRealtimeRisk,
    pub hypertension_risk: HypertensionRisk,
    pub heart_disease_risk: HeartDiseaseRisk,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskLabel {
    Low,
    Medium,
    High,
}

impl RiskLabel {
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 0.7 {
            RiskLabel::High
        } else if probability >= 0.4 {
            RiskLabel::Medium
        } else {
            RiskLabel::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiabetesBaselineRisk {
    pub risk_probability: f64,
    pub risk_label: RiskLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlucoseRealtimeRisk {
    pub event_risk: f64,
    pub glucose_variability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypertensionRisk {
    pub hypertension_risk: f64,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartDiseaseRisk {
    pub heart_disease_risk: f64,
    #[serde(default)]
    pub status: Option<String>,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub detail: Option<String>,
}
