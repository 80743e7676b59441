//! Wire body for `POST /predict`.

use serde::{Serialize, Serializer};

/// Validated, numerically typed vitals plus the raw symptom text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRequest {
    #[serde(rename = "Age", serialize_with = "serialize_number")]
    pub age: f64,
    #[serde(rename = "SpO2", serialize_with = "serialize_number")]
    pub spo2: f64,
    #[serde(rename = "Heart Rate (BPM)", serialize_with = "serialize_number")]
    pub heart_rate: f64,
    #[serde(rename = "Blood Pressure (Systolic)", serialize_with = "serialize_number")]
    pub blood_pressure: f64,
    #[serde(rename = "Symptoms")]
    pub symptoms: String,
}

// Whole numbers go out without a fractional part (45, not 45.0).
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
