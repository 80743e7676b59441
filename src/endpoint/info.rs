//! `GET /info` probe implementation.

use super::ProbeError;
use serde::{Deserialize, Deserializer};

/// Model metadata reported by the inference server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub model_name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub model_version: String,
    /// Accuracy as a percentage.
    #[serde(default)]
    pub accuracy: f64,
}

// Some servers report the version as a bare number (e.g. 2).
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Version {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Version::deserialize(deserializer)? {
        Version::Text(s) => s,
        Version::Number(n) => n.to_string(),
    })
}

/// Join an endpoint base URL and a route, dropping any trailing slash on the base.
pub fn endpoint_url(base: &str, route: &str) -> String {
    format!("{}/{}", base.trim().trim_end_matches('/'), route)
}

/// Run the info probe against the given base URL.
pub async fn run_info_probe(http: &reqwest::Client, base_url: &str) -> Result<ModelInfo, ProbeError> {
    if base_url.trim().is_empty() {
        return Err(ProbeError::EmptyUrl);
    }
    let url = endpoint_url(base_url, "info");

    let response = http
        .get(&url)
        .send()
        .await
        .map_err(|e| ProbeError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProbeError::Status(status.as_u16()));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| ProbeError::Network(e.to_string()))?;

    serde_json::from_slice(&body).map_err(|e| ProbeError::Parse(e.to_string()))
}
