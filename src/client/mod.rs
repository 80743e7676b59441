//! Analysis client for the inference server's `POST /predict` route.

use crate::endpoint::endpoint_url;
use crate::report::AnalysisResult;
use crate::vitals::{AnalysisRequest, ValidationError};

use thiserror::Error;

/// Every way an analysis can fail. `Display` is the user-facing message.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed to parse server response")]
    ResponseParse,
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
}

/// Sends validated requests to a confirmed endpoint.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
}

impl AnalysisClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Perform exactly one `POST {endpoint}/predict`. No retries.
    pub async fn analyze(
        &self,
        endpoint: &str,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        let url = endpoint_url(endpoint, "predict");
        tracing::debug!("Request body: {:?}", request);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        interpret_response(status, &body)
    }
}

/// Turn a raw `/predict` response into a result.
///
/// The body is parsed before the status is looked at: an unparsable body is
/// a parse error even on 200, and a server-supplied `error` message wins over
/// the status line.
pub fn interpret_response(
    status: reqwest::StatusCode,
    body: &[u8],
) -> Result<AnalysisResult, AnalysisError> {
    let parsed: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| AnalysisError::ResponseParse)?;

    if !status.is_success() {
        let message = match parsed.get("error").and_then(|e| e.as_str()) {
            Some(error) if !error.is_empty() => error.to_string(),
            _ => match status.canonical_reason() {
                Some(reason) => format!("Server returned {}: {}", status.as_u16(), reason),
                None => format!("Server returned {}", status.as_u16()),
            },
        };
        tracing::error!("API Error: status={} error={:?}", status.as_u16(), parsed.get("error"));
        return Err(AnalysisError::Server {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_value(parsed).map_err(|e| {
        tracing::error!("Unexpected analysis result shape: {}", e);
        AnalysisError::ResponseParse
    })
}
