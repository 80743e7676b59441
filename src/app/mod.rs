//! Orchestrating state for one analysis session.
//!
//! [`AppState`] is the single owner of the form values, the current result,
//! the current error and the endpoint status. Every change goes through one
//! of its transition methods.
//!
//! Network work is split into begin / send / complete so the in-flight flag
//! is set before the suspend point and cleared after it. The flag is
//! advisory: a second submission is not refused, and whichever completion
//! is applied last determines the visible state.

use crate::client::{AnalysisClient, AnalysisError};
use crate::config::ClientConfig;
use crate::endpoint::{EndpointState, ModelInfo, ProbeError, ProbeTicket, ServerEndpointManager};
use crate::report::{render, AnalysisResult, Report};
use crate::vitals::{AnalysisRequest, VitalsField, VitalsForm, VitalsInput};

/// A validated submission bound to the endpoint confirmed at submit time.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisTicket {
    endpoint: String,
    request: AnalysisRequest,
}

impl AnalysisTicket {
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn request(&self) -> &AnalysisRequest {
        &self.request
    }

    pub async fn send(&self, client: &AnalysisClient) -> Result<AnalysisResult, AnalysisError> {
        client.analyze(&self.endpoint, &self.request).await
    }
}

/// UI state for the analysis workflow.
#[derive(Debug, Clone)]
pub struct AppState {
    form: VitalsForm,
    result: Option<AnalysisResult>,
    error: Option<String>,
    endpoint: ServerEndpointManager,
    analyzing: bool,
}

impl AppState {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            form: VitalsForm::new(),
            result: None,
            error: None,
            endpoint: ServerEndpointManager::new(config.server_url.clone()),
            analyzing: false,
        }
    }

    pub fn input(&self) -> &VitalsInput {
        self.form.input()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn report(&self) -> Option<Report> {
        self.result.as_ref().map(render)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn endpoint(&self) -> &ServerEndpointManager {
        &self.endpoint
    }

    pub fn endpoint_state(&self) -> &EndpointState {
        self.endpoint.state()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    /// Whether the analyze control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.analyzing
    }

    // --- Form ---

    /// Edit one field. Clears any current error.
    pub fn edit_field(&mut self, field: VitalsField, value: impl Into<String>) {
        self.form.set_field(field, value);
        self.error = None;
    }

    /// Reset the form, the result and the error together.
    pub fn clear(&mut self) {
        self.form.clear();
        self.result = None;
        self.error = None;
    }

    // --- Analysis ---

    /// Start a submission.
    ///
    /// Clears the previous result and error and raises the in-flight flag.
    /// On a validation failure the error is set, the flag drops again and no
    /// ticket is returned, so nothing goes over the network.
    pub fn begin_analysis(&mut self) -> Option<AnalysisTicket> {
        self.analyzing = true;
        self.result = None;
        self.error = None;

        match self.form.validate() {
            Ok(request) => Some(AnalysisTicket {
                endpoint: self.endpoint.confirmed().to_string(),
                request,
            }),
            Err(e) => {
                tracing::warn!("Validation failed: {}", e);
                self.error = Some(e.to_string());
                self.analyzing = false;
                None
            }
        }
    }

    /// Apply the outcome of a submission and drop the in-flight flag.
    pub fn complete_analysis(&mut self, outcome: Result<AnalysisResult, AnalysisError>) {
        self.analyzing = false;
        match outcome {
            Ok(result) => {
                tracing::info!("Analysis complete: {}", result.disease());
                self.result = Some(result);
                self.error = None;
            }
            Err(e) => {
                tracing::error!("Error analyzing data: {}", e);
                self.result = None;
                self.error = Some(e.to_string());
            }
        }
    }

    /// Validate, submit and apply in one step.
    pub async fn analyze(&mut self, client: &AnalysisClient) {
        if let Some(ticket) = self.begin_analysis() {
            let outcome = ticket.send(client).await;
            self.complete_analysis(outcome);
        }
    }

    // --- Endpoint ---

    /// Edit the candidate server URL.
    pub fn set_server_url(&mut self, url: impl Into<String>) {
        self.endpoint.set_candidate(url);
    }

    pub fn begin_connection_test(&mut self) -> ProbeTicket {
        self.endpoint.begin_probe()
    }

    pub fn complete_connection_test(
        &mut self,
        ticket: ProbeTicket,
        outcome: Result<ModelInfo, ProbeError>,
    ) {
        self.endpoint.complete_probe(ticket, outcome);
    }

    /// Probe the candidate URL and apply the outcome.
    pub async fn test_connection(&mut self, http: &reqwest::Client) -> &EndpointState {
        self.endpoint.probe(http).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::{sample_body, sample_result};
    use crate::report::Severity;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn state_for(url: &str) -> AppState {
        AppState::new(&ClientConfig {
            server_url: url.to_string(),
            ..Default::default()
        })
    }

    fn fill(state: &mut AppState) {
        state.edit_field(VitalsField::Age, "45");
        state.edit_field(VitalsField::SpO2, "95");
        state.edit_field(VitalsField::HeartRate, "80");
        state.edit_field(VitalsField::BloodPressure, "120");
        state.edit_field(VitalsField::Symptoms, "cough, fever");
    }

    #[tokio::test]
    async fn test_full_workflow() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model_name": "RespNet", "model_version": "1.2", "accuracy": 91
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&server)
            .await;

        let http = reqwest::Client::new();
        let client = AnalysisClient::new(http.clone());
        let mut state = state_for("http://localhost:5000");

        state.set_server_url(server.uri());
        assert!(matches!(state.test_connection(&http).await, EndpointState::Success(_)));
        assert_eq!(state.endpoint().confirmed(), server.uri());

        fill(&mut state);
        state.analyze(&client).await;

        assert!(!state.is_analyzing());
        assert_eq!(state.error(), None);
        assert_eq!(state.result(), Some(&sample_result()));
        let report = state.report().unwrap();
        assert_eq!(report.severity, Severity::High);
    }

    #[tokio::test]
    async fn test_validation_failure_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(0)
            .mount(&server)
            .await;

        let client = AnalysisClient::new(reqwest::Client::new());
        let mut state = state_for(&server.uri());
        fill(&mut state);
        state.edit_field(VitalsField::SpO2, "");

        state.analyze(&client).await;
        assert_eq!(state.error(), Some("Please enter a valid number for SpO2"));
        assert!(!state.is_analyzing());
        assert!(state.result().is_none());
    }

    #[tokio::test]
    async fn test_server_error_surfaces_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "model unavailable"})),
            )
            .mount(&server)
            .await;

        let client = AnalysisClient::new(reqwest::Client::new());
        let mut state = state_for(&server.uri());
        fill(&mut state);
        state.analyze(&client).await;

        assert_eq!(state.error(), Some("model unavailable"));
        assert!(state.can_submit());
    }

    #[test]
    fn test_edit_clears_error() {
        let mut state = state_for("http://localhost:5000");
        assert!(state.begin_analysis().is_none());
        assert_eq!(state.error(), Some("Please enter a valid number for Age"));

        state.edit_field(VitalsField::Age, "4");
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_begin_clears_previous_error() {
        let mut state = state_for("http://localhost:5000");
        fill(&mut state);
        state.complete_analysis(Err(AnalysisError::Network("boom".to_string())));
        assert_eq!(state.error(), Some("network error: boom"));

        let ticket = state.begin_analysis();
        assert!(ticket.is_some());
        assert!(state.error().is_none());
        assert!(state.is_analyzing());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut state = state_for("http://localhost:5000");
        fill(&mut state);
        let ticket = state.begin_analysis().unwrap();
        assert_eq!(ticket.endpoint(), "http://localhost:5000");
        assert_eq!(ticket.request().symptoms, "cough, fever");
        state.complete_analysis(Ok(sample_result()));
        assert!(state.result().is_some());

        state.clear();
        assert!(state.input().is_empty());
        assert!(state.result().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_begin_clears_previous_result() {
        let mut state = state_for("http://localhost:5000");
        fill(&mut state);
        state.complete_analysis(Ok(sample_result()));

        let _ticket = state.begin_analysis().unwrap();
        assert!(state.is_analyzing());
        assert!(!state.can_submit());
        assert!(state.result().is_none());
    }

    #[test]
    fn test_overlapping_submissions_last_completion_wins() {
        let mut state = state_for("http://localhost:5000");
        fill(&mut state);

        let first = state.begin_analysis().unwrap();
        assert!(!state.can_submit());
        // Flag bypassed: a second submission is still accepted
        let second = state.begin_analysis().unwrap();
        assert_eq!(first, second);

        let mut later = sample_result();
        later.predictions.disease_type = "Asthma".to_string();

        state.complete_analysis(Ok(later.clone()));
        state.complete_analysis(Err(AnalysisError::Network("connection reset".to_string())));
        assert!(state.result().is_none());
        assert_eq!(state.error(), Some("network error: connection reset"));

        state.complete_analysis(Ok(later.clone()));
        assert_eq!(state.result(), Some(&later));
        assert_eq!(state.error(), None);
        assert!(!state.is_analyzing());
    }

    #[test]
    fn test_ticket_uses_confirmed_endpoint_not_candidate() {
        let mut state = state_for("http://confirmed:5000");
        state.set_server_url("http://typed-but-untested:5000");
        fill(&mut state);
        let ticket = state.begin_analysis().unwrap();
        assert_eq!(ticket.endpoint(), "http://confirmed:5000");
    }

    #[test]
    fn test_connection_test_transitions() {
        let mut state = state_for("http://confirmed:5000");
        state.set_server_url("http://other:5000");
        let ticket = state.begin_connection_test();
        assert!(state.endpoint().is_testing());
        state.complete_connection_test(
            ticket,
            Err(ProbeError::Network("refused".to_string())),
        );
        assert_eq!(state.endpoint_state(), &EndpointState::Failed);
        assert_eq!(state.endpoint().confirmed(), "http://confirmed:5000");
    }
}
