//! Inference server endpoint management.
//!
//! Keeps the URL being edited apart from the URL analyses are sent to.
//! A candidate only becomes the confirmed endpoint after a successful
//! `/info` probe.

mod info;

pub use info::*;

use thiserror::Error;

/// Probe error types. Collapsed into [`EndpointState::Failed`]; only logged.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("server URL is empty")]
    EmptyUrl,
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned HTTP {0}")]
    Status(u16),
    #[error("invalid info response: {0}")]
    Parse(String),
}

/// Result of the most recent connection test.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EndpointState {
    #[default]
    Untested,
    Success(ModelInfo),
    Failed,
}

/// A probe that has been started but not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTicket {
    url: String,
}

impl ProbeTicket {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue `GET {url}/info`.
    pub async fn send(&self, http: &reqwest::Client) -> Result<ModelInfo, ProbeError> {
        run_info_probe(http, &self.url).await
    }
}

/// Holds candidate and confirmed endpoint URLs plus the probe status.
#[derive(Debug, Clone)]
pub struct ServerEndpointManager {
    candidate: String,
    confirmed: String,
    state: EndpointState,
    testing: bool,
}

impl ServerEndpointManager {
    /// Start with `url` as both the candidate and the confirmed endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            candidate: url.clone(),
            confirmed: url,
            state: EndpointState::Untested,
            testing: false,
        }
    }

    pub fn candidate(&self) -> &str {
        &self.candidate
    }

    /// The endpoint analyses are sent to.
    pub fn confirmed(&self) -> &str {
        &self.confirmed
    }

    pub fn state(&self) -> &EndpointState {
        &self.state
    }

    pub fn is_testing(&self) -> bool {
        self.testing
    }

    /// Whether the test control should be enabled.
    pub fn can_test(&self) -> bool {
        !self.testing && !self.candidate.trim().is_empty()
    }

    /// Edit the candidate URL. Does not touch the confirmed endpoint.
    pub fn set_candidate(&mut self, url: impl Into<String>) {
        self.candidate = url.into();
    }

    /// Mark a probe of the current candidate as in flight.
    pub fn begin_probe(&mut self) -> ProbeTicket {
        self.testing = true;
        self.state = EndpointState::Untested;
        ProbeTicket {
            url: self.candidate.clone(),
        }
    }

    /// Apply a finished probe. Success commits the probed URL.
    pub fn complete_probe(&mut self, ticket: ProbeTicket, outcome: Result<ModelInfo, ProbeError>) {
        self.testing = false;
        match outcome {
            Ok(info) => {
                tracing::info!(
                    "Connected to {} (model {} v{})",
                    ticket.url,
                    info.model_name,
                    info.model_version
                );
                self.confirmed = ticket.url;
                self.state = EndpointState::Success(info);
            }
            Err(e) => {
                tracing::error!("Error connecting to server {}: {}", ticket.url, e);
                self.state = EndpointState::Failed;
            }
        }
    }

    /// Probe the current candidate and apply the outcome.
    pub async fn probe(&mut self, http: &reqwest::Client) -> &EndpointState {
        let ticket = self.begin_probe();
        let outcome = ticket.send(http).await;
        self.complete_probe(ticket, outcome);
        &self.state
    }

    /// Set the candidate to `url`, then probe it.
    pub async fn probe_url(&mut self, http: &reqwest::Client, url: &str) -> &EndpointState {
        self.set_candidate(url);
        self.probe(http).await
    }
}
