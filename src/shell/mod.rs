//! Line-oriented terminal front-end.
//!
//! Reads commands from an input stream and drives one [`AppState`].

mod commands;

pub use commands::*;

use crate::app::AppState;
use crate::client::AnalysisClient;
use crate::config::ClientConfig;
use crate::endpoint::EndpointState;
use crate::vitals::VitalsField;

use std::fmt::Write as _;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Interactive session over a single [`AppState`].
pub struct Shell {
    state: AppState,
    http: reqwest::Client,
    client: AnalysisClient,
}

impl Shell {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let http = config.http_client()?;
        Ok(Self {
            state: AppState::new(config),
            client: AnalysisClient::new(http.clone()),
            http,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Process lines until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        output.write_all(b"> ").await?;
        output.flush().await?;

        while let Some(line) = lines.next_line().await? {
            let reply = match parse_command(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.handle(command).await,
                Ok(None) => String::new(),
                Err(e) => e,
            };
            if !reply.is_empty() {
                output.write_all(reply.as_bytes()).await?;
                output.write_all(b"\n").await?;
            }
            output.write_all(b"> ").await?;
            output.flush().await?;
        }

        output.flush().await
    }

    /// Apply one command and return the text to show.
    pub async fn handle(&mut self, command: Command) -> String {
        match command {
            Command::Set(field, value) => {
                self.state.edit_field(field, value);
                String::new()
            }
            Command::Url(url) => {
                self.state.set_server_url(url);
                String::new()
            }
            Command::Test => {
                if !self.state.endpoint().can_test() {
                    return "Enter a server URL first.".to_string();
                }
                let state = self.state.test_connection(&self.http).await;
                describe_endpoint(state)
            }
            Command::Analyze => {
                if !self.state.can_submit() {
                    return "Analyzing...".to_string();
                }
                self.state.analyze(&self.client).await;
                match (self.state.error(), self.state.report()) {
                    (Some(error), _) => format!("Error: {}", error),
                    (None, Some(report)) => report.to_string(),
                    (None, None) => String::new(),
                }
            }
            Command::Clear => {
                self.state.clear();
                "Cleared.".to_string()
            }
            Command::Show => self.describe(),
            Command::Help => HELP.to_string(),
            Command::Quit => String::new(),
        }
    }

    fn describe(&self) -> String {
        let mut out = String::new();
        let input = self.state.input();
        for field in VitalsField::ALL {
            let _ = writeln!(out, "{:<26} {}", format!("{}:", field), input.get(field));
        }
        let endpoint = self.state.endpoint();
        let _ = writeln!(out, "Server URL:                {}", endpoint.candidate());
        let _ = writeln!(out, "Confirmed endpoint:        {}", endpoint.confirmed());
        let _ = writeln!(out, "{}", describe_endpoint(endpoint.state()));
        if let Some(error) = self.state.error() {
            let _ = writeln!(out, "Error: {}", error);
        }
        if let Some(report) = self.state.report() {
            let _ = writeln!(out, "{}", report);
        }
        out.trim_end().to_string()
    }
}

/// Status text for the connection panel.
pub fn describe_endpoint(state: &EndpointState) -> String {
    match state {
        EndpointState::Untested => "Connection: untested".to_string(),
        EndpointState::Success(info) => format!(
            "Connected Successfully\nModel: {}\nVersion: {}\nAccuracy: {}%",
            info.model_name, info.model_version, info.accuracy
        ),
        EndpointState::Failed => "Connection Failed\nCould not connect to the server. \
Please check the URL and ensure the server is running."
            .to_string(),
    }
}
