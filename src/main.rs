//! Respira - terminal front-end for the respiratory analysis client.

use respira::config::ClientConfig;
use respira::shell::{Shell, HELP};

use tokio::io::{stdin, stdout, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("respira=info".parse()?))
        .init();

    // Load configuration
    let cfg = ClientConfig::load();
    tracing::info!("Starting Respira with server {}", cfg.server_url);
    if let Some(timeout) = cfg.request_timeout {
        tracing::info!("Request timeout set to {:?}", timeout);
    }

    let mut shell = Shell::new(&cfg)?;
    println!("AI Respiratory Assistant");
    println!("{}", HELP);

    shell.run(BufReader::new(stdin()), stdout()).await?;

    tracing::info!("Goodbye");
    Ok(())
}
