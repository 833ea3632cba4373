use anyhow::{Context, Result};
use prompt_refiner::ui::TerminalUI;
use prompt_refiner::{Config, OpenAiClient, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    // stderr keeps log lines out of the rendered output on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let config = Config::from_env().context("invalid configuration")?;
    info!(
        source = %config.credential_source,
        model = %config.model,
        temperature = config.temperature,
        has_key = config.credential.is_some(),
        "configuration loaded"
    );

    let client = OpenAiClient::new(config.api_url.clone(), config.timeout)?;
    let session = Session::new(config, client);

    let mut ui = TerminalUI::new(session)?;
    ui.run().await?;

    Ok(())
}
