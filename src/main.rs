use anyhow::{Context, Result};
use common::RelayConfig;
use dotenvy::dotenv;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = RelayConfig::from_env().context("invalid relay configuration")?;

    let _guard = match &config.log_dir {
        Some(dir) => common::logging_file(dir),
        None => common::logging_stdout(),
    };

    if config.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set, the provider will reject every request");
    }
    info!(profile = %config.profile, api_base = %config.api_base, "loaded configuration");

    let relay = api_server::build_relay(&config)?;

    api_server::run_api_server(config.addr, relay).await?;

    Ok(())
}
