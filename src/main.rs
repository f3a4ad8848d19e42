use anyhow::Result;
use localized_validation::{config::Config, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("localized_validation=info".parse()?),
        )
        .init();

    info!("Starting localized validation service");

    let config = Config::from_env()?;
    server::run(config).await
}
