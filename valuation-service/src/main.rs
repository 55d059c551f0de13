use service_core::observability::init_tracing;
use valuation_service::{config::ValuationConfig, Application};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ValuationConfig::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "valuation-service",
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    );

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
