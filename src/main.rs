use clap::Parser;
use untis_json::utils::{logger, validation::Validate};
use untis_json::{create_router, AppState, CliConfig, UntisConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_server_logger(cli.verbose, cli.log_format);
    tracing::info!("Starting untis-json");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    let config = match UntisConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ WebUntis access is not configured: {}", e);
            tracing::error!("Set USERNAME, PASSWORD, SCHOOL, SERVER and MYCLASS");
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Serving class {} of {} via {}",
        config.class_name,
        config.school,
        config.server
    );

    let state = AppState::from_config(&config, cli.timeout())?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((cli.host.as_str(), cli.port)).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
