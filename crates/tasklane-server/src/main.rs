//! # Tasklane Server
//!
//! Main entry point for the Tasklane task-list service.

use tasklane_config::{AppConfig, ConfigLoader};
use tasklane_core::telemetry::{init_telemetry, shutdown_telemetry};
use tasklane_core::TasklaneResult;
use tasklane_server::app::Application;
use tasklane_server::startup::{install_metrics, print_banner, print_startup_info, shutdown_signal};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_telemetry(&config.observability.telemetry(&config.app.name)) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    print_banner();
    info!("Starting Tasklane...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    let result = run(config).await;
    shutdown_telemetry();

    if let Err(e) = result {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

fn load_config() -> TasklaneResult<AppConfig> {
    Ok(ConfigLoader::from_default_location()?.into_config())
}

async fn run(config: AppConfig) -> TasklaneResult<()> {
    let metrics = install_metrics(&config)?;
    print_startup_info(&config);

    let app = Application::build(config, metrics).await?;
    let listener = app.bind().await?;
    app.serve(listener, shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}
