//! Server startup utilities.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tasklane_config::AppConfig;
use tasklane_core::{TasklaneError, TasklaneResult};
use tokio::signal;
use tracing::{error, info};

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
  _____         _    _
 |_   _|_ _ ___| | _| | __ _ _ __   ___
   | |/ _` / __| |/ / |/ _` | '_ \ / _ \
   | | (_| \__ \   <| | (_| | | | |  __/
   |_|\__,_|___/_|\_\_|\__,_|_| |_|\___|
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("Tasks API: http://{}/api/tasks/", addr);
    info!("Health:    http://{}/healthz", addr);
    info!("Ready:     http://{}/ready", addr);
    if config.observability.metrics_enabled {
        info!("Metrics:   http://{}{}", addr, config.observability.metrics_path);
    }
    info!("Database:  {}", config.database.url);
    if config.redis.enabled {
        info!("Cache:     {} (ttl {}s)", config.redis.url, config.cache.list_ttl_secs);
    } else {
        info!("Cache:     disabled");
    }
    info!("{}", separator);
}

/// Installs the global Prometheus recorder and describes the cache counters.
///
/// Returns `None` when metrics are disabled.
pub fn install_metrics(config: &AppConfig) -> TasklaneResult<Option<PrometheusHandle>> {
    if !config.observability.metrics_enabled {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| TasklaneError::internal(format!("Failed to install metrics recorder: {}", e)))?;
    tasklane_service::cache_metrics::register_metrics();

    Ok(Some(handle))
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
