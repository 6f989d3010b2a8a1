//! Main application router.

use crate::{
    controllers::{health_controller, metrics_controller, task_controller},
    middleware::logging_middleware,
    state::AppState,
};
use axum::{
    http::{HeaderValue, StatusCode},
    middleware, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tasklane_config::ServerConfig;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Prometheus endpoint mounted next to the API.
#[derive(Clone)]
pub struct MetricsEndpoint {
    pub path: String,
    pub handle: PrometheusHandle,
}

/// Creates the main application router.
pub fn create_router(
    state: AppState,
    server_config: &ServerConfig,
    metrics: Option<MetricsEndpoint>,
) -> Router {
    let cors = create_cors_layer(server_config);

    let mut router = Router::new()
        .merge(health_controller::router())
        .merge(task_controller::router())
        .with_state(state);

    if let Some(endpoint) = metrics {
        info!("Metrics exposed at {}", endpoint.path);
        router = router.merge(metrics_controller::router(&endpoint.path, endpoint.handle));
    }

    // The last layer added sees the request first.
    let router = router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            server_config.request_timeout(),
        ))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    info!("Router created with task and health endpoints");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins = server_config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect::<Vec<HeaderValue>>();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
