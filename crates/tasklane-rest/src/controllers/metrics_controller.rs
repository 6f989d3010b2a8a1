//! Prometheus scrape endpoint.

use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;

/// Creates a router serving the rendered metrics at `path`.
pub fn router<S>(path: &str, handle: PrometheusHandle) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(path, get(move || std::future::ready(handle.render())))
}
