//! Application assembly.

use crate::di::{build_module, ServiceResolver};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use std::future::Future;
use std::sync::Arc;
use tasklane_config::AppConfig;
use tasklane_core::{TasklaneError, TasklaneResult};
use tasklane_repository::{create_pool, DatabasePool, DatabasePoolInterface};
use tasklane_rest::{create_router, AppState, MetricsEndpoint};
use tasklane_service::{create_redis_pool, RedisCacheService};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// A fully wired server: pools opened, schema migrated, router built.
pub struct Application {
    config: AppConfig,
    db_pool: Arc<DatabasePool>,
    router: Router,
}

impl Application {
    /// Opens the store and cache and assembles the router.
    ///
    /// An unreachable Redis is logged and tolerated; reads fall through to
    /// the database until it comes back.
    pub async fn build(config: AppConfig, metrics: Option<PrometheusHandle>) -> TasklaneResult<Self> {
        let db_pool = create_pool(&config.database).await?;
        info!("Database ready at {}", config.database.url);

        let redis = if config.redis.enabled {
            let cache = RedisCacheService::new(create_redis_pool(&config.redis)?)
                .with_command_timeout(config.redis.command_timeout());
            match cache.ping(config.redis.ping_timeout()).await {
                Ok(()) => info!("Redis reachable at {}", config.redis.url),
                Err(e) => warn!(
                    "Redis unreachable at {}: {}; serving the task list from the database",
                    config.redis.url, e
                ),
            }
            Some(cache)
        } else {
            info!("Redis disabled, task list caching is off");
            None
        };

        let module = build_module(&db_pool, &config.cache, redis.clone());

        let mut state = AppState::new(module.task_service()).with_health_check(db_pool.clone());
        if let Some(cache) = redis {
            state = state.with_health_check(Arc::new(cache));
        }

        let metrics = metrics.map(|handle| MetricsEndpoint {
            path: config.observability.metrics_path.clone(),
            handle,
        });
        let router = create_router(state, &config.server, metrics);

        Ok(Self {
            config,
            db_pool,
            router,
        })
    }

    /// Returns the configuration the application was built with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns a handle to the router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Binds the configured address.
    pub async fn bind(&self) -> TasklaneResult<TcpListener> {
        let addr = self.config.server.addr();
        TcpListener::bind(&addr)
            .await
            .map_err(|e| TasklaneError::internal(format!("Failed to bind {}: {}", addr, e)))
    }

    /// Serves until `shutdown` resolves, then closes the database pool.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> TasklaneResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Ok(addr) = listener.local_addr() {
            info!("Starting REST server on http://{}", addr);
        }

        let result = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| TasklaneError::internal(format!("REST server error: {}", e)));

        self.db_pool.close().await;
        result
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("addr", &self.config.server.addr())
            .field("db_pool", &self.db_pool)
            .finish_non_exhaustive()
    }
}
