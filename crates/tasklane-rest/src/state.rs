//! Application state for Axum handlers.

use shaku::{HasComponent, Module};
use std::sync::Arc;
use tasklane_core::HealthCheck;
use tasklane_service::TaskService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub task_service: Arc<dyn TaskService>,
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppState {
    /// Creates a new application state without readiness checks.
    pub fn new(task_service: Arc<dyn TaskService>) -> Self {
        Self {
            task_service,
            health_checks: Vec::new(),
        }
    }

    /// Resolves the task service from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module + HasComponent<dyn TaskService>,
    {
        Self::new(module.resolve())
    }

    /// Adds a dependency probed by the readiness endpoint.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let checks: Vec<&str> = self.health_checks.iter().map(|c| c.name()).collect();
        f.debug_struct("AppState")
            .field("health_checks", &checks)
            .finish_non_exhaustive()
    }
}
