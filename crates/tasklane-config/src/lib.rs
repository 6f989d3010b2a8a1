//! # Tasklane Config
//!
//! Configuration management for Tasklane.
//! Supports layered configuration from files and environment variables,
//! plus the plain `APP_ADDR` / `SQLITE_PATH` / `REDIS_ADDR` variables of
//! older deployments.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
