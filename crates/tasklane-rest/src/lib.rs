//! # Tasklane REST
//!
//! HTTP surface of Tasklane built on Axum: task endpoints, health probes and
//! the optional Prometheus scrape endpoint.

pub mod controllers;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
