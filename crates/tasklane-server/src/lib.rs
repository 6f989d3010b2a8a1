//! # Tasklane Server Library
//!
//! Wiring for the Tasklane server: the Shaku module, application assembly
//! and startup helpers shared by the binary and its tests.

pub mod app;
pub mod di;
pub mod startup;
