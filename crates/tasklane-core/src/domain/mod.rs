//! Domain entities for Tasklane.

pub mod task;

pub use task::*;
