//! Shared utilities for the investment bot
//!
//! This crate provides the logging setup and the process-level configuration
//! used by every binary in the workspace.

pub mod config;
pub mod logging;

pub use config::Config;
pub use logging::{init_tracing, init_tracing_with};
