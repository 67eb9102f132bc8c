//! Command implementations for the CLI
//!
//! This module contains the implementation of all CLI commands:
//! - dashboard: Interactive price dashboard
//! - predict: One-shot prediction printed as table, chart or JSON
//! - check: Load configuration and model, print a summary
//! - config: Configuration display and validation

pub mod check;
pub mod config;
pub mod dashboard;
pub mod predict;
