//! Interactive price dashboard
//!
//! This module provides the terminal dashboard: sliders for the apartment
//! attributes on the left, the ranked price table and a horizontal bar chart
//! on the right. Every slider change re-runs the whole prediction pipeline.

pub mod app;
pub mod ui;

// Re-export commonly used types
pub use app::{DashboardApp, KeyAction};
