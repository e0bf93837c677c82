//! Aggregation and view-building for the harvest dashboard.
//!
//! This crate turns the loaded dataset into render-ready payloads:
//!
//! - [`stats`] - Means, sums, and least-squares fitting
//! - [`options`] - Metric dropdowns per dashboard section
//! - [`monthly`] - Group-by-month mean aggregation
//! - [`views`] - Full view assembly (charts, KPI tiles, empty states)
//!
//! Everything here is pure: functions take the dataset by reference and
//! build owned, serializable payloads.

pub mod monthly;
pub mod options;
pub mod stats;
pub mod views;

pub use monthly::{MonthlyPoint, monthly_mean};
pub use options::{AnalysisOptions, MetricOption, analysis_options};
pub use stats::LinearFit;
pub use views::{DashboardView, KpiTile, ScatterPoint, render_view};
