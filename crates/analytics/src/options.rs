//! Metric selectors per dashboard section.
//!
//! Each section offers a fixed metric dropdown with a default selection;
//! the front end renders these verbatim.

use serde::Serialize;
use types::{Metric, Section};

/// One entry of a metric dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricOption {
    /// Machine value, matches the `metric` query parameter.
    pub value: Metric,
    /// Human-readable label.
    pub label: &'static str,
}

/// The metric dropdown for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisOptions {
    pub options: Vec<MetricOption>,
    /// Pre-selected metric when the section is first opened.
    pub default: Metric,
}

fn option(metric: Metric) -> MetricOption {
    MetricOption {
        value: metric,
        label: metric.label(),
    }
}

/// Metrics selectable in the given section, with the section's default.
///
/// The profit-vs-environment section selects the environmental axis; profit
/// is always the other axis and is not offered as a choice.
pub fn analysis_options(section: Section) -> AnalysisOptions {
    match section {
        Section::Economic => AnalysisOptions {
            options: vec![
                option(Metric::Revenue),
                option(Metric::Cost),
                option(Metric::Profit),
                option(Metric::Quality),
                option(Metric::Satisfaction),
            ],
            default: Metric::Revenue,
        },
        Section::Environmental | Section::ProfitVsEnvironment => AnalysisOptions {
            options: vec![
                option(Metric::Temperature),
                option(Metric::Humidity),
                option(Metric::Rainfall),
            ],
            default: Metric::Temperature,
        },
    }
}
