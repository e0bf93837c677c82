//! Dashboard view assembly.
//!
//! A view is everything one section needs to render for a given metric and
//! quarter filter: the chart payload, the KPI tiles, and a title. The KPI
//! tiles always summarize the full filtered set, not just the plotted
//! series, so they stay stable while the metric dropdown changes.

use serde::Serialize;
use types::{Metric, QuarterFilter, Section};

use dataset::{BucketedRecord, Dataset};

use crate::monthly::{MonthlyPoint, monthly_mean};
use crate::stats::{self, LinearFit};

/// One KPI tile: a label, a number, and a display unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiTile {
    pub label: &'static str,
    pub value: f64,
    pub unit: &'static str,
}

/// One point of the profit-vs-environment scatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Source date, for hover detail.
    pub date: chrono::NaiveDate,
    /// Month key, for color grouping.
    pub month: types::MonthKey,
    /// Environmental metric value.
    pub x: f64,
    /// Daily profit (€).
    pub y: f64,
}

/// A fully assembled dashboard view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DashboardView {
    /// Nothing to plot. `message` is set when a filter matched no records,
    /// and absent when no metric has been selected yet.
    Empty { message: Option<String> },
    /// Monthly bar/line chart for the economic and environmental sections.
    MonthlySeries {
        title: String,
        points: Vec<MonthlyPoint>,
        kpis: Vec<KpiTile>,
    },
    /// Daily scatter with an optional least-squares trendline.
    Scatter {
        title: String,
        points: Vec<ScatterPoint>,
        fit: Option<LinearFit>,
        kpis: Vec<KpiTile>,
    },
}

/// Assemble the view for a section, selected metric, and quarter filter.
///
/// With no metric selected the view is empty without a message (the front
/// end shows its placeholder). With a metric but no matching records the
/// view is empty with an explanatory message.
pub fn render_view(
    dataset: &Dataset,
    section: Section,
    metric: Option<Metric>,
    filter: QuarterFilter,
) -> DashboardView {
    let Some(metric) = metric else {
        return DashboardView::Empty { message: None };
    };

    let filtered = dataset.filter_quarter(filter);
    if filtered.is_empty() {
        return DashboardView::Empty {
            message: Some(format!("No data for the selected period ({filter})")),
        };
    }

    match section {
        Section::Economic | Section::Environmental => {
            let points = monthly_mean(&filtered, metric);
            let kpis = match section {
                Section::Economic => economic_kpis(&filtered),
                _ => environmental_kpis(&filtered),
            };
            DashboardView::MonthlySeries {
                title: series_title(section, metric, filter),
                points,
                kpis,
            }
        }
        Section::ProfitVsEnvironment => scatter_view(&filtered, metric, filter),
    }
}

fn series_title(section: Section, metric: Metric, filter: QuarterFilter) -> String {
    match filter {
        QuarterFilter::All => format!("{} — monthly mean {}", section.label(), metric.label()),
        QuarterFilter::Only(q) => format!(
            "{} — monthly mean {} ({q})",
            section.label(),
            metric.label()
        ),
    }
}

fn metric_values(records: &[&BucketedRecord], metric: Metric) -> Vec<f64> {
    records.iter().map(|r| metric.value_of(&r.record)).collect()
}

fn tile(metric: Metric, label: &'static str, value: f64) -> KpiTile {
    KpiTile {
        label,
        value,
        unit: metric.unit(),
    }
}

/// Economic tiles: monetary totals plus mean scores over the filtered days.
fn economic_kpis(records: &[&BucketedRecord]) -> Vec<KpiTile> {
    let mean_of = |m: Metric| stats::mean(&metric_values(records, m)).unwrap_or(0.0);
    vec![
        tile(
            Metric::Revenue,
            "Total revenue",
            stats::sum(&metric_values(records, Metric::Revenue)),
        ),
        tile(
            Metric::Cost,
            "Total cost",
            stats::sum(&metric_values(records, Metric::Cost)),
        ),
        tile(
            Metric::Profit,
            "Total profit",
            stats::sum(&metric_values(records, Metric::Profit)),
        ),
        tile(Metric::Quality, "Mean quality", mean_of(Metric::Quality)),
        tile(
            Metric::Satisfaction,
            "Mean satisfaction",
            mean_of(Metric::Satisfaction),
        ),
    ]
}

/// Environmental tiles: mean weather plus cumulative rainfall.
fn environmental_kpis(records: &[&BucketedRecord]) -> Vec<KpiTile> {
    let mean_of = |m: Metric| stats::mean(&metric_values(records, m)).unwrap_or(0.0);
    vec![
        tile(
            Metric::Temperature,
            "Mean temperature",
            mean_of(Metric::Temperature),
        ),
        tile(Metric::Humidity, "Mean humidity", mean_of(Metric::Humidity)),
        tile(
            Metric::Rainfall,
            "Total rainfall",
            stats::sum(&metric_values(records, Metric::Rainfall)),
        ),
    ]
}

fn scatter_view(
    records: &[&BucketedRecord],
    metric: Metric,
    filter: QuarterFilter,
) -> DashboardView {
    let points: Vec<ScatterPoint> = records
        .iter()
        .map(|r| ScatterPoint {
            date: r.record.date,
            month: r.month.clone(),
            x: metric.value_of(&r.record),
            y: r.record.profit_eur,
        })
        .collect();

    let x: Vec<f64> = points.iter().map(|p| p.x).collect();
    let y: Vec<f64> = points.iter().map(|p| p.y).collect();
    let fit = stats::linear_fit(&x, &y);

    let kpis = vec![
        tile(Metric::Profit, "Total profit", stats::sum(&y)),
        KpiTile {
            label: metric.label(),
            value: stats::mean(&x).unwrap_or(0.0),
            unit: metric.unit(),
        },
    ];

    let title = match filter {
        QuarterFilter::All => format!("Daily profit vs {}", metric.label()),
        QuarterFilter::Only(q) => format!("Daily profit vs {} ({q})", metric.label()),
    };

    DashboardView::Scatter {
        title,
        points,
        fit,
        kpis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use types::{DailyRecord, Quarter};

    fn record(date: &str, temp: f64, profit: f64) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            temperature_c: temp,
            humidity_pct: 70.0,
            rainfall_mm: 2.0,
            yield_kg: 100.0,
            price_eur_per_kg: 4.5,
            cost_eur_per_kg: 1.9,
            revenue_eur: 450.0,
            total_cost_eur: 190.0,
            profit_eur: profit,
            quality_score: 7.0,
            satisfaction_index: 80.0,
            margin_ratio: 0.5,
            efficiency_index: 50.0,
        }
    }

    fn small_dataset() -> Dataset {
        Dataset::from_records(vec![
            record("2025-01-05", 10.0, 100.0),
            record("2025-01-15", 12.0, 140.0),
            record("2025-07-10", 25.0, 300.0),
        ])
    }

    #[test]
    fn test_no_metric_renders_blank_empty() {
        let view = render_view(
            &small_dataset(),
            Section::Economic,
            None,
            QuarterFilter::All,
        );
        assert_eq!(view, DashboardView::Empty { message: None });
    }

    #[test]
    fn test_empty_filter_has_message() {
        let view = render_view(
            &small_dataset(),
            Section::Economic,
            Some(Metric::Revenue),
            QuarterFilter::Only(Quarter::Q4),
        );
        match view {
            DashboardView::Empty { message: Some(m) } => assert!(m.contains("4")),
            other => panic!("expected empty view with message, got {other:?}"),
        }
    }

    #[test]
    fn test_economic_view_kpis_over_filtered_set() {
        let view = render_view(
            &small_dataset(),
            Section::Economic,
            Some(Metric::Profit),
            QuarterFilter::Only(Quarter::Q1),
        );
        let DashboardView::MonthlySeries { points, kpis, .. } = view else {
            panic!("expected monthly series");
        };
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, 120.0); // mean of 100 and 140

        assert_eq!(kpis.len(), 5);
        let profit = kpis.iter().find(|k| k.label == "Total profit").unwrap();
        assert_eq!(profit.value, 240.0); // sum, not mean
        assert_eq!(profit.unit, "€");
    }

    #[test]
    fn test_environmental_rainfall_kpi_is_sum_chart_is_mean() {
        let view = render_view(
            &small_dataset(),
            Section::Environmental,
            Some(Metric::Rainfall),
            QuarterFilter::All,
        );
        let DashboardView::MonthlySeries { points, kpis, .. } = view else {
            panic!("expected monthly series");
        };
        // Chart: mean rainfall per month (2.0 every day).
        assert!(points.iter().all(|p| p.value == 2.0));
        // Tile: cumulative rainfall over the filtered days.
        let rain = kpis.iter().find(|k| k.label == "Total rainfall").unwrap();
        assert_eq!(rain.value, 6.0);
    }

    #[test]
    fn test_scatter_view_with_fit() {
        let view = render_view(
            &small_dataset(),
            Section::ProfitVsEnvironment,
            Some(Metric::Temperature),
            QuarterFilter::All,
        );
        let DashboardView::Scatter {
            points, fit, kpis, ..
        } = view
        else {
            panic!("expected scatter");
        };
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].month.as_str(), "2025-01");
        // Warmer days are more profitable in this fixture.
        assert!(fit.unwrap().slope > 0.0);
        assert_eq!(kpis.len(), 2);
        assert_eq!(kpis[0].value, 540.0);
    }

    #[test]
    fn test_scatter_fit_absent_without_spread() {
        let dataset = Dataset::from_records(vec![
            record("2025-01-05", 15.0, 100.0),
            record("2025-01-06", 15.0, 140.0),
        ]);
        let view = render_view(
            &dataset,
            Section::ProfitVsEnvironment,
            Some(Metric::Temperature),
            QuarterFilter::All,
        );
        let DashboardView::Scatter { fit, .. } = view else {
            panic!("expected scatter");
        };
        assert!(fit.is_none());
    }
}
