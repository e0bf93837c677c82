//! Monthly group-by-mean aggregation.

use std::collections::BTreeMap;

use serde::Serialize;
use types::{Metric, MonthKey};

use dataset::BucketedRecord;

use crate::stats;

/// One month of an aggregated series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    /// Month key, e.g. `"2025-03"`.
    pub month: MonthKey,
    /// Mean of the metric over the month's records.
    pub value: f64,
    /// Number of records behind the mean.
    pub sample_count: usize,
}

/// Group records by month and take the mean of the metric in each month.
///
/// Months come back in chronological order; months with no records simply
/// do not appear. Every chart series is a mean, including rainfall (whose
/// KPI tile is a sum) — the chart shows a typical day, the tile the total.
pub fn monthly_mean(records: &[&BucketedRecord], metric: Metric) -> Vec<MonthlyPoint> {
    let mut buckets: BTreeMap<MonthKey, Vec<f64>> = BTreeMap::new();
    for record in records {
        buckets
            .entry(record.month.clone())
            .or_default()
            .push(metric.value_of(&record.record));
    }

    buckets
        .into_iter()
        .filter_map(|(month, values)| {
            stats::mean(&values).map(|value| MonthlyPoint {
                month,
                value,
                sample_count: values.len(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dataset::Dataset;
    use types::DailyRecord;

    fn record(date: &str, profit: f64) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            temperature_c: 20.0,
            humidity_pct: 70.0,
            rainfall_mm: 1.0,
            yield_kg: 100.0,
            price_eur_per_kg: 4.5,
            cost_eur_per_kg: 1.9,
            revenue_eur: 450.0,
            total_cost_eur: 190.0,
            profit_eur: profit,
            quality_score: 7.5,
            satisfaction_index: 80.0,
            margin_ratio: 0.5,
            efficiency_index: 50.0,
        }
    }

    #[test]
    fn test_monthly_mean_groups_and_orders() {
        // Deliberately out of order; grouping must not care.
        let dataset = Dataset::from_records(vec![
            record("2025-03-01", 100.0),
            record("2025-01-10", 10.0),
            record("2025-01-20", 30.0),
        ]);
        let refs: Vec<_> = dataset.records().iter().collect();

        let points = monthly_mean(&refs, Metric::Profit);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].month.as_str(), "2025-01");
        assert_eq!(points[0].value, 20.0);
        assert_eq!(points[0].sample_count, 2);
        assert_eq!(points[1].month.as_str(), "2025-03");
        assert_eq!(points[1].value, 100.0);
    }

    #[test]
    fn test_monthly_mean_empty() {
        assert!(monthly_mean(&[], Metric::Revenue).is_empty());
    }
}
