//! Core types for the harvest-dash dataset and dashboard.
//!
//! This crate provides the shared data types used across the synthesizer,
//! the dataset layer, and the dashboard: the daily record, the calendar
//! buckets used for grouping and filtering, and the section/metric enums
//! that drive the analysis selectors.

use chrono::{Datelike, NaiveDate};
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// DailyRecord
// =============================================================================

/// One calendar day of farm metrics.
///
/// Records are produced by the synthesizer and never mutated afterwards.
/// Monetary values are euros; yield is kilograms of harvested fruit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Calendar date of the observation.
    pub date: NaiveDate,
    /// Mean daily temperature (°C).
    pub temperature_c: f64,
    /// Relative humidity (%), in [30, 100].
    pub humidity_pct: f64,
    /// Rainfall (mm), zero on dry days.
    pub rainfall_mm: f64,
    /// Harvested yield (kg), in [0, 250].
    pub yield_kg: f64,
    /// Sale price per kg (€), in [3.5, 5.5].
    pub price_eur_per_kg: f64,
    /// Production cost per kg (€), in [1.5, 2.3].
    pub cost_eur_per_kg: f64,
    /// Revenue (€) = yield × price.
    pub revenue_eur: f64,
    /// Total cost (€) = yield × cost.
    pub total_cost_eur: f64,
    /// Profit (€) = revenue − total cost.
    pub profit_eur: f64,
    /// Fruit quality score, in [0, 10].
    pub quality_score: f64,
    /// Customer satisfaction index, in [0, 100].
    pub satisfaction_index: f64,
    /// Profit margin as a fraction of revenue, in [0, 1].
    pub margin_ratio: f64,
    /// Composite efficiency index, in [0, 100]. Normalized against the
    /// series-wide maxima of margin and yield, so it is only meaningful
    /// in the context of the full generated series.
    pub efficiency_index: f64,
}

impl DailyRecord {
    /// Month bucket for monthly grouping.
    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    /// Quarter bucket for period filtering.
    pub fn quarter(&self) -> Quarter {
        Quarter::from_date(self.date)
    }
}

// =============================================================================
// Calendar Buckets
// =============================================================================

/// Year-month grouping key, e.g. `"2025-03"`.
///
/// The string form is zero-padded, so lexicographic order is chronological
/// order — a `BTreeMap<MonthKey, _>` iterates months in calendar order.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    From,
    Into,
)]
pub struct MonthKey(String);

impl MonthKey {
    /// Derive the month key from a date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(format!("{:04}-{:02}", date.year(), date.month()))
    }

    /// Borrow the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Calendar quarter, derived from a date's month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// All quarters, in calendar order.
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Derive the quarter from a 1-based calendar month.
    pub fn from_month(month: u32) -> Self {
        match month {
            1..=3 => Quarter::Q1,
            4..=6 => Quarter::Q2,
            7..=9 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    /// Derive the quarter from a date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_month(date.month())
    }

    /// Quarter number in 1..=4.
    pub fn as_u8(self) -> u8 {
        match self {
            Quarter::Q1 => 1,
            Quarter::Q2 => 2,
            Quarter::Q3 => 3,
            Quarter::Q4 => 4,
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.as_u8())
    }
}

/// Period filter for dashboard views: the whole series or one quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuarterFilter {
    /// No filtering; every record passes.
    #[default]
    All,
    /// Only records in the given quarter pass.
    Only(Quarter),
}

impl QuarterFilter {
    /// Whether a record in the given quarter passes this filter.
    pub fn matches(self, quarter: Quarter) -> bool {
        match self {
            QuarterFilter::All => true,
            QuarterFilter::Only(q) => q == quarter,
        }
    }
}

impl fmt::Display for QuarterFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuarterFilter::All => write!(f, "all"),
            QuarterFilter::Only(q) => write!(f, "{}", q.as_u8()),
        }
    }
}

impl FromStr for QuarterFilter {
    type Err = ParseFilterError;

    /// Accepts `"all"` (case-insensitive) or a quarter number `"1"`–`"4"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(QuarterFilter::All);
        }
        match s {
            "1" => Ok(QuarterFilter::Only(Quarter::Q1)),
            "2" => Ok(QuarterFilter::Only(Quarter::Q2)),
            "3" => Ok(QuarterFilter::Only(Quarter::Q3)),
            "4" => Ok(QuarterFilter::Only(Quarter::Q4)),
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}

/// Error for an unrecognized quarter filter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFilterError(pub String);

impl fmt::Display for ParseFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid quarter filter {:?} (expected \"all\" or 1-4)", self.0)
    }
}

impl std::error::Error for ParseFilterError {}

impl Serialize for QuarterFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QuarterFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Sections and Metrics
// =============================================================================

/// Dashboard section, the top-level analysis selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Monthly economics: revenue, costs, profit, quality, satisfaction.
    Economic,
    /// Monthly weather: temperature, humidity, rainfall.
    Environmental,
    /// Daily profit plotted against an environmental variable.
    ProfitVsEnvironment,
}

impl Section {
    /// All sections, in display order.
    pub const ALL: [Section; 3] = [
        Section::Economic,
        Section::Environmental,
        Section::ProfitVsEnvironment,
    ];

    /// Human-readable section label.
    pub fn label(self) -> &'static str {
        match self {
            Section::Economic => "Economic analysis",
            Section::Environmental => "Environmental analysis",
            Section::ProfitVsEnvironment => "Profit vs environment",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Economic => write!(f, "economic"),
            Section::Environmental => write!(f, "environmental"),
            Section::ProfitVsEnvironment => write!(f, "profit_vs_environment"),
        }
    }
}

impl FromStr for Section {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "economic" => Ok(Section::Economic),
            "environmental" => Ok(Section::Environmental),
            "profit_vs_environment" => Ok(Section::ProfitVsEnvironment),
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}

/// A selectable metric, one column of the daily record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Revenue,
    Cost,
    Profit,
    Quality,
    Satisfaction,
    Temperature,
    Humidity,
    Rainfall,
}

impl Metric {
    /// Read this metric's value off a record.
    pub fn value_of(self, record: &DailyRecord) -> f64 {
        match self {
            Metric::Revenue => record.revenue_eur,
            Metric::Cost => record.total_cost_eur,
            Metric::Profit => record.profit_eur,
            Metric::Quality => record.quality_score,
            Metric::Satisfaction => record.satisfaction_index,
            Metric::Temperature => record.temperature_c,
            Metric::Humidity => record.humidity_pct,
            Metric::Rainfall => record.rainfall_mm,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Revenue => "Revenue",
            Metric::Cost => "Total cost",
            Metric::Profit => "Profit",
            Metric::Quality => "Quality score",
            Metric::Satisfaction => "Satisfaction index",
            Metric::Temperature => "Temperature",
            Metric::Humidity => "Humidity",
            Metric::Rainfall => "Rainfall",
        }
    }

    /// Display unit, empty for dimensionless scores.
    pub fn unit(self) -> &'static str {
        match self {
            Metric::Revenue | Metric::Cost | Metric::Profit => "€",
            Metric::Quality | Metric::Satisfaction => "",
            Metric::Temperature => "°C",
            Metric::Humidity => "%",
            Metric::Rainfall => "mm",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Revenue => write!(f, "revenue"),
            Metric::Cost => write!(f, "cost"),
            Metric::Profit => write!(f, "profit"),
            Metric::Quality => write!(f, "quality"),
            Metric::Satisfaction => write!(f, "satisfaction"),
            Metric::Temperature => write!(f, "temperature"),
            Metric::Humidity => write!(f, "humidity"),
            Metric::Rainfall => write!(f, "rainfall"),
        }
    }
}

impl FromStr for Metric {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "revenue" => Ok(Metric::Revenue),
            "cost" => Ok(Metric::Cost),
            "profit" => Ok(Metric::Profit),
            "quality" => Ok(Metric::Quality),
            "satisfaction" => Ok(Metric::Satisfaction),
            "temperature" => Ok(Metric::Temperature),
            "humidity" => Ok(Metric::Humidity),
            "rainfall" => Ok(Metric::Rainfall),
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_record() -> DailyRecord {
        DailyRecord {
            date: date(2025, 5, 15),
            temperature_c: 21.3,
            humidity_pct: 74.0,
            rainfall_mm: 0.0,
            yield_kg: 198.5,
            price_eur_per_kg: 4.31,
            cost_eur_per_kg: 1.88,
            revenue_eur: 855.5,
            total_cost_eur: 373.2,
            profit_eur: 482.3,
            quality_score: 7.6,
            satisfaction_index: 78.1,
            margin_ratio: 0.56,
            efficiency_index: 91.2,
        }
    }

    #[test]
    fn test_month_key_ordering() {
        let jan = MonthKey::from_date(date(2025, 1, 31));
        let oct = MonthKey::from_date(date(2025, 10, 1));
        assert_eq!(jan.as_str(), "2025-01");
        assert_eq!(oct.as_str(), "2025-10");
        // Zero-padding keeps string order chronological
        assert!(jan < oct);
    }

    #[test]
    fn test_quarter_from_month() {
        assert_eq!(Quarter::from_month(1), Quarter::Q1);
        assert_eq!(Quarter::from_month(3), Quarter::Q1);
        assert_eq!(Quarter::from_month(4), Quarter::Q2);
        assert_eq!(Quarter::from_month(9), Quarter::Q3);
        assert_eq!(Quarter::from_month(12), Quarter::Q4);
    }

    #[test]
    fn test_record_buckets() {
        let record = sample_record();
        assert_eq!(record.month_key().as_str(), "2025-05");
        assert_eq!(record.quarter(), Quarter::Q2);
    }

    #[test]
    fn test_quarter_filter_matches() {
        assert!(QuarterFilter::All.matches(Quarter::Q3));
        assert!(QuarterFilter::Only(Quarter::Q3).matches(Quarter::Q3));
        assert!(!QuarterFilter::Only(Quarter::Q3).matches(Quarter::Q1));
    }

    #[test]
    fn test_quarter_filter_parsing() {
        assert_eq!("all".parse::<QuarterFilter>().unwrap(), QuarterFilter::All);
        assert_eq!("ALL".parse::<QuarterFilter>().unwrap(), QuarterFilter::All);
        assert_eq!(
            "2".parse::<QuarterFilter>().unwrap(),
            QuarterFilter::Only(Quarter::Q2)
        );
        assert!("5".parse::<QuarterFilter>().is_err());
        assert!("q".parse::<QuarterFilter>().is_err());
    }

    #[test]
    fn test_quarter_filter_serde_roundtrip() {
        let all: QuarterFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(all, QuarterFilter::All);
        let q4: QuarterFilter = serde_json::from_str("\"4\"").unwrap();
        assert_eq!(q4, QuarterFilter::Only(Quarter::Q4));
        assert_eq!(serde_json::to_string(&q4).unwrap(), "\"4\"");
    }

    #[test]
    fn test_section_serde_names() {
        let section: Section = serde_json::from_str("\"profit_vs_environment\"").unwrap();
        assert_eq!(section, Section::ProfitVsEnvironment);
        assert_eq!(
            serde_json::to_string(&Section::Economic).unwrap(),
            "\"economic\""
        );
    }

    #[test]
    fn test_metric_value_of() {
        let record = sample_record();
        assert_eq!(Metric::Revenue.value_of(&record), 855.5);
        assert_eq!(Metric::Temperature.value_of(&record), 21.3);
        assert_eq!(Metric::Rainfall.value_of(&record), 0.0);
    }

    #[test]
    fn test_metric_parsing_matches_display() {
        for metric in [
            Metric::Revenue,
            Metric::Cost,
            Metric::Profit,
            Metric::Quality,
            Metric::Satisfaction,
            Metric::Temperature,
            Metric::Humidity,
            Metric::Rainfall,
        ] {
            let roundtrip: Metric = metric.to_string().parse().unwrap();
            assert_eq!(roundtrip, metric);
        }
    }
}
