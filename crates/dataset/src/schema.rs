//! Column schema and serialization rounding for the dataset artifact.
//!
//! In-memory records keep full `f64` precision; rounding happens only when
//! a record is serialized. Weather, yield, satisfaction, and efficiency get
//! one decimal place; monetary values, quality, and margin get two.

use types::DailyRecord;

/// Header row of the dataset artifact, in column order.
pub const HEADER: [&str; 14] = [
    "date",
    "temperature_c",
    "humidity_pct",
    "rainfall_mm",
    "yield_kg",
    "price_eur_per_kg",
    "cost_eur_per_kg",
    "revenue_eur",
    "total_cost_eur",
    "profit_eur",
    "quality_score",
    "satisfaction_index",
    "margin_ratio",
    "efficiency_index",
];

/// Date column format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Serialize one record to its column values, applying per-field rounding.
pub(crate) fn format_row(record: &DailyRecord) -> [String; 14] {
    [
        record.date.format(DATE_FORMAT).to_string(),
        format!("{:.1}", record.temperature_c),
        format!("{:.1}", record.humidity_pct),
        format!("{:.1}", record.rainfall_mm),
        format!("{:.1}", record.yield_kg),
        format!("{:.2}", record.price_eur_per_kg),
        format!("{:.2}", record.cost_eur_per_kg),
        format!("{:.2}", record.revenue_eur),
        format!("{:.2}", record.total_cost_eur),
        format!("{:.2}", record.profit_eur),
        format!("{:.2}", record.quality_score),
        format!("{:.1}", record.satisfaction_index),
        format!("{:.2}", record.margin_ratio),
        format!("{:.1}", record.efficiency_index),
    ]
}
