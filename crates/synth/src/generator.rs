//! Two-pass season generator.
//!
//! Pass one walks the date range in order and derives each day's weather,
//! yield, economics, and quality from the config's curves plus seeded noise.
//! Pass two computes the efficiency index, which normalizes each day against
//! the series-wide maxima of margin and yield and therefore needs the full
//! series first.
//!
//! The per-day draw order is fixed (temperature, humidity, rainfall amount,
//! dry-day roll, yield, price, cost, quality, satisfaction) so that a seed
//! pins every value in the series.

use std::f64::consts::PI;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Gamma, Normal};

use types::DailyRecord;

use crate::{SynthConfig, SynthError};

/// Per-day economics derived from yield, price, and cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayEconomics {
    /// Revenue (€) = yield × price.
    pub revenue: f64,
    /// Total cost (€) = yield × cost.
    pub total_cost: f64,
    /// Profit (€) = revenue − total cost.
    pub profit: f64,
    /// Profit margin clamped to [0, 1]; zero when revenue is zero.
    pub margin: f64,
}

/// Derive a day's economics from its yield and unit prices.
pub fn economics(yield_kg: f64, price_per_kg: f64, cost_per_kg: f64) -> DayEconomics {
    let revenue = yield_kg * price_per_kg;
    let total_cost = yield_kg * cost_per_kg;
    let profit = revenue - total_cost;
    let margin = if revenue > 0.0 {
        (profit / revenue).clamp(0.0, 1.0)
    } else {
        0.0
    };
    DayEconomics {
        revenue,
        total_cost,
        profit,
        margin,
    }
}

/// Noise distributions built once from the config.
struct NoiseModel {
    temperature: Normal<f64>,
    humidity: Normal<f64>,
    rainfall: Gamma<f64>,
    yield_kg: Normal<f64>,
    price: Normal<f64>,
    cost: Normal<f64>,
    quality: Normal<f64>,
    satisfaction: Normal<f64>,
}

impl NoiseModel {
    fn from_config(config: &SynthConfig) -> Result<Self, SynthError> {
        let normal = |mean: f64, sigma: f64| {
            Normal::new(mean, sigma).map_err(|e| SynthError::Distribution(e.to_string()))
        };
        Ok(Self {
            temperature: normal(0.0, config.temperature_sigma)?,
            humidity: normal(0.0, config.humidity_sigma)?,
            rainfall: Gamma::new(config.rain_gamma_shape, config.rain_gamma_scale)
                .map_err(|e| SynthError::Distribution(e.to_string()))?,
            yield_kg: normal(0.0, config.yield_sigma)?,
            price: normal(0.0, config.price_sigma)?,
            cost: normal(config.cost_mean, config.cost_sigma)?,
            quality: normal(0.0, config.quality_sigma)?,
            satisfaction: normal(0.0, config.satisfaction_sigma)?,
        })
    }
}

/// Generates one deterministic season of daily records.
///
/// The synthesizer is consumed by [`generate`](Self::generate); rebuilding it
/// with the same config reproduces the same series.
pub struct SeasonSynthesizer {
    config: SynthConfig,
    noise: NoiseModel,
    rng: StdRng,
}

impl SeasonSynthesizer {
    /// Create a synthesizer, validating the config and building the noise
    /// distributions up front.
    pub fn new(config: SynthConfig) -> Result<Self, SynthError> {
        config.validate()?;
        let noise = NoiseModel::from_config(&config)?;
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self { config, noise, rng })
    }

    /// Access the configuration.
    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Generate the full series, one record per day in the range.
    pub fn generate(mut self) -> Vec<DailyRecord> {
        let num_days = self.config.num_days() as usize;
        let dates: Vec<NaiveDate> = self.config.start_date.iter_days().take(num_days).collect();

        let mut records: Vec<DailyRecord> = dates
            .iter()
            .enumerate()
            .map(|(i, &date)| self.generate_day(i, date))
            .collect();

        // Efficiency needs the series-wide maxima, so it runs as a second
        // pass over the finished records. Maxima are recomputed every run.
        let max_margin = records.iter().map(|r| r.margin_ratio).fold(0.0, f64::max);
        let max_yield = records.iter().map(|r| r.yield_kg).fold(0.0, f64::max);
        for record in &mut records {
            record.efficiency_index =
                efficiency_index(record.margin_ratio, record.yield_kg, max_margin, max_yield);
        }

        records
    }

    /// Generate one day's record (everything except the efficiency index,
    /// which the caller fills in after the series is complete).
    fn generate_day(&mut self, index: usize, date: NaiveDate) -> DailyRecord {
        let cfg = &self.config;

        // Seasonal drift plus daily noise. The drift term uses the 0-based
        // day index over a fixed 365-day cycle.
        let temperature =
            22.0 + 10.0 * PI * (index as f64 / 365.0) + self.noise.temperature.sample(&mut self.rng);

        // Cooler days are more humid.
        let humidity = (75.0 - 0.8 * (temperature - 22.0) + self.noise.humidity.sample(&mut self.rng))
            .clamp(30.0, 100.0);

        // Gamma-distributed shower, zeroed on dry days. The shower is drawn
        // before the dry-day roll to keep the draw order stable.
        let shower = self.noise.rainfall.sample(&mut self.rng);
        let rainfall = if self.rng.random_bool(cfg.dry_day_probability) {
            0.0
        } else {
            shower
        };

        // Bell-curve harvest season around the peak day (1-based index),
        // scaled by how favorable the weather is.
        let day_of_year = (index + 1) as f64;
        let curve = ((day_of_year - cfg.harvest_peak_day) / cfg.harvest_sigma_days).powi(2);
        let base_yield = 200.0 * (-0.5 * curve).exp();
        let weather_factor = 1.0 + 0.02 * (temperature - 12.0) + 0.001 * (humidity - 75.0);
        let yield_kg = (base_yield * weather_factor + self.noise.yield_kg.sample(&mut self.rng))
            .clamp(0.0, 250.0);

        // Price softens when supply is high.
        let price_per_kg = (4.5 + self.noise.price.sample(&mut self.rng)
            - 0.002 * (yield_kg - 100.0))
            .clamp(3.5, 5.5);
        let cost_per_kg = self.noise.cost.sample(&mut self.rng).clamp(1.5, 2.3);

        let econ = economics(yield_kg, price_per_kg, cost_per_kg);

        // Quality degrades away from the ideal temperature/humidity band and
        // under heavy rain.
        let quality = (8.0
            - 0.05 * (temperature - 18.0).abs()
            - 0.03 * (humidity - 70.0).abs()
            - 0.001 * (rainfall - 10.0).max(0.0)
            + self.noise.quality.sample(&mut self.rng))
        .clamp(0.0, 10.0);

        let satisfaction =
            (quality * 10.0 + self.noise.satisfaction.sample(&mut self.rng)).clamp(0.0, 100.0);

        DailyRecord {
            date,
            temperature_c: temperature,
            humidity_pct: humidity,
            rainfall_mm: rainfall,
            yield_kg,
            price_eur_per_kg: price_per_kg,
            cost_eur_per_kg: cost_per_kg,
            revenue_eur: econ.revenue,
            total_cost_eur: econ.total_cost,
            profit_eur: econ.profit,
            quality_score: quality,
            satisfaction_index: satisfaction,
            margin_ratio: econ.margin,
            efficiency_index: 0.0,
        }
    }
}

/// Blend of normalized margin and normalized yield, each relative to the
/// series-wide maximum. A non-positive maximum contributes zero instead of
/// dividing by zero.
fn efficiency_index(margin: f64, yield_kg: f64, max_margin: f64, max_yield: f64) -> f64 {
    let margin_part = if max_margin > 0.0 {
        margin / max_margin
    } else {
        0.0
    };
    let yield_part = if max_yield > 0.0 {
        yield_kg / max_yield
    } else {
        0.0
    };
    (0.6 * margin_part * 100.0 + 0.4 * yield_part * 100.0).clamp(0.0, 100.0)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_default() -> Vec<DailyRecord> {
        SeasonSynthesizer::new(SynthConfig::default())
            .unwrap()
            .generate()
    }

    #[test]
    fn test_one_record_per_day() {
        let records = generate_default();
        assert_eq!(records.len(), 365);
        assert_eq!(records[0].date.to_string(), "2025-01-01");
        assert_eq!(records[364].date.to_string(), "2025-12-31");
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let first = generate_default();
        let second = generate_default();
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a = SeasonSynthesizer::new(SynthConfig::default().seed(1))
            .unwrap()
            .generate();
        let b = SeasonSynthesizer::new(SynthConfig::default().seed(2))
            .unwrap()
            .generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_all_bounds_hold() {
        for r in generate_default() {
            assert!((30.0..=100.0).contains(&r.humidity_pct), "{:?}", r);
            assert!((0.0..=250.0).contains(&r.yield_kg), "{:?}", r);
            assert!((3.5..=5.5).contains(&r.price_eur_per_kg), "{:?}", r);
            assert!((1.5..=2.3).contains(&r.cost_eur_per_kg), "{:?}", r);
            assert!((0.0..=10.0).contains(&r.quality_score), "{:?}", r);
            assert!((0.0..=100.0).contains(&r.satisfaction_index), "{:?}", r);
            assert!((0.0..=1.0).contains(&r.margin_ratio), "{:?}", r);
            assert!((0.0..=100.0).contains(&r.efficiency_index), "{:?}", r);
            assert!(r.rainfall_mm >= 0.0, "{:?}", r);
        }
    }

    #[test]
    fn test_economic_identities_exact() {
        for r in generate_default() {
            assert_eq!(r.revenue_eur, r.yield_kg * r.price_eur_per_kg);
            assert_eq!(r.total_cost_eur, r.yield_kg * r.cost_eur_per_kg);
            assert_eq!(r.profit_eur, r.revenue_eur - r.total_cost_eur);
        }
    }

    #[test]
    fn test_single_day_economics_example() {
        let econ = economics(100.0, 4.5, 1.9);
        assert_eq!(econ.revenue, 450.0);
        assert_eq!(econ.total_cost, 190.0);
        assert_eq!(econ.profit, 260.0);
        assert!((econ.margin - 0.5778).abs() < 1e-4);
    }

    #[test]
    fn test_zero_revenue_gives_zero_margin() {
        let econ = economics(0.0, 4.5, 1.9);
        assert_eq!(econ.revenue, 0.0);
        assert_eq!(econ.margin, 0.0);
    }

    #[test]
    fn test_dry_day_fraction_near_config() {
        let records = generate_default();
        let dry = records.iter().filter(|r| r.rainfall_mm == 0.0).count();
        let fraction = dry as f64 / records.len() as f64;
        // 70% dry days with generous slack for a 365-sample run
        assert!(
            (0.6..=0.8).contains(&fraction),
            "dry fraction {fraction} out of range"
        );
    }

    #[test]
    fn test_efficiency_peaks_at_series_maxima() {
        let records = generate_default();
        let max_margin = records.iter().map(|r| r.margin_ratio).fold(0.0, f64::max);
        let max_yield = records.iter().map(|r| r.yield_kg).fold(0.0, f64::max);
        // A hypothetical day at both maxima scores exactly 100.
        assert_eq!(
            efficiency_index(max_margin, max_yield, max_margin, max_yield),
            100.0
        );
    }

    #[test]
    fn test_efficiency_guards_zero_maxima() {
        assert_eq!(efficiency_index(0.5, 100.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_harvest_peak_in_season() {
        let records = generate_default();
        let peak = records
            .iter()
            .max_by(|a, b| a.yield_kg.total_cmp(&b.yield_kg))
            .unwrap();
        // Peak day 135 lands in mid-May; noise can shift it by a few weeks.
        assert!(
            (3..=6).contains(&chrono::Datelike::month(&peak.date)),
            "peak at {}",
            peak.date
        );
    }

    #[test]
    fn test_short_range() {
        let config = SynthConfig::default().date_range(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 7).unwrap(),
        );
        let records = SeasonSynthesizer::new(config).unwrap().generate();
        assert_eq!(records.len(), 7);
    }
}
