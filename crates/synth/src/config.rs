//! Synthesizer configuration.
//!
//! All generation parameters are defined here for easy tuning. Defaults
//! reproduce the reference season: the 2025 calendar year with seed 42.

use chrono::NaiveDate;

use crate::SynthError;

/// Configuration for one synthetic season.
#[derive(Debug, Clone)]
pub struct SynthConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // Date Range and Seeding
    // ─────────────────────────────────────────────────────────────────────────
    /// First day of the series (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the series (inclusive).
    pub end_date: NaiveDate,
    /// Random seed; a fixed seed pins the whole series.
    pub seed: u64,

    // ─────────────────────────────────────────────────────────────────────────
    // Harvest Curve
    // ─────────────────────────────────────────────────────────────────────────
    /// Day of the harvest peak (1-based position in the range).
    pub harvest_peak_day: f64,
    /// Width of the harvest bell curve in days.
    pub harvest_sigma_days: f64,

    // ─────────────────────────────────────────────────────────────────────────
    // Weather Parameters
    // ─────────────────────────────────────────────────────────────────────────
    /// Std dev of daily temperature noise (°C).
    pub temperature_sigma: f64,
    /// Std dev of daily humidity noise (%).
    pub humidity_sigma: f64,
    /// Shape parameter of the rainfall gamma distribution.
    pub rain_gamma_shape: f64,
    /// Scale parameter of the rainfall gamma distribution.
    pub rain_gamma_scale: f64,
    /// Probability that a given day has no rain at all.
    pub dry_day_probability: f64,

    // ─────────────────────────────────────────────────────────────────────────
    // Economics Parameters
    // ─────────────────────────────────────────────────────────────────────────
    /// Std dev of daily yield noise (kg).
    pub yield_sigma: f64,
    /// Std dev of daily price noise (€/kg).
    pub price_sigma: f64,
    /// Mean production cost (€/kg).
    pub cost_mean: f64,
    /// Std dev of production cost (€/kg).
    pub cost_sigma: f64,

    // ─────────────────────────────────────────────────────────────────────────
    // Quality Parameters
    // ─────────────────────────────────────────────────────────────────────────
    /// Std dev of daily quality noise (score points).
    pub quality_sigma: f64,
    /// Std dev of daily satisfaction noise (index points).
    pub satisfaction_sigma: f64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            start_date: jan1(2025),
            end_date: dec31(2025),
            seed: 42,

            harvest_peak_day: 135.0,
            harvest_sigma_days: 30.0,

            temperature_sigma: 2.0,
            humidity_sigma: 5.0,
            rain_gamma_shape: 2.0,
            rain_gamma_scale: 2.0,
            dry_day_probability: 0.7,

            yield_sigma: 5.0,
            price_sigma: 0.2,
            cost_mean: 1.9,
            cost_sigma: 0.1,

            quality_sigma: 0.3,
            satisfaction_sigma: 5.0,
        }
    }
}

impl SynthConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder-style setters for fluent configuration
    // ─────────────────────────────────────────────────────────────────────────

    /// Set the random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the date range to a full calendar year.
    pub fn year(mut self, year: i32) -> Self {
        self.start_date = jan1(year);
        self.end_date = dec31(year);
        self
    }

    /// Set an explicit date range (both ends inclusive).
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Set the dry-day probability.
    pub fn dry_day_probability(mut self, p: f64) -> Self {
        self.dry_day_probability = p;
        self
    }

    /// Set the harvest curve peak and width.
    pub fn harvest_curve(mut self, peak_day: f64, sigma_days: f64) -> Self {
        self.harvest_peak_day = peak_day;
        self.harvest_sigma_days = sigma_days;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Computed Properties
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of days in the configured range.
    pub fn num_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), SynthError> {
        if self.end_date < self.start_date {
            return Err(SynthError::EmptyDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if !(0.0..=1.0).contains(&self.dry_day_probability) {
            return Err(SynthError::InvalidParameter(format!(
                "dry_day_probability {} not in [0, 1]",
                self.dry_day_probability
            )));
        }
        for (name, value) in [
            ("harvest_sigma_days", self.harvest_sigma_days),
            ("rain_gamma_shape", self.rain_gamma_shape),
            ("rain_gamma_scale", self.rain_gamma_scale),
        ] {
            if value <= 0.0 {
                return Err(SynthError::InvalidParameter(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("temperature_sigma", self.temperature_sigma),
            ("humidity_sigma", self.humidity_sigma),
            ("yield_sigma", self.yield_sigma),
            ("price_sigma", self.price_sigma),
            ("cost_sigma", self.cost_sigma),
            ("quality_sigma", self.quality_sigma),
            ("satisfaction_sigma", self.satisfaction_sigma),
        ] {
            if value < 0.0 {
                return Err(SynthError::InvalidParameter(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Preset Configurations
// ─────────────────────────────────────────────────────────────────────────────

impl SynthConfig {
    /// Drought scenario: almost no rain.
    pub fn drought() -> Self {
        Self::default().dry_day_probability(0.95)
    }

    /// Wet season: rain most days, heavier showers.
    pub fn wet_season() -> Self {
        let mut config = Self::default().dry_day_probability(0.3);
        config.rain_gamma_scale = 3.0;
        config
    }
}

fn jan1(year: i32) -> NaiveDate {
    // Jan 1 exists for every chrono-representable year
    NaiveDate::from_ymd_opt(year, 1, 1).expect("January 1st is always a valid date")
}

fn dec31(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 12, 31).expect("December 31st is always a valid date")
}
