//! Central configuration for the harvest-dash binary.
//!
//! CLI defaults live here so the argument parser and tests agree on them.

use server::ServerConfig;
use synth::SynthConfig;

/// Default RNG seed for dataset generation.
pub const DEFAULT_SEED: u64 = 42;

/// Default season year.
pub const DEFAULT_YEAR: i32 = 2025;

/// Default dataset artifact path.
pub const DEFAULT_DATASET: &str = "dataset.csv";

/// Build the synthesizer configuration for a seed and season year.
pub fn synth_config(seed: u64, year: i32) -> SynthConfig {
    SynthConfig::default().seed(seed).year(year)
}

/// Build the server configuration, letting CLI flags override environment
/// variables and environment variables override defaults.
pub fn server_config(host: Option<String>, port: Option<u16>) -> ServerConfig {
    let mut config = ServerConfig::from_env();
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_synth_config_defaults() {
        let config = synth_config(DEFAULT_SEED, DEFAULT_YEAR);
        assert_eq!(config.seed, 42);
        assert_eq!(
            config.start_date,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert_eq!(config.num_days(), 365);
    }

    #[test]
    fn test_server_config_cli_overrides() {
        let config = server_config(Some("127.0.0.1".into()), Some(9000));
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn test_server_config_defaults_pass_through() {
        let config = server_config(None, None);
        assert_eq!(config.port, 8060);
    }
}
